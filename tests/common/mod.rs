#![allow(dead_code)]

pub mod command;
pub mod file;

/// Fixed commit date so commit IDs are reproducible within a test
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// Read the ID HEAD points to straight from the repository state
pub fn head_commit_id(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(".grove").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Read the tip of a branch straight from the repository state
pub fn branch_commit_id(dir: &std::path::Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".grove").join("refs").join("heads").join(branch))
        .unwrap_or_else(|e| panic!("Failed to read branch {branch}: {e}"))
        .trim()
        .to_string()
}

/// Commit IDs listed by `log` output, newest first
pub fn commit_ids_from_log(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}
