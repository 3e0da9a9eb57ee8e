use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_grove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `wug.txt` committed on main
#[fixture]
pub fn repository_with_commit(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));
    grove_add(dir.path(), "wug.txt").assert().success();
    grove_commit(dir.path(), "added wug").assert().success();

    dir
}

pub fn run_grove_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("grove").expect("Failed to find grove binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("GROVE_COMMIT_DATE", COMMIT_DATE)]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn grove_add(dir: &Path, file: &str) -> Command {
    run_grove_command(dir, &["add", file])
}

pub fn grove_commit(dir: &Path, message: &str) -> Command {
    run_grove_command(dir, &["commit", message])
}

/// Write a file, stage it and commit it under the given message
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    grove_add(dir, name).assert().success();
    grove_commit(dir, message).assert().success();
}

pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run grove");
    assert!(output.status.success(), "grove exited with {}", output.status);

    String::from_utf8(output.stdout).expect("grove printed invalid UTF-8")
}
