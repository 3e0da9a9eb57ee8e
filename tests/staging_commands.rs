use crate::common::command::{
    commit_file, grove_add, init_repository_dir, repository_with_commit, run_grove_command,
    stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn status_of(dir: &std::path::Path) -> String {
    stdout_of(run_grove_command(dir, &["status"]))
}

#[rstest]
fn clean_repository_has_empty_status(repository_with_commit: TempDir) {
    assert_eq!(
        status_of(repository_with_commit.path()),
        "=== Branches ===\n\
         *main\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n"
    );
}

#[rstest]
fn added_file_is_listed_as_staged(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("wug.txt"), "wug\n".to_string()));

    grove_add(dir, "wug.txt").assert().success().stdout("");

    let status = status_of(dir);
    assert!(status.contains("=== Staged Files ===\nwug.txt\n"));
    assert!(status.ends_with("=== Untracked Files ===\n"));
}

#[rstest]
fn adding_a_missing_file_is_refused(init_repository_dir: TempDir) {
    grove_add(init_repository_dir.path(), "nope.txt")
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn adding_a_file_in_a_subdirectory_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("nested").join("a.txt"), "a".to_string()));

    grove_add(dir, "nested/a.txt")
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn staged_files_are_listed_in_name_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let mut files = write_generated_files(dir, 5);
    for file in &files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        grove_add(dir, &name).assert().success();
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

    let expected = files
        .iter()
        .map(|file| format!("{}\n", file.path.file_name().unwrap().to_string_lossy()))
        .collect::<String>();
    let status = status_of(dir);

    assert!(status.contains(&format!("=== Staged Files ===\n{expected}\n")));
}

#[rstest]
fn adding_committed_content_back_clears_the_staged_entry(repository_with_commit: TempDir) {
    let dir = repository_with_commit.path();

    write_file(FileSpec::new(dir.join("wug.txt"), "changed\n".to_string()));
    grove_add(dir, "wug.txt").assert().success();
    assert!(status_of(dir).contains("=== Staged Files ===\nwug.txt\n"));

    write_file(FileSpec::new(dir.join("wug.txt"), "wug\n".to_string()));
    grove_add(dir, "wug.txt").assert().success();

    assert!(status_of(dir).contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn adding_a_removed_file_back_cancels_the_removal(repository_with_commit: TempDir) {
    let dir = repository_with_commit.path();

    run_grove_command(dir, &["rm", "wug.txt"]).assert().success();
    assert!(!dir.join("wug.txt").exists());
    assert!(status_of(dir).contains("=== Removed Files ===\nwug.txt\n"));

    write_file(FileSpec::new(dir.join("wug.txt"), "wug\n".to_string()));
    grove_add(dir, "wug.txt").assert().success();

    let status = status_of(dir);
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.ends_with("=== Untracked Files ===\n"));
}

#[rstest]
fn removing_a_staged_file_only_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    grove_add(dir, "new.txt").assert().success();

    run_grove_command(dir, &["rm", "new.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("new.txt")), "new");
    let status = status_of(dir);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.ends_with("=== Untracked Files ===\nnew.txt\n"));
}

#[rstest]
fn removing_a_tracked_file_deletes_it_and_stages_the_removal(repository_with_commit: TempDir) {
    let dir = repository_with_commit.path();

    run_grove_command(dir, &["rm", "wug.txt"]).assert().success();

    assert!(!dir.join("wug.txt").exists());
    let status = status_of(dir);
    assert!(status.contains("=== Removed Files ===\nwug.txt\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn removing_an_unknown_file_is_refused(repository_with_commit: TempDir) {
    let dir = repository_with_commit.path();
    write_file(FileSpec::new(dir.join("stray.txt"), "stray".to_string()));

    run_grove_command(dir, &["rm", "stray.txt"])
        .assert()
        .success()
        .stdout("No reason to remove the file.\n");

    assert!(dir.join("stray.txt").exists());
}

#[rstest]
fn status_reports_every_kind_of_change(repository_with_commit: TempDir) {
    let dir = repository_with_commit.path();
    commit_file(dir, "a.txt", "a\n", "add a");
    commit_file(dir, "b.txt", "b\n", "add b");
    commit_file(dir, "c.txt", "c\n", "add c");
    run_grove_command(dir, &["branch", "other"]).assert().success();

    // modified and deleted without staging
    write_file(FileSpec::new(dir.join("a.txt"), "a changed\n".to_string()));
    std::fs::remove_file(dir.join("b.txt")).unwrap();

    run_grove_command(dir, &["rm", "c.txt"]).assert().success();

    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    grove_add(dir, "new.txt").assert().success();

    // staged, then changed or deleted afterwards
    write_file(FileSpec::new(dir.join("later.txt"), "v1\n".to_string()));
    grove_add(dir, "later.txt").assert().success();
    write_file(FileSpec::new(dir.join("later.txt"), "v2\n".to_string()));
    write_file(FileSpec::new(dir.join("gone.txt"), "gone\n".to_string()));
    grove_add(dir, "gone.txt").assert().success();
    std::fs::remove_file(dir.join("gone.txt")).unwrap();

    write_file(FileSpec::new(dir.join("extra.txt"), "extra\n".to_string()));

    assert_eq!(
        status_of(dir),
        "=== Branches ===\n\
         *main\n\
         other\n\
         \n\
         === Staged Files ===\n\
         gone.txt\n\
         later.txt\n\
         new.txt\n\
         \n\
         === Removed Files ===\n\
         c.txt\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         a.txt (modified)\n\
         b.txt (deleted)\n\
         gone.txt (deleted)\n\
         later.txt (modified)\n\
         \n\
         === Untracked Files ===\n\
         extra.txt\n"
    );
}

#[rstest]
fn file_removed_then_recreated_is_untracked(repository_with_commit: TempDir) {
    let dir = repository_with_commit.path();

    run_grove_command(dir, &["rm", "wug.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("wug.txt"), "something else\n".to_string()));

    let status = status_of(dir);
    assert!(status.contains("=== Removed Files ===\nwug.txt\n"));
    assert!(status.ends_with("=== Untracked Files ===\nwug.txt\n"));
}
