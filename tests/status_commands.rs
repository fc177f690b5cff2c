use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{init_repository_dir, repository_dir, run_jot_command};
use common::file::{FileSpec, write_file};

fn status_of(dir: &std::path::Path) -> String {
    let output = run_jot_command(dir, &["status"])
        .output()
        .expect("Failed to run jot status");
    assert!(output.status.success(), "status failed: {output:?}");

    String::from_utf8(output.stdout).expect("status output is not UTF-8")
}

#[rstest]
fn clean_tree_after_commit(init_repository_dir: TempDir) {
    assert_eq!(
        status_of(init_repository_dir.path()),
        "On branch master\nNothing to commit, working tree clean\n"
    );
}

#[rstest]
fn untracked_file_is_listed_as_modified(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_jot_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));

    assert_eq!(
        status_of(dir),
        "On branch master\nModified files:\n    modified:  new.txt\n"
    );

    Ok(())
}

#[rstest]
fn staging_then_modifying_then_restaging(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "first change".to_string()));
    assert!(status_of(dir).contains("modified:  1.txt"));

    run_jot_command(dir, &["add", "1.txt"]).assert().success();
    assert!(status_of(dir).contains("staged:    1.txt"));

    write_file(FileSpec::new(dir.join("1.txt"), "second change".to_string()));
    let status = status_of(dir);
    assert!(status.contains("modified:  1.txt"));
    assert!(!status.contains("staged:"));

    run_jot_command(dir, &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 files"));
    assert!(status_of(dir).contains("staged:    1.txt"));
}

#[rstest]
fn removed_committed_file_is_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::remove_file(dir.join("a/2.txt")).expect("Failed to remove file");

    assert_eq!(
        status_of(dir),
        "On branch master\nDeleted files:\n    deleted:   a/2.txt\n"
    );
}

#[rstest]
fn sections_are_ordered_staged_modified_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    run_jot_command(dir, &["add", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("a/2.txt"), "dos".to_string()));
    std::fs::remove_file(dir.join("a/b/3.txt")).expect("Failed to remove file");

    assert_eq!(
        status_of(dir),
        "On branch master\n\
         Staged files:\n    staged:    1.txt\n\
         Modified files:\n    modified:  a/2.txt\n\
         Deleted files:\n    deleted:   a/b/3.txt\n"
    );
}

#[rstest]
fn status_is_persisted(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    status_of(dir);

    let states = std::fs::read_to_string(dir.join(".jot/states"))?;
    assert!(states.contains("MODIFIED"));
    assert!(states.contains("UNCHANGED"));

    Ok(())
}
