use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{read_ref, repository_dir, run_jot_command};

#[rstest]
fn new_repository_initiated_with_jot_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty jot repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let jot_dir = repository_dir.path().join(".jot");
    assert!(jot_dir.join("objects").is_dir());
    assert!(jot_dir.join("trees").is_dir());
    assert_eq!(read_ref(repository_dir.path(), "HEAD").as_deref(), Some("master"));

    Ok(())
}

#[rstest]
fn init_at_given_path_creates_the_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_jot_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(repository_dir.path().join("nested/project/.jot/objects").is_dir());

    Ok(())
}

#[rstest]
fn init_twice_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Repository already initialized"));

    Ok(())
}

#[rstest]
fn commands_outside_a_repository_fail(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_jot_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a jot repository"));

    Ok(())
}
