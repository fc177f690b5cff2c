use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{
    commit_file, init_repository_dir, object_path, read_ref, repository_dir, run_jot_command,
};

#[rstest]
fn create_branch_at_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_jot_command(dir, &["branch", "feature-branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Branch feature-branch created successfully",
        ));

    assert_eq!(read_ref(dir, "feature-branch"), read_ref(dir, "master"));
    assert_eq!(read_ref(dir, "HEAD").as_deref(), Some("master"));
}

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_jot_command(dir, &["branch", "feature"]).assert().success();

    run_jot_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Branch feature already exists"));
}

#[rstest]
#[case("bad..name")]
#[case("name.lock")]
#[case("with space")]
#[case("HEAD")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] name: &str) {
    run_jot_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid branch name"));
}

#[rstest]
fn create_branch_without_commits(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_jot_command(dir, &["init"]).assert().success();

    run_jot_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commits yet"));
}

#[rstest]
fn list_branches(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_jot_command(dir, &["branch", "b1"]).assert().success();
    run_jot_command(dir, &["branch", "zeta"]).assert().success();

    run_jot_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("  b1\n* master\n  zeta\n");
}

#[rstest]
fn remove_branch_deletes_its_own_history(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let base = read_ref(dir, "master").expect("master not set");

    run_jot_command(dir, &["branch", "feature"]).assert().success();
    run_jot_command(dir, &["checkout", "feature"]).assert().success();
    let own = commit_file(dir, "1.txt", "uno", "Feature commit");
    run_jot_command(dir, &["checkout", "master"]).assert().success();

    run_jot_command(dir, &["branch", "remove", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Branch feature removed successfully"));

    assert_eq!(read_ref(dir, "feature"), None);
    assert!(!object_path(dir, &own).exists());
    assert!(!dir.join(".jot/trees").join(&own).exists());
    assert!(object_path(dir, &base).exists());
}

#[rstest]
fn remove_current_branch_fails(init_repository_dir: TempDir) {
    run_jot_command(init_repository_dir.path(), &["branch", "remove", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot remove the current branch master",
        ));
}

#[rstest]
fn remove_unknown_branch_fails(init_repository_dir: TempDir) {
    run_jot_command(init_repository_dir.path(), &["branch", "remove", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Revision not found: nope"));
}
