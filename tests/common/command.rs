use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use serde::Deserialize;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with one commit holding `1.txt`, `a/2.txt` and `a/b/3.txt`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_jot_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    jot_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_jot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("JOT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn jot_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_jot_command(dir, &["commit", message]);
    cmd.env("JOT_COMMIT_DATE", COMMIT_DATE);
    cmd
}

/// Write `content` to `file`, add it and commit it, returning the new commit hash.
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) -> String {
    write_file(FileSpec::new(dir.join(file), content.to_string()));

    run_jot_command(dir, &["add", file]).assert().success();

    let output = jot_commit(dir, message)
        .output()
        .expect("Failed to run jot commit");
    assert!(output.status.success(), "commit failed: {output:?}");

    let stdout = String::from_utf8(output.stdout).expect("commit output is not UTF-8");
    stdout
        .trim()
        .strip_prefix("Committed successfully: ")
        .unwrap_or_else(|| panic!("unexpected commit output: {stdout}"))
        .to_string()
}

#[derive(Debug, Deserialize)]
struct RefRecord {
    name: String,
    revision: String,
}

/// Revision stored for `name` in the ref table (`HEAD` yields a branch name or a hash).
pub fn read_ref(dir: &Path, name: &str) -> Option<String> {
    let refs = std::fs::read_to_string(dir.join(".jot").join("refs")).ok()?;
    let records: Vec<RefRecord> = serde_json::from_str(&refs).ok()?;

    records
        .into_iter()
        .find(|record| record.name == name)
        .map(|record| record.revision)
}

/// Commit hashes printed by `jot log`, newest first.
pub fn log_hashes(dir: &Path) -> Vec<String> {
    let output = run_jot_command(dir, &["log"])
        .output()
        .expect("Failed to run jot log");
    assert!(output.status.success(), "log failed: {output:?}");

    String::from_utf8(output.stdout)
        .expect("log output is not UTF-8")
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

pub fn object_path(dir: &Path, oid: &str) -> std::path::PathBuf {
    dir.join(".jot").join("objects").join(&oid[..2]).join(&oid[2..])
}
