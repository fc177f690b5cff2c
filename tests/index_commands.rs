use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{init_repository_dir, jot_commit, repository_dir, run_jot_command};
use common::file::{FileSpec, write_file, write_generated_files};

#[rstest]
fn add_generated_files_to_index_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let files = write_generated_files(repository_dir.path(), 3);

    run_jot_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 files"));

    let index = std::fs::read_to_string(repository_dir.path().join(".jot/index"))?;
    let stage = std::fs::read_to_string(repository_dir.path().join(".jot/stage"))?;
    for file in &files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(index.contains(&name), "{name} missing from the index");
        assert!(stage.contains(&name), "{name} missing from the stage");
    }

    Ok(())
}

#[rstest]
fn add_nested_directory_records_relative_paths(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("src/nested/lib.txt"),
        "library".to_string(),
    ));

    run_jot_command(repository_dir.path(), &["add", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 files"));

    run_jot_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staged:    src/nested/lib.txt"));

    Ok(())
}

#[rstest]
fn adding_unchanged_file_is_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_jot_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File not changed: 1.txt"))
        .stdout(predicate::str::contains("Added 0 files"));

    Ok(())
}

#[rstest]
fn adding_staged_file_twice_is_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));

    run_jot_command(dir, &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 files"));

    run_jot_command(dir, &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File already staged: 1.txt"));

    Ok(())
}

#[rstest]
fn per_file_errors_do_not_stop_other_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a/2.txt"), "dos".to_string()));

    run_jot_command(dir, &["add", "missing.txt", "1.txt", "a/2.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File not found: missing.txt"))
        .stdout(predicate::str::contains("File not changed: 1.txt"))
        .stdout(predicate::str::contains("Added 1 files"));

    Ok(())
}

#[rstest]
fn adding_work_tree_skips_unchanged_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a/b/3.txt"), "tres".to_string()));

    let output = run_jot_command(dir, &["add", "."]).output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "Added 1 files\n");

    jot_commit(dir, "Change 3.txt").assert().success();

    Ok(())
}
