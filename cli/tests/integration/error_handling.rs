//! Error handling integration tests for the fpane CLI.
//!
//! These tests verify that refused operations leave the filesystem alone
//! and exit with the documented codes:
//! - 2 for input the core refuses
//! - 1 for IO failures

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_paste_missing_source() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("fpane")
        .arg("paste")
        .arg(dir.path().join("does-not-exist"))
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[not_found]"));
}

#[test]
fn test_paste_parent_entry_refused() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("dest");
    fs::create_dir(&dest).unwrap();

    cargo_bin_cmd!("fpane")
        .arg("paste")
        .arg(dir.path().join(".."))
        .arg(&dest)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("parent directory entry"));

    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn test_paste_directory_into_itself_refused() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("project");
    fs::create_dir_all(project.join("src")).unwrap();
    fs::write(project.join("src/lib.rs"), "").unwrap();

    cargo_bin_cmd!("fpane")
        .arg("paste")
        .arg(&project)
        .arg(project.join("src"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("own subtree"));

    assert!(!project.join("src/project").exists());
}

#[test]
fn test_ls_missing_directory() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("fpane")
        .arg("ls")
        .arg(dir.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot read directory"));
}

#[test]
fn test_stat_missing_path() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("fpane")
        .arg("stat")
        .arg(dir.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[not_found]"));
}

#[test]
fn test_rm_parent_entry_refused() {
    let dir = TempDir::new().unwrap();
    let inner = dir.path().join("inner");
    fs::create_dir(&inner).unwrap();

    cargo_bin_cmd!("fpane")
        .arg("rm")
        .arg(inner.join(".."))
        .assert()
        .code(2);

    assert!(inner.exists());
}

#[test]
fn test_paste_into_missing_destination() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("a.txt");
    fs::write(&src, "a").unwrap();

    cargo_bin_cmd!("fpane")
        .arg("paste")
        .arg(&src)
        .arg(dir.path().join("missing/dir"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to copy"));
}

#[test]
fn test_unknown_subcommand() {
    cargo_bin_cmd!("fpane").arg("frobnicate").assert().failure();
}
