//! Special file handling integration tests.
//!
//! Only regular files and directories are copied out of a tree. Symlinks,
//! FIFOs and sockets are left behind.

use super::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::os::unix::fs::symlink;

#[test]
fn test_symlinks_inside_tree_skipped() {
    let fixture = TestFixture::new();
    let tree = fixture.src_tree("repo", 1, 1);
    symlink("file0.txt", tree.join("link")).unwrap();
    symlink("/nonexistent/target", tree.join("dangling")).unwrap();

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&tree)
        .arg(fixture.dst.path())
        .assert()
        .success();

    let copied = fixture.dst_path("repo");
    assert!(copied.join("file0.txt").exists());
    assert_eq!(fixture.count_files_recursive(&copied), 1);
    assert!(fs::symlink_metadata(copied.join("link")).is_err());
    assert!(fs::symlink_metadata(copied.join("dangling")).is_err());
}

#[test]
fn test_symlink_source_is_followed() {
    let fixture = TestFixture::new();
    let target = fixture.src_file("real.txt", b"real content");
    let link = fixture.src.path().join("alias.txt");
    symlink(&target, &link).unwrap();

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&link)
        .arg(fixture.dst.path())
        .assert()
        .success();

    let pasted = fixture.dst_path("alias.txt");
    assert!(fs::symlink_metadata(&pasted).unwrap().is_file());
    fixture.assert_file_content(&pasted, "real content");
}

#[test]
fn test_fifo_inside_tree_skipped() {
    let fixture = TestFixture::new();
    let tree = fixture.src_tree("pipes", 1, 1);
    let fifo = tree.join("queue");
    let status = std::process::Command::new("mkfifo").arg(&fifo).status();
    if !matches!(status, Ok(s) if s.success()) {
        // mkfifo unavailable
        return;
    }

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&tree)
        .arg(fixture.dst.path())
        .assert()
        .success();

    assert!(fixture.dst_path("pipes/file0.txt").exists());
    assert!(!fixture.dst_path("pipes/queue").exists());
}

#[test]
fn test_ls_marks_symlink_kind() {
    let fixture = TestFixture::new();
    symlink("/nonexistent", fixture.src.path().join("broken")).unwrap();

    cargo_bin_cmd!("fpane")
        .arg("ls")
        .arg(fixture.src.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("symlink"));
}
