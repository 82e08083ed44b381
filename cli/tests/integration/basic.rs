//! Basic functionality integration tests for the fpane CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_ls_lists_parent_first() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let output = cargo_bin_cmd!("fpane")
        .arg("ls")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("../"), "first line was {:?}", lines[0]);
    assert!(stdout.contains("Rust source"));
    assert!(stdout.contains("sub/"));
}

#[test]
fn test_ls_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<p>").unwrap();

    let output = cargo_bin_cmd!("fpane")
        .args(["--output", "json", "ls"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).unwrap();
    let items = value.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "..");
    let html = &items[1];
    assert_eq!(html["name"], "index.html");
    assert_eq!(html["kind_label"], "HTML file");
    assert_eq!(html["size_label"], "3B");
    assert_eq!(html["is_editable_text"], false);
    assert_eq!(html["copy_status"], "none");
}

#[test]
fn test_ls_limit() {
    let dir = TempDir::new().unwrap();
    for i in 0..10 {
        fs::write(dir.path().join(format!("f{i}")), "x").unwrap();
    }

    let output = cargo_bin_cmd!("fpane")
        .args(["ls", "--limit", "4"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8(output).unwrap().lines().count(), 4);
}

#[test]
fn test_stat_file() {
    let fixture = TestFixture::new();
    let script = fixture.src_file("build.sh", b"#!/bin/sh\n");

    cargo_bin_cmd!("fpane")
        .arg("stat")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shell script"))
        .stdout(predicate::str::contains("10 bytes"));
}

#[test]
fn test_df_reports_available() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("fpane")
        .arg("df")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("available"));
}

#[test]
fn test_paste_small_file_inline() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("notes.txt", b"hello world");

    cargo_bin_cmd!("fpane")
        .arg("paste")
        .arg(&src)
        .arg(fixture.dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pasted"));

    fixture.assert_file_content(&fixture.dst_path("notes.txt"), "hello world");
}

#[test]
fn test_paste_collision_gets_numbered_name() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("report.csv", &[b'x'; 2048]);
    fs::write(fixture.dst_path("report.csv"), "existing").unwrap();

    let output = cargo_bin_cmd!("fpane")
        .args(["--output", "json", "paste"])
        .arg(&src)
        .arg(fixture.dst.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(value["mode"], "inline");
    assert_eq!(value["bytes_copied"], 2048);
    assert!(value["destination"].as_str().unwrap().ends_with("report(1).csv"));
    fixture.assert_file_content(&fixture.dst_path("report.csv"), "existing");
    assert_eq!(fs::read(fixture.dst_path("report(1).csv")).unwrap().len(), 2048);
}

#[test]
fn test_paste_directory_in_background() {
    let fixture = TestFixture::new();
    let tree = fixture.src_tree("project", 3, 2);

    let output = cargo_bin_cmd!("fpane")
        .args(["--output", "json", "paste"])
        .arg(&tree)
        .arg(fixture.dst.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(value["mode"], "background");
    assert_eq!(value["is_directory"], true);
    let copied = fixture.dst_path("project");
    assert_eq!(fixture.count_files_recursive(&copied), 6);
    fixture.assert_file_content(
        &copied.join("level0/level1/file1.txt"),
        "content at level 2",
    );
}

#[test]
fn test_rm_deletes_tree() {
    let fixture = TestFixture::new();
    let tree = fixture.src_tree("old", 2, 1);

    cargo_bin_cmd!("fpane")
        .arg("rm")
        .arg(&tree)
        .assert()
        .success();
    assert!(!tree.exists());
}
