//! Background threshold integration tests.
//!
//! Files strictly larger than the threshold are copied on a worker thread;
//! the CLI waits for the worker before it exits.

use super::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;

fn paste_json(fixture: &TestFixture, src: &std::path::Path, threshold: u64) -> Value {
    let output = cargo_bin_cmd!("fpane")
        .args(["--output", "json", "paste"])
        .arg(src)
        .arg(fixture.dst.path())
        .arg("--background-threshold")
        .arg(threshold.to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_file_at_threshold_is_inline() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("exact.bin", &[1u8; 4096]);

    let value = paste_json(&fixture, &src, 4096);
    assert_eq!(value["mode"], "inline");
}

#[test]
fn test_file_over_threshold_is_background() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("over.bin", &[1u8; 4097]);

    let value = paste_json(&fixture, &src, 4096);
    assert_eq!(value["mode"], "background");
    assert_eq!(value["bytes_copied"], 4097);
    assert_eq!(fs::read(fixture.dst_path("over.bin")).unwrap().len(), 4097);
}

#[test]
fn test_background_copy_with_small_chunks() {
    let fixture = TestFixture::new();
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 241) as u8).collect();
    let src = fixture.src_file("pattern.bin", &data);

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&src)
        .arg(fixture.dst.path())
        .args(["--background-threshold", "0", "--chunk-size", "512"])
        .assert()
        .success();

    assert_eq!(fs::read(fixture.dst_path("pattern.bin")).unwrap(), data);
}

#[test]
fn test_empty_directory_is_background() {
    let fixture = TestFixture::new();
    let empty = fixture.src.path().join("empty");
    fs::create_dir(&empty).unwrap();

    let value = paste_json(&fixture, &empty, u64::MAX);
    assert_eq!(value["mode"], "background");
    assert!(fixture.dst_path("empty").is_dir());
}
