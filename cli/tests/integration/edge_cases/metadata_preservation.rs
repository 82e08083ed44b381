//! Permission and timestamp preservation integration tests.

use super::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::os::unix::fs::PermissionsExt;

#[test]
fn test_permissions_preserved_by_default() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("tool", b"#!/bin/sh\necho hi\n");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&src)
        .arg(fixture.dst.path())
        .assert()
        .success();

    let mode = fs::metadata(fixture.dst_path("tool")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o750);
}

#[test]
fn test_no_perms_flag() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("tool", b"#!/bin/sh\n");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&src)
        .arg(fixture.dst.path())
        .arg("--no-perms")
        .assert()
        .success();

    let mode = fs::metadata(fixture.dst_path("tool")).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0);
}

#[test]
fn test_times_flag_preserves_mtime() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("old.txt", b"old");
    let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000_000);
    fs::File::options()
        .write(true)
        .open(&src)
        .unwrap()
        .set_modified(past)
        .unwrap();

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&src)
        .arg(fixture.dst.path())
        .arg("--times")
        .assert()
        .success();

    let mtime = fs::metadata(fixture.dst_path("old.txt")).unwrap().modified().unwrap();
    assert_eq!(mtime, past);
}

#[test]
fn test_mtime_not_preserved_by_default() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("old.txt", b"old");
    let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000_000);
    fs::File::options()
        .write(true)
        .open(&src)
        .unwrap()
        .set_modified(past)
        .unwrap();

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&src)
        .arg(fixture.dst.path())
        .assert()
        .success();

    let mtime = fs::metadata(fixture.dst_path("old.txt")).unwrap().modified().unwrap();
    assert_ne!(mtime, past);
}
