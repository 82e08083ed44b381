//! Destination naming integration tests.

use super::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use rstest::rstest;
use std::fs;

fn paste(fixture: &TestFixture, src: &std::path::Path) {
    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(src)
        .arg(fixture.dst.path())
        .assert()
        .success();
}

#[test]
fn test_repeated_pastes_count_up() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("a.txt", b"a");

    for _ in 0..3 {
        paste(&fixture, &src);
    }

    assert!(fixture.dst_path("a.txt").exists());
    assert!(fixture.dst_path("a(1).txt").exists());
    assert!(fixture.dst_path("a(2).txt").exists());
}

#[rstest]
#[case::dotfile(".bashrc", ".bashrc(1)")]
#[case::multi_extension("logs.tar.gz", "logs.tar(1).gz")]
#[case::no_extension("Makefile", "Makefile(1)")]
#[case::trailing_dot("notes.", "notes(1).")]
fn test_collision_names(#[case] name: &str, #[case] expected: &str) {
    let fixture = TestFixture::new();
    let src = fixture.src_file(name, b"new");
    fs::write(fixture.dst_path(name), "old").unwrap();

    paste(&fixture, &src);
    fixture.assert_file_content(&fixture.dst_path(name), "old");
    fixture.assert_file_content(&fixture.dst_path(expected), "new");
}

#[test]
fn test_directory_collision() {
    let fixture = TestFixture::new();
    let tree = fixture.src_tree("photos", 1, 1);
    fs::create_dir(fixture.dst_path("photos")).unwrap();

    paste(&fixture, &tree);
    assert!(fixture.dst_path("photos(1)/file0.txt").exists());
    assert_eq!(fs::read_dir(fixture.dst_path("photos")).unwrap().count(), 0);
}

#[test]
fn test_paste_into_same_directory() {
    let fixture = TestFixture::new();
    let src = fixture.src_file("draft.md", b"# draft");

    cargo_bin_cmd!("fpane")
        .arg("-q")
        .arg("paste")
        .arg(&src)
        .arg(fixture.src.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.src.path().join("draft(1).md"), "# draft");
}
