//! Common test utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture with a source directory to copy from and a destination
/// directory to paste into.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Write a file under the source directory and return its path.
    pub fn src_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.src.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create a nested tree under `src/<name>` and return its root.
    pub fn src_tree(&self, name: &str, depth: usize, files_per_level: usize) -> PathBuf {
        let root = self.src.path().join(name);
        let mut current = root.clone();
        fs::create_dir_all(&current).expect("Failed to create directory");
        for level in 0..depth {
            for i in 0..files_per_level {
                fs::write(
                    current.join(format!("file{i}.txt")),
                    format!("content at level {level}"),
                )
                .expect("Failed to write file");
            }
            current = current.join(format!("level{level}"));
            fs::create_dir_all(&current).expect("Failed to create directory");
        }
        root
    }

    pub fn dst_path(&self, name: &str) -> PathBuf {
        self.dst.path().join(name)
    }

    /// Count regular files below `dir`.
    pub fn count_files_recursive(&self, dir: &Path) -> usize {
        let mut count = 0;
        if dir.is_dir() {
            for entry in fs::read_dir(dir).expect("Failed to read directory") {
                let path = entry.expect("Failed to read entry").path();
                if path.is_dir() {
                    count += self.count_files_recursive(&path);
                } else {
                    count += 1;
                }
            }
        }
        count
    }

    /// Check that a file exists and has the expected content.
    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
