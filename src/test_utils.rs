//! Test utilities for creating temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with the given content, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a file of exactly `size` bytes.
    pub fn add_sized_file(&self, path: &str, size: usize) -> PathBuf {
        self.add_file(path, &"x".repeat(size))
    }

    /// Add an (empty) directory, creating parents as needed.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// The `root/dir1/file1.txt` + `root/file2.js` layout used across the
    /// formatter tests, with 100 and 200 byte files.
    pub fn sample_project() -> Self {
        let tree = Self::new();
        tree.add_sized_file("root/dir1/file1.txt", 100);
        tree.add_sized_file("root/file2.js", 200);
        tree
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
