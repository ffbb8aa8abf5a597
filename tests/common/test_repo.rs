//! Temporary source trees for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with source files
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a text file, creating parent directories
    pub fn add_file(&self, relative: &str, content: &str) -> PathBuf {
        self.add_bytes(relative, content.as_bytes())
    }

    /// Write raw bytes, creating parent directories
    pub fn add_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, content).expect("failed to write file");
        path
    }

    pub fn add_dir(&self, relative: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path).expect("failed to create dir");
        path
    }
}
