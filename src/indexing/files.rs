//! Python file discovery
//!
//! Recursively collects `.py` files below a directory, skipping hidden
//! entries and conventional tooling directories.

use std::fs;
use std::path::{Path, PathBuf};

/// Extension of analyzable source files
pub const PYTHON_EXTENSION: &str = "py";

/// Directories that never contain project sources
pub const IGNORED_DIRS: &[&str] = &["__pycache__", "venv", "env"];

/// Collect all Python files below `dir`, sorted by path.
pub fn collect_python_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_files_recursive(dir, &mut files);
    files.sort();
    files
}

/// Recursively collect Python files into `files`.
///
/// Unreadable directories are skipped silently.
pub fn collect_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if should_skip_path(&path) {
            continue;
        }

        if path.is_dir() {
            collect_files_recursive(&path, files);
        } else if path.is_file() && is_python_file(&path) {
            files.push(path);
        }
    }
}

/// Check if a path has the Python source extension.
pub fn is_python_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(PYTHON_EXTENSION)
}

/// Check if a path should be skipped during file collection.
///
/// Skips:
/// - Hidden files/directories (starting with '.')
/// - Tooling directories: `__pycache__`, `venv`, `env`
pub fn should_skip_path(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        name.starts_with('.') || (path.is_dir() && IGNORED_DIRS.contains(&name))
    } else {
        false
    }
}
