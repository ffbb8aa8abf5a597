//! Source file discovery for directory analysis
//!
//! Directory analysis works on a deterministic, sorted list of files so
//! that batch results and averages are reproducible regardless of the
//! order the filesystem returns entries in.
//!
//! # Example
//!
//! ```ignore
//! use codequal::indexing::collect_python_files;
//!
//! let files = collect_python_files(Path::new("src"));
//! println!("Found {} Python files", files.len());
//! ```

mod files;

pub use files::{
    collect_files_recursive, collect_python_files, is_python_file, should_skip_path,
    IGNORED_DIRS, PYTHON_EXTENSION,
};
