//! codequal: explainable quality scoring for Python source
//!
//! This library scores a Python file, or every Python file below a
//! directory, with four independent metrics computed from the syntax tree
//! and the raw text. It uses tree-sitter for parsing.
//!
//! # Metrics
//!
//! - Style: a fixed subset of line-oriented PEP 8 rules
//! - Cyclomatic complexity per function
//! - Docstring coverage of functions and classes
//! - Duplicate three-line blocks within a file
//!
//! The metrics are combined into a weighted 0-100 score with textual
//! recommendations.
//!
//! # Example
//!
//! ```ignore
//! use codequal::analyze_file;
//! use std::path::Path;
//!
//! let result = analyze_file(Path::new("app.py"))?;
//! println!("{}: {}/100", result.file_path, result.overall_score);
//! for recommendation in &result.recommendations {
//!     println!("  - {}", recommendation);
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod docstrings;
pub mod duplication;
pub mod error;
pub mod indexing;
pub mod report;
pub mod scoring;
pub mod style;
pub mod syntax;
pub mod utils;

// Re-export commonly used types
pub use analysis::{analyze_directory, analyze_file, AnalysisResult, Analyzer, BatchResult};
pub use cli::{Cli, OutputFormat};
pub use complexity::ComplexityReport;
pub use config::{AnalyzerConfig, Thresholds, Weights};
pub use docstrings::DocstringReport;
pub use duplication::{DuplicateBlock, DuplicationReport};
pub use error::{QualityError, Result};
pub use report::{Report, Summary};
pub use syntax::{ParseError, SourceUnit};
