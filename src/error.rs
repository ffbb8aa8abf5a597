//! Error types for the quality engine
//!
//! Every failure path of a file or directory analysis maps to one variant
//! here. Errors are terminal for the unit of work they describe; nothing is
//! retried internally.

use std::process::ExitCode;

use thiserror::Error;

/// Errors produced while analyzing files or rendering reports
#[derive(Debug, Error)]
pub enum QualityError {
    /// The file to analyze does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// The file exists but could not be read or decoded as UTF-8
    #[error("Error reading file {path}: {message}")]
    ReadError { path: String, message: String },

    /// The source text is not valid Python
    #[error("Syntax error: {message}")]
    SyntaxError { message: String },

    /// The directory to analyze does not exist or is not a directory
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// Directory analysis discovered no Python files
    #[error("No Python files found in directory: {path}")]
    NoFilesFound { path: String },

    /// Every discovered Python file failed analysis
    #[error("No valid Python files could be analyzed in: {path}")]
    NoValidFiles { path: String },

    /// Report rendering failed
    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    /// Writing a report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QualityError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } | Self::DirectoryNotFound { .. } => ExitCode::from(2),
            Self::ReadError { .. } | Self::Io(_) => ExitCode::from(3),
            Self::SyntaxError { .. } => ExitCode::from(4),
            Self::NoFilesFound { .. } | Self::NoValidFiles { .. } => ExitCode::from(5),
            Self::Serialization { .. } => ExitCode::from(1),
        }
    }
}

impl From<serde_json::Error> for QualityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type alias for the quality engine
pub type Result<T> = std::result::Result<T, QualityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = QualityError::FileNotFound {
            path: "missing.py".to_string(),
        };
        assert_eq!(err.to_string(), "File not found: missing.py");

        let err = QualityError::SyntaxError {
            message: "invalid syntax (line 1, column 7)".to_string(),
        };
        assert!(err.to_string().to_lowercase().contains("syntax"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_exit_codes_distinguish_categories() {
        let not_found = QualityError::FileNotFound { path: "a".into() };
        let syntax = QualityError::SyntaxError { message: "b".into() };
        assert_ne!(
            format!("{:?}", not_found.exit_code()),
            format!("{:?}", syntax.exit_code())
        );
    }
}
