//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Python code quality assessment
#[derive(Parser, Debug)]
#[command(name = "codequal")]
#[command(
    about = "Scores Python code quality: PEP 8 style, cyclomatic complexity, docstring coverage and duplication"
)]
#[command(version)]
pub struct Cli {
    /// Path to a Python file or a directory to analyze
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, default_value = "text", value_enum, env = "CODEQUAL_FORMAT")]
    pub format: OutputFormat,

    /// Log analysis progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "codequal=debug"
        } else {
            "codequal=warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["codequal", "src"]).unwrap();
        assert_eq!(cli.target, PathBuf::from("src"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.log_filter(), "codequal=warn");
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "codequal", "app.py", "-o", "report.json", "--format", "json", "-v",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output, Some(PathBuf::from("report.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["codequal", "app.py", "-f", "xml"]).is_err());
    }
}
