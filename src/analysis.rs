//! Analysis orchestration
//!
//! Runs the four analyzers over one parsed file and assembles the result
//! record, or analyzes every Python file below a directory and averages the
//! scores of the files that could be analyzed.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::complexity::{self, ComplexityReport};
use crate::config::AnalyzerConfig;
use crate::docstrings::{self, DocstringReport};
use crate::duplication::{self, DuplicationReport};
use crate::error::{QualityError, Result};
use crate::indexing::collect_python_files;
use crate::scoring::{self, round2, MetricInputs};
use crate::style;
use crate::syntax::SourceUnit;

/// Quality metrics for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_path: String,
    /// Style compliance in [0, 1]
    pub pep8_score: f64,
    pub complexity: ComplexityReport,
    pub docstring_coverage: DocstringReport,
    pub duplication: DuplicationReport,
    pub line_count: usize,
    pub function_count: usize,
    pub class_count: usize,
    /// Weighted score in [0, 100]
    pub overall_score: f64,
    pub recommendations: Vec<String>,
}

/// Aggregated metrics for a directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub directory: String,
    pub files_analyzed: usize,
    /// Mean of the per-file scores, rounded to two decimals
    pub average_score: f64,
    /// Per-file results in discovery order
    pub file_results: Vec<AnalysisResult>,
}

/// Analyzes files with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyze one Python file
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisResult> {
        if !path.exists() {
            return Err(QualityError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = fs::read(path).map_err(|e| QualityError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let source = String::from_utf8(bytes).map_err(|e| QualityError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!("Read {} bytes from {}", source.len(), path.display());

        self.analyze_source(&path.display().to_string(), source)
    }

    /// Analyze in-memory Python source labelled with `file_path`
    pub fn analyze_source(&self, file_path: &str, source: String) -> Result<AnalysisResult> {
        let unit = SourceUnit::parse(source).map_err(|e| QualityError::SyntaxError {
            message: e.message,
        })?;

        Ok(self.analyze_unit(file_path, &unit))
    }

    /// Run every analyzer over a parsed unit
    pub fn analyze_unit(&self, file_path: &str, unit: &SourceUnit) -> AnalysisResult {
        let pep8_score = style::tally(unit.lines()).score();
        let complexity = complexity::analyze(unit, &self.config.thresholds);
        let docstring_coverage = docstrings::check(unit);
        let duplication = duplication::detect(unit.text());

        let metrics = MetricInputs {
            style: pep8_score,
            complexity: &complexity,
            docstrings: &docstring_coverage,
            duplication: &duplication,
        };
        let (overall_score, recommendations) = scoring::aggregate(&metrics, &self.config);

        debug!(
            "Analyzed {}: score={}, functions={}, classes={}",
            file_path,
            overall_score,
            docstring_coverage.functions_total,
            docstring_coverage.classes_total
        );

        AnalysisResult {
            file_path: file_path.to_string(),
            pep8_score,
            line_count: unit.line_count(),
            function_count: docstring_coverage.functions_total,
            class_count: docstring_coverage.classes_total,
            complexity,
            docstring_coverage,
            duplication,
            overall_score,
            recommendations,
        }
    }

    /// Analyze every Python file below a directory
    ///
    /// Files that cannot be read or parsed are left out of the batch.
    pub fn analyze_directory(&self, dir: &Path) -> Result<BatchResult> {
        if !dir.is_dir() {
            return Err(QualityError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let files = collect_python_files(dir);
        if files.is_empty() {
            return Err(QualityError::NoFilesFound {
                path: dir.display().to_string(),
            });
        }

        debug!("Discovered {} Python files in {}", files.len(), dir.display());

        let file_results: Vec<AnalysisResult> = files
            .par_iter()
            .filter_map(|file| match self.analyze_file(file) {
                Ok(result) => Some(result),
                Err(e) => {
                    debug!("Skipping {}: {}", file.display(), e);
                    None
                }
            })
            .collect();

        if file_results.is_empty() {
            return Err(QualityError::NoValidFiles {
                path: dir.display().to_string(),
            });
        }

        let total: f64 = file_results.iter().map(|r| r.overall_score).sum();
        let average_score = round2(total / file_results.len() as f64);

        info!(
            "Analyzed {}/{} files in {} (average score {})",
            file_results.len(),
            files.len(),
            dir.display(),
            average_score
        );

        Ok(BatchResult {
            directory: dir.display().to_string(),
            files_analyzed: file_results.len(),
            average_score,
            file_results,
        })
    }
}

/// Analyze one file with the default configuration
pub fn analyze_file(path: &Path) -> Result<AnalysisResult> {
    Analyzer::default().analyze_file(path)
}

/// Analyze a directory with the default configuration
pub fn analyze_directory(dir: &Path) -> Result<BatchResult> {
    Analyzer::default().analyze_directory(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> AnalysisResult {
        Analyzer::default()
            .analyze_source("sample.py", source.to_string())
            .expect("source should analyze")
    }

    #[test]
    fn test_counts_come_from_tree() {
        let result = analyze(
            "\"\"\"Doc.\"\"\"\n\ndef hello(name):\n    \"\"\"Say hello.\"\"\"\n    return name\n\nclass Greeter:\n    \"\"\"A greeter.\"\"\"\n\n    def method(self):\n        \"\"\"A method.\"\"\"\n        return 'test'\n",
        );
        assert_eq!(result.function_count, 2);
        assert_eq!(result.class_count, 1);
        assert_eq!(result.line_count, 12);
        assert_eq!(result.docstring_coverage.coverage, 1.0);
        assert!(result.docstring_coverage.module_has_docstring);
        // every function has complexity 1, costing 5 points of the complexity share
        assert_eq!(result.overall_score, 98.5);
        assert_eq!(
            result.recommendations,
            vec![scoring::GOOD_QUALITY_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_empty_source_scores_perfectly() {
        let result = analyze("");
        assert_eq!(result.pep8_score, 1.0);
        assert_eq!(result.complexity.average, 0.0);
        assert_eq!(result.docstring_coverage.coverage, 1.0);
        assert_eq!(result.duplication.duplication_ratio, 0.0);
        assert_eq!(result.overall_score, 100.0);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = Analyzer::default()
            .analyze_source("bad.py", "def f(:".to_string())
            .unwrap_err();
        match err {
            QualityError::SyntaxError { message } => assert!(message.contains("line 1")),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_score_is_bounded() {
        let result = analyze(
            "def f(a, b):\n    if a and b: x = 1; y = 2      \n    return a\n",
        );
        assert!((0.0..=100.0).contains(&result.overall_score));
        assert!(result.pep8_score < 1.0);
    }

    #[test]
    fn test_python2_print_is_a_syntax_error() {
        let err = Analyzer::default()
            .analyze_source("legacy.py", "print \"hi\"\n".to_string())
            .unwrap_err();
        assert!(matches!(err, QualityError::SyntaxError { .. }));
    }

    #[test]
    fn test_indented_blank_line_costs_style() {
        let result = analyze("def f():\n    x = 1\n    \n    return x\n");
        assert_eq!(result.pep8_score, 0.75);
    }
}
