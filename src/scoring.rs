//! Overall score and recommendations
//!
//! The four metric outputs are mapped to 0-100 sub-scores and combined with
//! fixed weights:
//!
//! | metric        | weight | sub-score                                  |
//! |---------------|--------|--------------------------------------------|
//! | style         | 0.30   | `style × 100`                              |
//! | complexity    | 0.30   | `100` if no functions, else `100 − avg × 5` |
//! | documentation | 0.20   | `coverage × 100`                           |
//! | duplication   | 0.20   | `100 − ratio × 100`                        |
//!
//! Inverted sub-scores are floored at 0, so the weighted sum stays within
//! 0-100.

use crate::complexity::ComplexityReport;
use crate::config::{AnalyzerConfig, Thresholds, Weights};
use crate::docstrings::DocstringReport;
use crate::duplication::DuplicationReport;
use crate::error::Result;

/// Emitted when no recommendation rule fires
pub const GOOD_QUALITY_MESSAGE: &str = "Code quality is good! Keep up the good work.";

/// The four metric outputs of one file
#[derive(Debug, Clone, Copy)]
pub struct MetricInputs<'a> {
    pub style: f64,
    pub complexity: &'a ComplexityReport,
    pub docstrings: &'a DocstringReport,
    pub duplication: &'a DuplicationReport,
}

/// Sub-scores on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub style: f64,
    pub complexity: f64,
    pub documentation: f64,
    pub duplication: f64,
}

impl SubScores {
    pub fn from_metrics(metrics: &MetricInputs<'_>) -> Self {
        let average = metrics.complexity.average;
        let complexity = if average == 0.0 {
            100.0
        } else {
            (100.0 - average * 5.0).max(0.0)
        };

        Self {
            style: metrics.style * 100.0,
            complexity,
            documentation: metrics.docstrings.coverage * 100.0,
            duplication: (100.0 - metrics.duplication.duplication_ratio * 100.0).max(0.0),
        }
    }

    pub fn weighted(&self, weights: &Weights) -> f64 {
        self.style * weights.style
            + self.complexity * weights.complexity
            + self.documentation * weights.documentation
            + self.duplication * weights.duplication
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted overall score in [0, 100], rounded to two decimals
pub fn overall_score(metrics: &MetricInputs<'_>, weights: &Weights) -> f64 {
    round2(SubScores::from_metrics(metrics).weighted(weights))
}

/// Score of an analysis outcome; failed analyses score 0
pub fn outcome_score<T>(outcome: &Result<T>, score: impl Fn(&T) -> f64) -> f64 {
    match outcome {
        Ok(value) => score(value),
        Err(_) => 0.0,
    }
}

/// Recommendations for one file, in rule order
pub fn recommendations(metrics: &MetricInputs<'_>, thresholds: &Thresholds) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.style < thresholds.min_style {
        recommendations
            .push("Improve PEP 8 compliance: check line lengths and formatting".to_string());
    }

    if metrics.complexity.average > thresholds.max_average_complexity {
        recommendations.push(format!(
            "Reduce cyclomatic complexity (average: {:.1})",
            metrics.complexity.average
        ));
    }

    if metrics.complexity.high_complexity_count > 0 {
        recommendations.push(format!(
            "Refactor {} function(s) with high complexity",
            metrics.complexity.high_complexity_count
        ));
    }

    if metrics.docstrings.coverage < thresholds.min_docstring_coverage {
        recommendations.push(format!(
            "Add docstrings to functions and classes (current coverage: {:.1}%)",
            metrics.docstrings.coverage * 100.0
        ));
    }

    if metrics.duplication.duplication_ratio > thresholds.max_duplication_ratio {
        recommendations.push(format!(
            "Reduce code duplication (current ratio: {:.1}%)",
            metrics.duplication.duplication_ratio * 100.0
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(GOOD_QUALITY_MESSAGE.to_string());
    }

    recommendations
}

/// Score and recommendations together
pub fn aggregate(metrics: &MetricInputs<'_>, config: &AnalyzerConfig) -> (f64, Vec<String>) {
    (
        overall_score(metrics, &config.weights),
        recommendations(metrics, &config.thresholds),
    )
}
