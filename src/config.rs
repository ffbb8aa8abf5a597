//! Scoring configuration
//!
//! Thresholds and weights are fixed constants. They are collected into an
//! explicit record that is passed to the analyzers and the aggregator
//! rather than stored as mutable analyzer state.

use serde::{Deserialize, Serialize};

/// Functions above this complexity count as high complexity
pub const COMPLEXITY_THRESHOLD: usize = 10;

/// Cut-offs used by the analyzers and the recommendation rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Per-function complexity above which a function is flagged
    pub complexity: usize,
    /// Style scores below this trigger a recommendation
    pub min_style: f64,
    /// Average complexity above this triggers a recommendation
    pub max_average_complexity: f64,
    /// Docstring coverage below this triggers a recommendation
    pub min_docstring_coverage: f64,
    /// Duplication ratios above this trigger a recommendation
    pub max_duplication_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            complexity: COMPLEXITY_THRESHOLD,
            min_style: 0.8,
            max_average_complexity: 7.0,
            min_docstring_coverage: 0.7,
            max_duplication_ratio: 0.2,
        }
    }
}

/// Weights of the four sub-scores; they sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub style: f64,
    pub complexity: f64,
    pub documentation: f64,
    pub duplication: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            style: 0.3,
            complexity: 0.3,
            documentation: 0.2,
            duplication: 0.2,
        }
    }
}

impl Weights {
    pub fn total(&self) -> f64 {
        self.style + self.complexity + self.documentation + self.duplication
    }
}

/// Everything the engine needs to score a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub thresholds: Thresholds,
    pub weights: Weights,
}
