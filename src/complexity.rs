//! Cyclomatic complexity per function
//!
//! Each function starts at 1 and gains:
//! - +1 per `if`, `elif`, `while`, `for`, `try` and `with`
//! - +1 per `except` clause
//! - +(N-1) per boolean operator joining N operands
//!
//! Nested functions are scored as their own subtree and never folded into
//! the enclosing function.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Thresholds;
use crate::syntax::{walk_node, FunctionDef, SourceUnit, SyntaxNode, Visit};

/// Complexity metrics for one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityReport {
    /// Mean complexity over all functions, 0 when there are none
    pub average: f64,
    /// Highest function complexity, 0 when there are none
    pub max: usize,
    /// Complexity keyed by function name in first-definition order.
    /// A later function with the same name overwrites the earlier entry.
    pub functions: IndexMap<String, usize>,
    /// Functions whose complexity exceeds the threshold
    pub high_complexity_count: usize,
}

/// Counts decision points without descending into nested functions
#[derive(Default)]
struct DecisionCounter {
    points: usize,
}

impl<'ast> Visit<'ast> for DecisionCounter {
    fn visit_node(&mut self, node: &'ast SyntaxNode) {
        self.points += match node {
            SyntaxNode::Branch { .. } | SyntaxNode::ExceptHandler { .. } => 1,
            SyntaxNode::BoolOp { operands, .. } => operands.saturating_sub(1),
            SyntaxNode::Function(_) | SyntaxNode::Class(_) => 0,
        };
        walk_node(self, node);
    }

    fn visit_function(&mut self, _function: &'ast FunctionDef) {}
}

/// Cyclomatic complexity of a single function
pub fn function_complexity(function: &FunctionDef) -> usize {
    let mut counter = DecisionCounter::default();
    for node in &function.body {
        counter.visit_node(node);
    }
    1 + counter.points
}

/// Score every function of a source unit
pub fn analyze(unit: &SourceUnit, thresholds: &Thresholds) -> ComplexityReport {
    let definitions = unit.definitions();
    let scores: Vec<(&str, usize)> = definitions
        .functions
        .iter()
        .map(|function| {
            let score = function_complexity(function);
            if score > thresholds.complexity {
                debug!(
                    "{}def {} (line {}) has complexity {}",
                    if function.is_async { "async " } else { "" },
                    function.name,
                    function.line,
                    score
                );
            }
            (function.name.as_str(), score)
        })
        .collect();

    summarize(&scores, thresholds)
}

fn summarize(scores: &[(&str, usize)], thresholds: &Thresholds) -> ComplexityReport {
    if scores.is_empty() {
        return ComplexityReport::default();
    }

    let total: usize = scores.iter().map(|(_, score)| score).sum();
    let functions = scores
        .iter()
        .map(|(name, score)| (name.to_string(), *score))
        .collect();

    ComplexityReport {
        average: total as f64 / scores.len() as f64,
        max: scores.iter().map(|(_, score)| *score).max().unwrap_or(0),
        functions,
        high_complexity_count: scores
            .iter()
            .filter(|(_, score)| *score > thresholds.complexity)
            .count(),
    }
}
