//! Near-duplicate block detection within one file
//!
//! Lines are trimmed and blank or comment lines dropped. A window of three
//! consecutive normalized lines slides over the result; windows with the
//! same text are grouped, and every group seen more than once is a
//! duplicate block.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::utils::split_lines;

/// Lines per window
pub const WINDOW_SIZE: usize = 3;

/// Normalized files shorter than this report no duplication
pub const MIN_LINES: usize = 4;

/// Blocks kept in the report; the ratio still counts every block
pub const MAX_REPORTED_BLOCKS: usize = 5;

/// A repeated window of normalized lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateBlock {
    /// The literal lines of the window
    pub sequence: Vec<String>,
    /// How many windows carry this text (overlaps included)
    pub occurrences: usize,
    /// 0-based window starts within the normalized lines
    pub positions: Vec<usize>,
}

impl DuplicateBlock {
    /// Lines counted as duplicated: all but the first occurrence
    pub fn duplicate_lines(&self) -> usize {
        self.sequence.len() * (self.occurrences - 1)
    }
}

/// Duplication metrics for one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicationReport {
    /// Duplicated lines over normalized lines, in [0, 1]
    pub duplication_ratio: f64,
    /// The first blocks found, in scan order
    pub duplicate_blocks: Vec<DuplicateBlock>,
}

/// Trim lines and drop blanks and comments
pub fn normalize_lines(source: &str) -> Vec<&str> {
    split_lines(source)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Group every window by its text, keeping first-seen order
fn group_windows<'a>(lines: &'a [&'a str]) -> IndexMap<&'a [&'a str], Vec<usize>> {
    let mut groups: IndexMap<&'a [&'a str], Vec<usize>> = IndexMap::new();
    for (position, window) in lines.windows(WINDOW_SIZE).enumerate() {
        groups.entry(window).or_default().push(position);
    }
    groups
}

/// Detect repeated windows in a source text
pub fn detect(source: &str) -> DuplicationReport {
    let lines = normalize_lines(source);
    if lines.len() < MIN_LINES {
        return DuplicationReport::default();
    }

    let blocks: Vec<DuplicateBlock> = group_windows(&lines)
        .into_iter()
        .filter(|(_, positions)| positions.len() > 1)
        .map(|(window, positions)| DuplicateBlock {
            sequence: window.iter().map(|line| line.to_string()).collect(),
            occurrences: positions.len(),
            positions,
        })
        .collect();

    let duplicate_lines: usize = blocks.iter().map(DuplicateBlock::duplicate_lines).sum();
    let duplication_ratio = (duplicate_lines as f64 / lines.len() as f64).min(1.0);

    DuplicationReport {
        duplication_ratio,
        duplicate_blocks: blocks.into_iter().take(MAX_REPORTED_BLOCKS).collect(),
    }
}
