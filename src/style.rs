//! Line-oriented style checks
//!
//! A fixed, simplified subset of PEP 8 evaluated on raw lines:
//!
//! 1. Code lines longer than 79 characters
//! 2. Trailing spaces or tabs on any non-empty line, blank or not
//! 3. Multiple statements joined with `;`
//!
//! The score is the fraction of passed checks.

use crate::utils::split_lines;

/// Longest allowed code line, in characters
pub const MAX_LINE_LENGTH: usize = 79;

/// Checks performed and violations found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleTally {
    pub checks: usize,
    pub violations: usize,
    /// Lines holding anything besides whitespace
    pub non_blank_lines: usize,
}

impl StyleTally {
    fn record(self, violated: bool) -> Self {
        Self {
            checks: self.checks + 1,
            violations: self.violations + usize::from(violated),
            ..self
        }
    }

    /// Fraction of passed checks in [0, 1]
    ///
    /// A text without a single non-blank line passes vacuously, even when
    /// whitespace-only lines were flagged for trailing whitespace.
    pub fn score(&self) -> f64 {
        if self.non_blank_lines == 0 || self.checks == 0 {
            return 1.0;
        }
        (1.0 - self.violations as f64 / self.checks as f64).max(0.0)
    }
}

/// Fold one line into the running tally
pub fn check_line(tally: StyleTally, line: &str) -> StyleTally {
    let mut tally = tally;

    // Only failing lines count toward the trailing whitespace and
    // semicolon rules
    if line.ends_with([' ', '\t']) {
        tally = tally.record(true);
    }

    let stripped = line.trim();
    if stripped.is_empty() {
        return tally;
    }
    tally.non_blank_lines += 1;

    if stripped.starts_with('#') {
        return tally;
    }

    tally = tally.record(line.chars().count() > MAX_LINE_LENGTH);
    if stripped.contains(';') {
        tally = tally.record(true);
    }

    tally
}

/// Tally all lines of a source text
pub fn tally<'a>(lines: impl IntoIterator<Item = &'a str>) -> StyleTally {
    lines.into_iter().fold(StyleTally::default(), check_line)
}

/// Style score of a source text in [0, 1]
pub fn style_score(source: &str) -> f64 {
    tally(split_lines(source)).score()
}
