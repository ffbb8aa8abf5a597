//! Report rendering
//!
//! Renders analysis results as a human-readable text report or as JSON,
//! produces one-line summaries with letter grades, and saves reports to
//! disk.

use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, BatchResult};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::utils::truncate_with_ellipsis;

const RULE_WIDTH: usize = 80;

/// Longest function name or duplicate line shown in text reports
const MAX_PREVIEW_CHARS: usize = 60;

/// How many of the most complex functions a text report lists
const TOP_FUNCTIONS: usize = 5;

/// Anything the reporter can render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Report {
    File(AnalysisResult),
    Directory(BatchResult),
}

impl Report {
    /// Overall score of a file, or the average score of a directory
    pub fn score(&self) -> f64 {
        match self {
            Self::File(result) => result.overall_score,
            Self::Directory(batch) => batch.average_score,
        }
    }
}

impl From<AnalysisResult> for Report {
    fn from(result: AnalysisResult) -> Self {
        Self::File(result)
    }
}

impl From<BatchResult> for Report {
    fn from(batch: BatchResult) -> Self {
        Self::Directory(batch)
    }
}

/// Short summary of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    File {
        file: String,
        score: f64,
        grade: String,
        timestamp: String,
    },
    Directory {
        directory: String,
        files_analyzed: usize,
        average_score: f64,
        average_grade: String,
        timestamp: String,
    },
}

impl Summary {
    pub fn grade(&self) -> &str {
        match self {
            Self::File { grade, .. } => grade,
            Self::Directory { average_grade, .. } => average_grade,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Self::File { score, .. } => *score,
            Self::Directory { average_score, .. } => *average_score,
        }
    }
}

/// Convert a 0-100 score to a letter grade
pub fn score_to_grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "A (Excellent)"
    } else if score >= 80.0 {
        "B (Good)"
    } else if score >= 70.0 {
        "C (Satisfactory)"
    } else if score >= 60.0 {
        "D (Needs Improvement)"
    } else {
        "F (Poor)"
    }
}

// ============================================================================
// Text Report
// ============================================================================

/// Render a plain text report
pub fn generate_text_report(report: &Report) -> String {
    let mut output = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    output.push_str(&rule);
    output.push('\n');
    output.push_str("CODE QUALITY ASSESSMENT REPORT\n");
    output.push_str(&rule);
    output.push('\n');
    output.push_str(&format!(
        "Generated: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    match report {
        Report::File(result) => write_file_section(&mut output, result),
        Report::Directory(batch) => write_directory_section(&mut output, batch),
    }

    output.push('\n');
    output.push_str(&rule);
    output
}

fn write_file_section(output: &mut String, result: &AnalysisResult) {
    output.push_str(&format!("File: {}\n\n", result.file_path));
    output.push_str(&format!("Overall Score: {}/100\n\n", result.overall_score));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    output.push_str("METRICS:\n");
    output.push_str(&format!(
        "  PEP 8 Compliance: {:.1}%\n",
        result.pep8_score * 100.0
    ));
    output.push_str(&format!(
        "  Average Complexity: {:.2}\n",
        result.complexity.average
    ));
    output.push_str(&format!("  Max Complexity: {}\n", result.complexity.max));
    output.push_str(&format!(
        "  Docstring Coverage: {:.1}%\n",
        result.docstring_coverage.coverage * 100.0
    ));
    output.push_str(&format!(
        "  Code Duplication: {:.1}%\n",
        result.duplication.duplication_ratio * 100.0
    ));
    output.push_str(&format!("  Lines of Code: {}\n", result.line_count));
    output.push_str(&format!("  Functions: {}\n", result.function_count));
    output.push_str(&format!("  Classes: {}\n\n", result.class_count));

    if !result.complexity.functions.is_empty() {
        let mut ranked: Vec<(&String, &usize)> = result.complexity.functions.iter().collect();
        // Stable sort keeps definition order among equal scores
        ranked.sort_by(|a, b| b.1.cmp(a.1));

        output.push_str("FUNCTION COMPLEXITY:\n");
        for (name, complexity) in ranked.into_iter().take(TOP_FUNCTIONS) {
            output.push_str(&format!(
                "  {}: {}\n",
                truncate_with_ellipsis(name, MAX_PREVIEW_CHARS),
                complexity
            ));
        }
    }

    if !result.duplication.duplicate_blocks.is_empty() {
        output.push_str("\nDUPLICATE BLOCKS:\n");
        for block in &result.duplication.duplicate_blocks {
            let first_line = block.sequence.first().map(String::as_str).unwrap_or("");
            output.push_str(&format!(
                "  {}x at {:?}: {}\n",
                block.occurrences,
                block.positions,
                truncate_with_ellipsis(first_line, MAX_PREVIEW_CHARS)
            ));
        }
    }

    output.push_str("\nRECOMMENDATIONS:\n");
    for recommendation in &result.recommendations {
        output.push_str(&format!("  • {}\n", recommendation));
    }
}

fn write_directory_section(output: &mut String, batch: &BatchResult) {
    output.push_str(&format!("Directory: {}\n\n", batch.directory));
    output.push_str(&format!("Files Analyzed: {}\n", batch.files_analyzed));
    output.push_str(&format!("Average Score: {}/100\n\n", batch.average_score));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str("FILE RESULTS:\n\n");

    let mut ranked: Vec<&AnalysisResult> = batch.file_results.iter().collect();
    ranked.sort_by(|a, b| a.overall_score.total_cmp(&b.overall_score));

    for result in ranked {
        output.push_str(&format!(
            "  {}: {}/100\n",
            result.file_path, result.overall_score
        ));
    }
}

// ============================================================================
// JSON, Summary, Persistence
// ============================================================================

/// Render a pretty-printed JSON report
pub fn generate_json_report(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a report in the requested format
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(report)),
        OutputFormat::Json => generate_json_report(report),
    }
}

/// Summarize a report with its grade and the current time
pub fn generate_summary(report: &Report) -> Summary {
    let timestamp = Local::now().to_rfc3339();
    match report {
        Report::File(result) => Summary::File {
            file: result.file_path.clone(),
            score: result.overall_score,
            grade: score_to_grade(result.overall_score).to_string(),
            timestamp,
        },
        Report::Directory(batch) => Summary::Directory {
            directory: batch.directory.clone(),
            files_analyzed: batch.files_analyzed,
            average_score: batch.average_score,
            average_grade: score_to_grade(batch.average_score).to_string(),
            timestamp,
        },
    }
}

/// Render a report and write it to `output_path`
pub fn save_report(report: &Report, output_path: &Path, format: OutputFormat) -> Result<()> {
    let content = render(report, format)?;
    fs::write(output_path, content)?;
    Ok(())
}
