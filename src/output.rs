//! Report formatting for comparison results.
//!
//! This module serializes an ordered record list into one of the output
//! formats (colored terminal, structured JSON, plain text report). It is
//! pure formatting: records are never mutated.
//!
//! # Examples
//!
//! ```
//! use docdiff_rs::{DiffRecord, DiffReport, format_report, OutputFormat, OutputOptions};
//!
//! let report = DiffReport::new(
//!     "a.json",
//!     "b.json",
//!     vec![DiffRecord::changed("age", "30".to_string(), "31".to_string())],
//! );
//! let output = format_report(&report, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("age"));
//! ```

use crate::diff::{DiffRecord, DiffReport};
use crate::error::OutputError;
use colored::*;

/// Separator line between plain-text report blocks.
const SEPARATOR: &str = "-------------------------------";

/// Marker shown in text formats for a side where the node was not found.
/// Display only; the JSON format encodes absence by omitting the field.
const NOT_FOUND: &str = "(not found)";

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// Structured JSON report
    Json,
    /// Plain text report blocks (suitable for writing to a file)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Maximum length for values in terminal output (truncate if longer)
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            max_value_length: 80,
        }
    }
}

/// Formats a report according to the specified format and options.
pub fn format_report(
    report: &DiffReport,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_terminal(report, options)),
        OutputFormat::Json => format_json(report),
        OutputFormat::Plain => Ok(format_plain(report)),
    }
}

/// Formats a report for terminal output with colors.
///
/// Color scheme:
/// - Only in file2: green (`+`)
/// - Only in file1: red (`-`)
/// - Present in both with different values: yellow (`•`)
fn format_terminal(report: &DiffReport, options: &OutputOptions) -> String {
    if report.is_empty() {
        return "No differences found.".dimmed().to_string();
    }

    let mut output = String::new();
    for record in &report.differences {
        output.push_str(&format_record_terminal(record, options));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&report.differences));
    output
}

/// Formats a single record for terminal output.
fn format_record_terminal(record: &DiffRecord, options: &OutputOptions) -> String {
    let path = display_path(&record.path);

    match (&record.file1_value, &record.file2_value) {
        (Some(old), Some(new)) => {
            let old = truncate(old, options.max_value_length);
            let new = truncate(new, options.max_value_length);
            format!(
                "{} {}: {} {} {}",
                "•".bright_yellow(),
                path.yellow(),
                old.yellow(),
                "→".bright_yellow(),
                new.yellow()
            )
        }
        (Some(old), None) => {
            let old = truncate(old, options.max_value_length);
            format!("{} {}: {}", "-".bright_red(), path.red(), old.red())
        }
        (None, Some(new)) => {
            let new = truncate(new, options.max_value_length);
            format!("{} {}: {}", "+".bright_green(), path.green(), new.green())
        }
        (None, None) => {
            // Records are constructed with at least one side present
            format!("  {}", path.dimmed())
        }
    }
}

/// Formats a report as structured JSON.
///
/// The report shape is `{file1, file2, differences}`; an absent side is an
/// omitted field on the record, never a sentinel string.
fn format_json(report: &DiffReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

/// Formats a report as plain text blocks.
///
/// One block per record: the path, both values, then a separator line.
/// No differences produce an empty report.
fn format_plain(report: &DiffReport) -> String {
    let mut output = String::new();
    for record in &report.differences {
        output.push_str(display_path(&record.path));
        output.push('\n');
        output.push_str("file1: ");
        output.push_str(record.file1_value.as_deref().unwrap_or(NOT_FOUND));
        output.push('\n');
        output.push_str("file2: ");
        output.push_str(record.file2_value.as_deref().unwrap_or(NOT_FOUND));
        output.push('\n');
        output.push_str(SEPARATOR);
        output.push('\n');
    }
    output
}

/// Shows the document root as "(root)" instead of an empty path.
fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

/// Truncates a value for display, appending an ellipsis.
fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Formats the terminal summary line.
fn format_summary(records: &[DiffRecord]) -> String {
    let only_file1 = records.iter().filter(|r| r.file2_value.is_none()).count();
    let only_file2 = records.iter().filter(|r| r.file1_value.is_none()).count();
    let changed = records.len() - only_file1 - only_file2;

    let mut parts = Vec::new();
    if only_file1 > 0 {
        parts.push(format!("{} only in file1", only_file1));
    }
    if only_file2 > 0 {
        parts.push(format!("{} only in file2", only_file2));
    }
    if changed > 0 {
        parts.push(format!("{} changed", changed));
    }

    format!("Summary: {}", parts.join(", "))
}
