//! DOCDIFF command-line interface.
//!
//! This is the main entry point for the docdiff CLI tool. It uses clap for
//! argument parsing and wires together the library modules: load both
//! documents, run the differ matching their format, filter, format, and
//! write the report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use docdiff_rs::{
    compare_documents, compute_diff, format_report,
    filter::{filter_records, FilterConfig},
    parse_file, DiffReport, DocdiffError, Document, OutputFormat, OutputOptions, XmlDiffConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// DOCDIFF - Structural diff tool for XML and JSON documents
///
/// Compares two documents of the same format, tolerating reordering:
/// XML siblings match by tag name, JSON arrays compare order-insensitively.
#[derive(Parser)]
#[command(name = "docdiff")]
#[command(version)]
#[command(about = "Structural diff tool for XML and JSON documents", long_about = None)]
#[command(author = "DOCDIFF Contributors")]
struct Cli {
    /// First file to compare
    #[arg(value_name = "FILE1")]
    file1: PathBuf,

    /// Second file to compare
    #[arg(value_name = "FILE2")]
    file2: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// XML only: report just the elements missing from FILE2 (legacy
    /// one-sided report)
    #[arg(long)]
    asymmetric: bool,

    /// Ignore differences at paths matching this pattern (repeatable)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Keep only differences at paths matching this pattern (repeatable)
    #[arg(long, value_name = "PATTERN")]
    only: Vec<String>,

    /// Maximum length for displayed values
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// Verbose output (show progress)
    #[arg(short, long)]
    verbose: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// Structured JSON report
    Json,
    /// Plain text report blocks
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        // The report was written; differences do not fail the process
        Ok(()) => process::exit(0),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        eprintln!("Parsing {}...", cli.file1.display());
    }

    let doc1 = parse_file(&cli.file1)
        .with_context(|| format!("Failed to parse first file: {}", cli.file1.display()))?;

    if cli.verbose {
        eprintln!("Parsing {}...", cli.file2.display());
    }

    let doc2 = parse_file(&cli.file2)
        .with_context(|| format!("Failed to parse second file: {}", cli.file2.display()))?;

    if cli.verbose {
        eprintln!("Comparing documents...");
    }

    let records = match (&doc1, &doc2) {
        (Document::Json(a), Document::Json(b)) => compute_diff(a, b),
        (Document::Xml(a), Document::Xml(b)) => {
            let config = XmlDiffConfig {
                asymmetric: cli.asymmetric,
            };
            compare_documents(a, b, &config)
        }
        _ => {
            return Err(DocdiffError::FormatMismatch {
                file1: cli.file1.display().to_string(),
                format1: doc1.format_name().to_string(),
                file2: cli.file2.display().to_string(),
                format2: doc2.format_name().to_string(),
            }
            .into())
        }
    };

    let mut filter_config = FilterConfig::new();
    for pattern in &cli.ignore {
        filter_config = filter_config.ignore(pattern);
    }
    for pattern in &cli.only {
        filter_config = filter_config.only(pattern);
    }
    let records = filter_records(&records, &filter_config);

    let report = DiffReport::new(file_label(&cli.file1), file_label(&cli.file2), records);

    if cli.verbose {
        eprintln!("Formatting report...");
    }

    let output_options = OutputOptions {
        max_value_length: cli.max_value_length,
    };
    let output_format: OutputFormat = cli.format.into();
    let output = format_report(&report, &output_format, &output_options)
        .context("Failed to format report")?;

    match &cli.output {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => println!("{}", output),
    }

    Ok(())
}

/// The file name the report identifies a document by.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
