//! DOCDIFF - Structural diff tool for XML and JSON documents.
//!
//! This library compares two same-format documents (both XML or both JSON)
//! and reports their differences, tolerating reordering where appropriate:
//! XML siblings are matched by tag name with multiset semantics, and JSON
//! arrays are compared order-insensitively through canonicalization.
//!
//! # Example
//!
//! ```no_run
//! use docdiff_rs::{
//!     compare_documents, compute_diff, format_report, parse_file, DiffReport, Document,
//!     OutputFormat, OutputOptions, XmlDiffConfig,
//! };
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse two documents
//! let doc1 = parse_file(Path::new("old.json"))?;
//! let doc2 = parse_file(Path::new("new.json"))?;
//!
//! // Compare them with the differ matching their format
//! let records = match (&doc1, &doc2) {
//!     (Document::Json(a), Document::Json(b)) => compute_diff(a, b),
//!     (Document::Xml(a), Document::Xml(b)) => {
//!         compare_documents(a, b, &XmlDiffConfig::default())
//!     }
//!     _ => return Err("format mismatch".into()),
//! };
//!
//! // Format the report
//! let report = DiffReport::new("old.json", "new.json", records);
//! let output = format_report(&report, &OutputFormat::Plain, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod element;
pub mod error;
pub mod filter;
pub mod output;
pub mod parser;
pub mod tree;
pub mod xmldiff;

// Re-export commonly used types for convenience
pub use diff::{canonicalize_array, compute_diff, DiffRecord, DiffReport};
pub use element::{Element, XmlNode};
pub use error::{DocdiffError, OutputError, ParseError};
pub use output::{format_report, OutputFormat, OutputOptions};
pub use parser::{parse_file, parse_json, parse_xml, Document};
pub use tree::Node;
pub use xmldiff::{compare_documents, XmlDiffConfig};
