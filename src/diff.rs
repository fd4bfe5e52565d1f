//! Core structural diff for JSON documents.
//!
//! This module implements the recursive comparison of two value trees,
//! producing a flat list of difference records. Objects are compared over
//! the union of their keys; arrays are compared order-insensitively through
//! canonicalization and reported as a set difference.
//!
//! # Examples
//!
//! ```
//! use docdiff_rs::{compute_diff, parser::parse_json};
//!
//! let a = parse_json(r#"{"x": 1}"#).unwrap();
//! let b = parse_json(r#"{}"#).unwrap();
//! let records = compute_diff(&a, &b);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].path, "x");
//! assert!(records[0].file2_value.is_none());
//! ```

use crate::tree::Node;
use serde::Serialize;
use std::collections::BTreeSet;

/// One reported discrepancy between the two documents.
///
/// A side that is `None` was not found in that document. Absence is encoded
/// structurally, both here and in the serialized report, so a field whose
/// value happens to be the text "Not Found" can never be mistaken for a
/// missing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRecord {
    /// Dotted path from the document root to the difference.
    pub path: String,
    /// Rendered value in the first document, if present there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file1_value: Option<String>,
    /// Rendered value in the second document, if present there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file2_value: Option<String>,
}

impl DiffRecord {
    pub fn changed(path: impl Into<String>, file1_value: String, file2_value: String) -> Self {
        Self {
            path: path.into(),
            file1_value: Some(file1_value),
            file2_value: Some(file2_value),
        }
    }

    pub fn only_in_file1(path: impl Into<String>, value: String) -> Self {
        Self {
            path: path.into(),
            file1_value: Some(value),
            file2_value: None,
        }
    }

    pub fn only_in_file2(path: impl Into<String>, value: String) -> Self {
        Self {
            path: path.into(),
            file1_value: None,
            file2_value: Some(value),
        }
    }
}

/// The complete comparison result for a pair of documents.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub file1: String,
    pub file2: String,
    pub differences: Vec<DiffRecord>,
}

impl DiffReport {
    pub fn new(
        file1: impl Into<String>,
        file2: impl Into<String>,
        differences: Vec<DiffRecord>,
    ) -> Self {
        Self {
            file1: file1.into(),
            file2: file2.into(),
            differences,
        }
    }

    /// Returns true if the documents compared equal.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }
}

/// Computes the structural diff between two JSON value trees.
///
/// # Examples
///
/// ```
/// use docdiff_rs::{compute_diff, parser::parse_json};
///
/// let a = parse_json("42").unwrap();
/// let b = parse_json("43").unwrap();
/// let records = compute_diff(&a, &b);
/// assert_eq!(records.len(), 1);
/// ```
pub fn compute_diff(a: &Node, b: &Node) -> Vec<DiffRecord> {
    let mut records = Vec::new();
    diff_nodes("", Some(a), Some(b), &mut records);
    records
}

/// Recursively compares two optional nodes and collects records.
///
/// Rules, in priority order: presence, arrays, objects, then deep equality
/// of whatever remains (scalars or mismatched kinds).
fn diff_nodes(path: &str, a: Option<&Node>, b: Option<&Node>, records: &mut Vec<DiffRecord>) {
    let (a, b) = match (a, b) {
        (None, None) => return,
        (Some(a), None) => {
            records.push(DiffRecord::only_in_file1(path, a.render()));
            return;
        }
        (None, Some(b)) => {
            records.push(DiffRecord::only_in_file2(path, b.render()));
            return;
        }
        (Some(a), Some(b)) => (a, b),
    };

    match (a, b) {
        (Node::Array(a_items), Node::Array(b_items)) => {
            diff_arrays(path, a_items, b_items, records);
        }
        (Node::Object(a_map), Node::Object(b_map)) => {
            let keys: BTreeSet<&String> = a_map.keys().chain(b_map.keys()).collect();
            for key in keys {
                let child_path = join_path(path, key);
                diff_nodes(
                    &child_path,
                    a_map.get(key.as_str()),
                    b_map.get(key.as_str()),
                    records,
                );
            }
        }
        _ => {
            if a != b {
                records.push(DiffRecord::changed(path, a.render(), b.render()));
            }
        }
    }
}

/// Compares two arrays through their canonical forms.
///
/// Equal canonical forms produce nothing. Unequal forms produce a
/// set-difference report: each canonical element of one side with no equal
/// element anywhere on the other side gets its own record at the array's
/// path. An element present on both sides is never flagged even when its
/// count differs, so duplicate-count mismatches go unreported.
fn diff_arrays(path: &str, a_items: &[Node], b_items: &[Node], records: &mut Vec<DiffRecord>) {
    let a_canon = canonicalize_array(a_items);
    let b_canon = canonicalize_array(b_items);
    if a_canon == b_canon {
        return;
    }

    for item in &a_canon {
        if !b_canon.contains(item) {
            records.push(DiffRecord::only_in_file1(path, item.render()));
        }
    }
    for item in &b_canon {
        if !a_canon.contains(item) {
            records.push(DiffRecord::only_in_file2(path, item.render()));
        }
    }
}

/// Canonicalizes an array for order-insensitive comparison.
///
/// Every element is canonicalized recursively, then the list is sorted by
/// canonical textual rendering. The ordering is purely lexicographic on the
/// serialized form; it is deterministic, not numeric.
pub fn canonicalize_array(items: &[Node]) -> Vec<Node> {
    let mut out: Vec<Node> = items.iter().map(canonicalize).collect();
    out.sort_by_key(Node::canonical);
    out
}

fn canonicalize(node: &Node) -> Node {
    match node {
        Node::Array(items) => Node::Array(canonicalize_array(items)),
        Node::Object(map) => Node::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), canonicalize(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Joins a path segment onto a dotted path; the root path is empty.
pub(crate) fn join_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}
