//! Unordered structural diff for XML documents.
//!
//! Sibling elements are matched by tag name with multiset semantics: each
//! element in the first document claims the first not-yet-consumed sibling
//! of the same name in the second, in document order, regardless of content.
//! Matched pairs are compared recursively; unmatched elements are reported
//! as serialized fragments. Consumption is tracked in an index set scoped to
//! the sibling list being scanned, so the documents themselves are never
//! mutated and marks cannot leak between unrelated scopes.

use crate::diff::{join_path, DiffRecord};
use crate::element::Element;
use std::collections::HashSet;

/// Configuration for the XML diff.
#[derive(Debug, Clone)]
pub struct XmlDiffConfig {
    /// Report only elements missing from the second document, as the legacy
    /// one-sided report did. The default is a symmetric report.
    pub asymmetric: bool,
}

impl Default for XmlDiffConfig {
    fn default() -> Self {
        Self { asymmetric: false }
    }
}

/// Compares two XML documents by their root elements.
///
/// # Examples
///
/// ```
/// use docdiff_rs::parser::parse_xml;
/// use docdiff_rs::xmldiff::{compare_documents, XmlDiffConfig};
///
/// let a = parse_xml("<r><x>1</x><x>2</x></r>").unwrap();
/// let b = parse_xml("<r><x>2</x><x>1</x></r>").unwrap();
/// let records = compare_documents(&a, &b, &XmlDiffConfig::default());
/// assert!(records.is_empty());
/// ```
pub fn compare_documents(
    a: &Element,
    b: &Element,
    config: &XmlDiffConfig,
) -> Vec<DiffRecord> {
    let mut records = Vec::new();
    compare_elements("", &[a], &[b], config, &mut records);
    records
}

/// Compares two sibling element lists.
///
/// The consumed set is created fresh for each scope; it tracks indices into
/// `b_elems` only while this list is being scanned.
fn compare_elements(
    path: &str,
    a_elems: &[&Element],
    b_elems: &[&Element],
    config: &XmlDiffConfig,
    records: &mut Vec<DiffRecord>,
) {
    let mut consumed: HashSet<usize> = HashSet::new();

    for a_el in a_elems {
        let matched = b_elems
            .iter()
            .enumerate()
            .find(|&(j, b_el)| !consumed.contains(&j) && b_el.name == a_el.name);

        match matched {
            Some((j, b_el)) => {
                let child_path = join_path(path, &a_el.name);
                let a_children: Vec<&Element> = a_el.child_elements().collect();
                let b_children: Vec<&Element> = b_el.child_elements().collect();
                compare_elements(&child_path, &a_children, &b_children, config, records);
                consumed.insert(j);
            }
            None => {
                records.push(DiffRecord::only_in_file1(
                    join_path(path, &a_el.name),
                    a_el.to_fragment(),
                ));
            }
        }
    }

    if !config.asymmetric {
        for (j, b_el) in b_elems.iter().enumerate() {
            if !consumed.contains(&j) {
                records.push(DiffRecord::only_in_file2(
                    join_path(path, &b_el.name),
                    b_el.to_fragment(),
                ));
            }
        }
    }
}
