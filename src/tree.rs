//! Value tree representation for JSON documents.

use std::collections::HashMap;

/// A node representing a value in a parsed JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(HashMap<String, Node>),
    Array(Vec<Node>),
}

impl Node {
    pub fn type_name(&self) -> &str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }

    /// Renders this node as canonical compact JSON.
    ///
    /// Object keys are emitted in sorted order and integral numbers are
    /// written without a fractional part, so two deeply equal nodes always
    /// produce identical text. This is the form used for array
    /// canonicalization and for non-string values in diff records.
    pub fn canonical(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Renders this node for a diff record.
    ///
    /// Strings render as their raw text (no quoting); every other kind
    /// renders as canonical JSON.
    pub fn render(&self) -> String {
        match self {
            Node::String(s) => s.clone(),
            other => other.canonical(),
        }
    }

    /// Converts this node to a `serde_json::Value`.
    ///
    /// serde_json's default map is ordered by key, which gives the sorted-key
    /// canonical form without a separate sorting pass.
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        match self {
            Node::Null => json!(null),
            Node::Bool(b) => json!(b),
            Node::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                    json!(*n as i64)
                } else {
                    json!(n)
                }
            }
            Node::String(s) => json!(s),
            Node::Array(arr) => {
                let values: Vec<serde_json::Value> =
                    arr.iter().map(Node::to_json_value).collect();
                json!(values)
            }
            Node::Object(map) => {
                let obj: serde_json::Map<String, serde_json::Value> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect();
                json!(obj)
            }
        }
    }
}
