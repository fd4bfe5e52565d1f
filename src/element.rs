//! Element tree representation for XML documents.
//!
//! An XML document is modeled as a tree of named elements with attributes
//! and mixed element/text children. There is no array/object distinction:
//! repeated sibling elements sharing a name play the role of arrays.

use quick_xml::escape::escape;
use std::fmt::{self, Write};

/// A child of an XML element: a nested element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

/// A single XML element with its attributes and children.
///
/// Attributes keep document order so that fragment rendering is
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Iterates over element children only; text runs are skipped.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated text content of this subtree, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Serializes this subtree as a single-line XML fragment.
    ///
    /// A formatting failure is recoverable: the fragment degrades to the
    /// subtree's raw text content instead of aborting the comparison.
    pub fn to_fragment(&self) -> String {
        let mut out = String::new();
        match self.write_fragment(&mut out) {
            Ok(()) => out,
            Err(_) => self.text_content(),
        }
    }

    /// Writes this subtree as an XML fragment, escaping text and attribute
    /// values.
    pub fn write_fragment(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(out, " {}=\"{}\"", key, escape(value.as_str()))?;
        }
        if self.children.is_empty() {
            return write!(out, "/>");
        }
        out.write_char('>')?;
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.write_str(&escape(t.as_str()))?,
                XmlNode::Element(e) => e.write_fragment(out)?,
            }
        }
        write!(out, "</{}>", self.name)
    }
}
