//! Document loading for JSON and XML formats.
//!
//! This module parses document files into the in-memory trees the differs
//! walk. The format is detected by file extension, falling back to
//! attempting JSON then XML parsing if the extension is unknown.
//!
//! # Examples
//!
//! ```no_run
//! use docdiff_rs::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse a JSON document
//! let doc = parse_file(Path::new("data.json"))?;
//!
//! // Parse an XML document
//! let doc = parse_file(Path::new("data.xml"))?;
//! # Ok(())
//! # }
//! ```

use crate::element::{Element, XmlNode};
use crate::error::ParseError;
use crate::tree::Node;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A parsed document of either supported format.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Json(Node),
    Xml(Element),
}

impl Document {
    pub fn format_name(&self) -> &str {
        match self {
            Document::Json(_) => "json",
            Document::Xml(_) => "xml",
        }
    }
}

/// Parses a file into a [`Document`].
///
/// The format is detected by file extension (.json, .xml). If the extension
/// is unknown or missing, this function will attempt to parse as JSON first,
/// then XML.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist (`ParseError::FileNotFound`)
/// - The file cannot be read (`ParseError::ReadError`)
/// - The file contains invalid JSON (`ParseError::JsonError`)
/// - The file contains invalid XML (`ParseError::XmlError`)
/// - The file format cannot be determined (`ParseError::UnknownFormat`)
pub fn parse_file(path: &Path) -> Result<Document, ParseError> {
    if !path.exists() {
        return Err(ParseError::file_not_found(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ParseError::read_error(path.to_string_lossy().to_string(), e))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("json") => parse_json(&content)
            .map(Document::Json)
            .map_err(|e| ParseError::json_error(path.to_string_lossy().to_string(), e)),
        Some("xml") => parse_xml(&content)
            .map(Document::Xml)
            .map_err(|e| ParseError::xml_error(path.to_string_lossy().to_string(), e)),
        _ => {
            // Try JSON first, then XML
            parse_json(&content)
                .map(Document::Json)
                .or_else(|_| parse_xml(&content).map(Document::Xml))
                .map_err(|_| ParseError::unknown_format(path.to_string_lossy().to_string()))
        }
    }
}

/// Parses a JSON string into a [`Node`].
///
/// # Examples
///
/// ```
/// use docdiff_rs::parser::parse_json;
///
/// let json = r#"{"name": "Alice", "age": 30}"#;
/// let node = parse_json(json).unwrap();
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(json_to_node(value))
}

/// Converts a serde_json::Value to our Node representation.
fn json_to_node(value: serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Bool(b),
        serde_json::Value::Number(n) => {
            // Convert to f64, preserving as much precision as possible
            if let Some(f) = n.as_f64() {
                Node::Number(f)
            } else {
                // Shouldn't happen, but handle gracefully
                Node::Number(0.0)
            }
        }
        serde_json::Value::String(s) => Node::String(s),
        serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(json_to_node).collect()),
        serde_json::Value::Object(obj) => {
            let map: HashMap<String, Node> =
                obj.into_iter().map(|(k, v)| (k, json_to_node(v))).collect();
            Node::Object(map)
        }
    }
}

/// Parses an XML string into an [`Element`] tree rooted at the document
/// element.
///
/// Text content is whitespace-normalized on load: runs of whitespace collapse
/// to a single space and whitespace-only text nodes are dropped. Comments,
/// processing instructions, and the XML declaration are discarded.
///
/// Errors are reported as plain messages; `parse_file` attaches the file path.
///
/// # Examples
///
/// ```
/// use docdiff_rs::parser::parse_xml;
///
/// let root = parse_xml("<root><child>text</child></root>").unwrap();
/// assert_eq!(root.name, "root");
/// ```
pub fn parse_xml(content: &str) -> Result<Element, String> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();

    // Synthetic document element collects the root; popped at the end.
    let mut stack: Vec<Element> = vec![Element::new("#document")];
    let mut current_text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                flush_text(&mut stack, &mut current_text);
                let element = parse_element(e, &reader)?;
                stack.push(element);
            }
            Ok(Event::Empty(ref e)) => {
                flush_text(&mut stack, &mut current_text);
                let element = parse_element(e, &reader)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Element(element));
                }
            }
            Ok(Event::End(_)) => {
                flush_text(&mut stack, &mut current_text);
                let element = stack.pop().ok_or("unbalanced closing tag")?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => return Err("unbalanced closing tag".to_string()),
                }
            }
            Ok(Event::Text(e)) => {
                let raw = std::str::from_utf8(e.as_ref()).map_err(|e| e.to_string())?;
                let text =
                    quick_xml::escape::unescape(raw).map_err(|e| e.to_string())?;
                current_text.push_str(&text);
            }
            Ok(Event::CData(e)) => {
                current_text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::Eof) => break,
            // Comments, declaration, PIs, DOCTYPE: not part of comparison
            Ok(_) => {}
            Err(e) => return Err(format!("XML parse error: {}", e)),
        }
        buf.clear();
    }

    if stack.len() != 1 {
        return Err("unclosed element".to_string());
    }
    let document = stack.pop().expect("document element");
    document
        .children
        .into_iter()
        .find_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
        .ok_or_else(|| "document has no root element".to_string())
}

/// Parses an element's name and attributes from a start tag.
fn parse_element(e: &BytesStart, reader: &Reader<&[u8]>) -> Result<Element, String> {
    let name = reader
        .decoder()
        .decode(e.name().as_ref())
        .map_err(|e| e.to_string())?
        .to_string();

    let mut attributes = Vec::new();
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| format!("Attribute error: {}", e))?;
        let key = reader
            .decoder()
            .decode(attr.key.as_ref())
            .map_err(|e| e.to_string())?
            .to_string();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.to_string();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Attaches accumulated text to the open element, collapsing whitespace.
///
/// Whitespace-only runs (indentation between elements) are dropped entirely.
fn flush_text(stack: &mut [Element], text: &mut String) {
    if text.is_empty() {
        return;
    }
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    text.clear();
    if normalized.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Text(normalized));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_json_primitives() {
        assert_eq!(parse_json("null").unwrap(), Node::Null);
        assert_eq!(parse_json("true").unwrap(), Node::Bool(true));
        assert_eq!(parse_json("false").unwrap(), Node::Bool(false));
        assert_eq!(parse_json("42").unwrap(), Node::Number(42.0));
        assert_eq!(parse_json("3.15").unwrap(), Node::Number(3.15));
        assert_eq!(
            parse_json(r#""hello""#).unwrap(),
            Node::String("hello".to_string())
        );
    }

    #[test]
    fn test_parse_json_object() {
        let json = r#"{"name": "Alice", "age": 30}"#;
        let node = parse_json(json).unwrap();
        match node {
            Node::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name").unwrap(), &Node::String("Alice".to_string()));
                assert_eq!(map.get("age").unwrap(), &Node::Number(30.0));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(parse_json("{invalid json}").is_err());
        assert!(parse_json("[1, 2,]").is_err());
    }

    #[test]
    fn test_parse_xml_simple() {
        let root = parse_xml("<root><child>text</child></root>").unwrap();
        assert_eq!(root.name, "root");
        assert_eq!(root.children.len(), 1);
        match &root.children[0] {
            XmlNode::Element(child) => {
                assert_eq!(child.name, "child");
                assert_eq!(child.children, vec![XmlNode::Text("text".to_string())]);
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_xml_attributes() {
        let root = parse_xml(r#"<root id="foo" class="bar">content</root>"#).unwrap();
        assert_eq!(
            root.attributes,
            vec![
                ("id".to_string(), "foo".to_string()),
                ("class".to_string(), "bar".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_xml_drops_whitespace_only_text() {
        let xml = "<root>\n    <a>1</a>\n    <b>2</b>\n</root>";
        let root = parse_xml(xml).unwrap();
        assert_eq!(root.children.len(), 2);
        assert!(root
            .children
            .iter()
            .all(|c| matches!(c, XmlNode::Element(_))));
    }

    #[test]
    fn test_parse_xml_collapses_whitespace_runs() {
        let root = parse_xml("<root>  hello   world  </root>").unwrap();
        assert_eq!(root.children, vec![XmlNode::Text("hello world".to_string())]);
    }

    #[test]
    fn test_parse_xml_self_closing() {
        let root = parse_xml("<root><empty /></root>").unwrap();
        assert_eq!(root.children.len(), 1);
        match &root.children[0] {
            XmlNode::Element(e) => {
                assert_eq!(e.name, "empty");
                assert!(e.children.is_empty());
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_xml_entities() {
        let root = parse_xml("<root>a &amp; b</root>").unwrap();
        assert_eq!(root.children, vec![XmlNode::Text("a & b".to_string())]);
    }

    #[test]
    fn test_parse_xml_skips_comments() {
        let root = parse_xml("<root><!-- note --><a>1</a></root>").unwrap();
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_parse_xml_invalid() {
        assert!(parse_xml("<root><unclosed></root>").is_err());
        assert!(parse_xml("no markup at all").is_err());
    }

    #[test]
    fn test_parse_file_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"key": "value"}}"#).unwrap();
        let path = file.path().with_extension("json");
        fs::copy(file.path(), &path).unwrap();

        let doc = parse_file(&path).unwrap();
        match doc {
            Document::Json(Node::Object(map)) => {
                assert_eq!(map.get("key").unwrap(), &Node::String("value".to_string()));
            }
            other => panic!("Expected JSON object, got {:?}", other),
        }

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_file_xml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "<root><key>value</key></root>").unwrap();
        let path = file.path().with_extension("xml");
        fs::copy(file.path(), &path).unwrap();

        let doc = parse_file(&path).unwrap();
        match doc {
            Document::Xml(root) => assert_eq!(root.name, "root"),
            other => panic!("Expected XML document, got {:?}", other),
        }

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = parse_file(Path::new("/nonexistent/file.json"));
        assert!(result.is_err());
        match result.unwrap_err() {
            ParseError::FileNotFound { .. } => {}
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_file_unknown_extension_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "<root/>").unwrap();
        let path = file.path().with_extension("txt");
        fs::copy(file.path(), &path).unwrap();

        // Not JSON, so the fallback should land on XML
        let doc = parse_file(&path).unwrap();
        assert_eq!(doc.format_name(), "xml");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_file_undetectable() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "neither json nor xml").unwrap();
        let path = file.path().with_extension("txt");
        fs::copy(file.path(), &path).unwrap();

        match parse_file(&path).unwrap_err() {
            ParseError::UnknownFormat { .. } => {}
            other => panic!("Expected UnknownFormat error, got {:?}", other),
        }

        fs::remove_file(&path).unwrap();
    }
}
