//! XML reading and depth-tracking serialization for project descriptors
//!
//! Reading goes through `quick-xml` events and builds a [`Element`] tree in
//! which comments are kept as [`Node::Comment`] siblings. Whitespace-only text
//! is dropped; layout is regenerated on write:
//!
//! - two-space indentation per depth level
//! - one blank line between top-level sections, except between adjacent
//!   `groupId`/`artifactId`/`version` and right after a comment, so that a
//!   comment stays glued to the section it describes
//! - the `combine.children` merge marker is never written

use std::path::Path;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::tree::{Element, Node, CHILDREN_COMBINATION_MODE};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Top-level sections that stay together without blank lines between them
const COORDINATE_SECTIONS: [&str; 3] = ["groupId", "artifactId", "version"];

/// A parsed XML document: the root element plus comments around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// Comments before the root element
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments after the root element
    pub epilogue: Vec<Node>,
}

impl XmlDocument {
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilogue: Vec::new(),
        }
    }
}

fn xml_error(path: &Path, message: impl Into<String>) -> Error {
    Error::Xml {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn start_element(path: &Path, start: &BytesStart) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(path, e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| xml_error(path, e.to_string()))?
            .into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.value.get_or_insert_with(String::new).push_str(text);
    }
}

/// Attach a finished element to its parent, or make it the document root
fn close_element(
    path: &Path,
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element.into()),
        None if root.is_none() => *root = Some(element),
        None => return Err(xml_error(path, "multiple root elements")),
    }
    Ok(())
}

/// Parse XML content into a document tree
///
/// `path` is only used for error reporting.
pub fn parse(path: &Path, content: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut prolog = Vec::new();
    let mut epilogue = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(start_element(path, &start)?),
            Ok(Event::Empty(start)) => {
                let element = start_element(path, &start)?;
                close_element(path, &mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error(path, "unexpected closing tag"))?;
                close_element(path, &mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| xml_error(path, e.to_string()))?;
                append_text(&mut stack, &text);
            }
            Ok(Event::CData(data)) => {
                append_text(&mut stack, &String::from_utf8_lossy(&data));
            }
            Ok(Event::Comment(comment)) => {
                let comment = Node::Comment(String::from_utf8_lossy(&comment).into_owned());
                match stack.last_mut() {
                    Some(parent) => parent.children.push(comment),
                    None if root.is_none() => prolog.push(comment),
                    None => epilogue.push(comment),
                }
            }
            Ok(Event::Eof) => break,
            // declarations, processing instructions and doctypes are regenerated
            Ok(_) => {}
            Err(e) => {
                return Err(xml_error(
                    path,
                    format!("at position {}: {}", reader.buffer_position(), e),
                ))
            }
        }
    }

    if !stack.is_empty() {
        return Err(xml_error(path, "unexpected end of document"));
    }
    let root = root.ok_or_else(|| xml_error(path, "no root element"))?;

    Ok(XmlDocument {
        prolog,
        root,
        epilogue,
    })
}

/// Serialize a document tree back to XML text
pub fn serialize(document: &XmlDocument) -> String {
    let mut out = String::new();
    out.push_str(DECLARATION);
    out.push('\n');
    for node in &document.prolog {
        write_node(&mut out, node, 0);
    }
    write_element(&mut out, &document.root, 0);
    for node in &document.epilogue {
        write_node(&mut out, node, 0);
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Element(element) => write_element(out, element, depth),
        Node::Comment(text) => {
            indent(out, depth);
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->\n");
        }
    }
}

fn needs_blank_line(previous: &Node, next: &Node) -> bool {
    match (previous, next) {
        (Node::Comment(_), _) => false,
        (Node::Element(a), Node::Element(b)) => {
            !(COORDINATE_SECTIONS.contains(&a.name.as_str())
                && COORDINATE_SECTIONS.contains(&b.name.as_str()))
        }
        (Node::Element(_), Node::Comment(_)) => true,
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    indent(out, depth);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        if key == CHILDREN_COMBINATION_MODE {
            continue;
        }
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if element.children.is_empty() {
        match element.text() {
            Some(text) => {
                out.push('>');
                out.push_str(&partial_escape(text));
                out.push_str("</");
                out.push_str(&element.name);
                out.push_str(">\n");
            }
            None => out.push_str("/>\n"),
        }
        return;
    }

    // a value next to comments only stays on one line with them
    if let Some(text) = element.text() {
        if element.children.iter().all(|c| matches!(c, Node::Comment(_))) {
            out.push('>');
            out.push_str(&partial_escape(text));
            for child in &element.children {
                if let Node::Comment(comment) = child {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push_str(">\n");
            return;
        }
    }

    out.push_str(">\n");
    let mut previous: Option<&Node> = None;
    for child in &element.children {
        if depth == 0 {
            if let Some(previous) = previous {
                if needs_blank_line(previous, child) {
                    out.push('\n');
                }
            }
        }
        write_node(out, child, depth + 1);
        previous = Some(child);
    }
    indent(out, depth);
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}
