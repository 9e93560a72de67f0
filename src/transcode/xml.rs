//! XML Tree
//!
//! Owned element tree built from a response body with quick-xml, and
//! written back out the same way.

use crate::error::{BasecampError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use std::borrow::Cow;

/// One XML element with its attributes, text and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Unescaped character data directly inside this element
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// First child element called `name`
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// No children, no attributes and no text
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.attributes.is_empty() && self.text.is_empty()
    }

    /// Serialize as a standalone document with an XML declaration
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
        self.write_to(&mut writer)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| BasecampError::Parse(format!("XML output is not UTF-8: {}", e)))
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let start = BytesStart::new(self.name.as_str()).with_attributes(
            self.attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );

        if self.children.is_empty() && self.text.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(write_error);
        }

        writer.write_event(Event::Start(start)).map_err(write_error)?;
        if !self.text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&self.text)))
                .map_err(write_error)?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(write_error)
    }
}

fn write_error(err: impl std::fmt::Display) -> BasecampError {
    BasecampError::Parse(format!("Failed to write XML: {}", err))
}

fn utf8(bytes: &[u8]) -> Result<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| BasecampError::Parse(format!("Invalid UTF-8 in XML: {}", e)))
}

/// Parse a complete document into its root element.
///
/// The declaration, comments, processing instructions and doctype are skipped.
pub fn parse(input: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(BasecampError::Parse(
                        "content after the root element".to_string(),
                    ));
                }
                stack.push(element(&e)?);
            }
            Event::Empty(e) => {
                let node = element(&e)?;
                close(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    BasecampError::Parse("closing tag without an open element".to_string())
                })?;
                close(node, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|e| BasecampError::Parse(format!("Bad character data: {}", e)))?;
                push_text(&text, &mut stack)?;
            }
            Event::CData(e) => {
                let text = utf8(&e)?;
                push_text(&text, &mut stack)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(BasecampError::Parse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| BasecampError::Parse("document has no root element".to_string()))
}

fn element(start: &BytesStart<'_>) -> Result<XmlNode> {
    let mut node = XmlNode::new(utf8(start.name().as_ref())?.into_owned());

    for attr in start.attributes() {
        let attr = attr.map_err(|e| BasecampError::Parse(format!("Bad attribute: {}", e)))?;
        let key = utf8(attr.key.as_ref())?.into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| BasecampError::Parse(format!("Bad attribute value: {}", e)))?;
        node.attributes.push((key, value.into_owned()));
    }

    Ok(node)
}

fn close(mut node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) -> Result<()> {
    // indentation between child elements
    if !node.children.is_empty() && node.text.trim().is_empty() {
        node.text.clear();
    }

    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(BasecampError::Parse(
                "content after the root element".to_string(),
            ))
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn push_text(text: &str, stack: &mut [XmlNode]) -> Result<()> {
    match stack.last_mut() {
        Some(node) => node.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(BasecampError::Parse(
                "text outside the root element".to_string(),
            ))
        }
    }
    Ok(())
}
