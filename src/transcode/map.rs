//! Nested Map Conversion
//!
//! Flattens an [`XmlNode`] tree into plain nested values and re-serializes
//! such values as XML.
//!
//! The root element becomes an object of its contents. Child elements are
//! keyed by name, and a name that occurs more than once becomes an array in
//! document order. A leaf keeps its text verbatim, and an empty node is `null`.
//! Attributes are kept under [`ATTRIBUTES_KEY`] on elements that have
//! children or no text.

use crate::error::{BasecampError, Result};
use crate::transcode::xml::XmlNode;
use serde_json::{Map, Value};

/// Key holding an element's attributes
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Convert a parsed document into a nested map
pub fn to_map(root: &XmlNode) -> Value {
    node_value(root)
}

fn node_value(node: &XmlNode) -> Value {
    if node.is_empty() {
        return Value::Null;
    }
    if node.children().is_empty() && !node.text().is_empty() {
        return Value::String(node.text().to_string());
    }

    let mut object = Map::new();
    if !node.attributes().is_empty() {
        object.insert(ATTRIBUTES_KEY.to_string(), attributes_value(node));
    }

    for child in node.children() {
        let value = node_value(child);
        // node_value never yields an array, so an array here means a repeated name
        match object.get_mut(child.name()) {
            None => {
                object.insert(child.name().to_string(), value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    Value::Object(object)
}

fn attributes_value(node: &XmlNode) -> Value {
    Value::Object(
        node.attributes()
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// Entries stored under `name`, whether the document held one or several.
///
/// List endpoints such as `projects.xml` produce a single object for one
/// record and an array for more.
pub fn records<'a>(map: &'a Value, name: &str) -> Vec<&'a Value> {
    match map.get(name) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(value) => vec![value],
    }
}

/// Re-serialize a map produced by [`to_map`] as an XML document rooted at `root_name`
pub fn to_xml(root_name: &str, map: &Value) -> Result<String> {
    to_node(root_name, map)?.to_xml_string()
}

/// Rebuild an element tree from a map
pub fn to_node(name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(name);

    match value {
        Value::Null => {}
        Value::String(text) => node = node.with_text(text.as_str()),
        Value::Bool(_) | Value::Number(_) => node = node.with_text(value.to_string()),
        Value::Object(object) => {
            for (key, child) in object {
                if key == ATTRIBUTES_KEY {
                    node = with_attributes(node, child)?;
                    continue;
                }
                match child {
                    Value::Array(items) => {
                        for item in items {
                            if item.is_array() {
                                return Err(BasecampError::Parse(format!(
                                    "nested array under '{}' has no XML form",
                                    key
                                )));
                            }
                            node = node.with_child(to_node(key, item)?);
                        }
                    }
                    _ => node = node.with_child(to_node(key, child)?),
                }
            }
        }
        Value::Array(_) => {
            return Err(BasecampError::Parse(format!(
                "array for <{}> has no XML form without a parent",
                name
            )))
        }
    }

    Ok(node)
}

fn with_attributes(mut node: XmlNode, attributes: &Value) -> Result<XmlNode> {
    let object = attributes.as_object().ok_or_else(|| {
        BasecampError::Parse(format!("'{}' must be an object", ATTRIBUTES_KEY))
    })?;

    for (key, value) in object {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        node = node.with_attribute(key.as_str(), value);
    }
    Ok(node)
}
