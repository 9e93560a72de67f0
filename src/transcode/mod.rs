//! Response Transcoding
//!
//! Turns a raw XML response body into the representation chosen by
//! [`ResponseFormat`].

pub mod map;
pub mod xml;

pub use map::{records, to_map, to_xml, ATTRIBUTES_KEY};
pub use xml::XmlNode;

use crate::config::ResponseFormat;
use crate::error::Result;
use serde_json::Value;

/// A transcoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Parsed element tree
    Xml(XmlNode),

    /// JSON text of the nested map
    Json(String),

    /// Nested map
    Map(Value),
}

impl Response {
    pub fn format(&self) -> ResponseFormat {
        match self {
            Response::Xml(_) => ResponseFormat::Xml,
            Response::Json(_) => ResponseFormat::Json,
            Response::Map(_) => ResponseFormat::Map,
        }
    }

    pub fn as_xml(&self) -> Option<&XmlNode> {
        match self {
            Response::Xml(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&str> {
        match self {
            Response::Json(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Value> {
        match self {
            Response::Map(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_xml(self) -> Option<XmlNode> {
        match self {
            Response::Xml(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<String> {
        match self {
            Response::Json(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<Value> {
        match self {
            Response::Map(value) => Some(value),
            _ => None,
        }
    }
}

/// Parse `body` and convert it to `format`
pub fn transcode(body: &str, format: ResponseFormat) -> Result<Response> {
    let tree = xml::parse(body)?;

    let response = match format {
        ResponseFormat::Xml => Response::Xml(tree),
        ResponseFormat::Json => Response::Json(serde_json::to_string(&to_map(&tree))?),
        ResponseFormat::Map => Response::Map(to_map(&tree)),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PERSON: &str = r#"<person><id type="integer">3</id><first-name>Jane</first-name><im-handle></im-handle></person>"#;

    #[test]
    fn test_xml_passes_tree_through() {
        let response = transcode(PERSON, ResponseFormat::Xml).unwrap();
        assert_eq!(response.format(), ResponseFormat::Xml);

        let root = response.into_xml().unwrap();
        assert_eq!(root.name(), "person");
        assert_eq!(root.child("first-name").unwrap().text(), "Jane");
    }

    #[test]
    fn test_json_serializes_map() {
        let response = transcode(PERSON, ResponseFormat::Json).unwrap();
        let text = response.as_json().unwrap();

        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(
            value,
            json!({ "id": "3", "first-name": "Jane", "im-handle": null })
        );
    }

    #[test]
    fn test_map_format() {
        let response = transcode(PERSON, ResponseFormat::Map).unwrap();
        assert!(response.as_xml().is_none());
        assert_eq!(response.as_map().unwrap()["first-name"], "Jane");
    }

    #[test]
    fn test_malformed_input_fails_for_every_format() {
        for format in [ResponseFormat::Xml, ResponseFormat::Json, ResponseFormat::Map] {
            let err = transcode("<person><id>3</person>", format).unwrap_err();
            assert!(err.is_parse(), "{}", format);
        }
    }
}
