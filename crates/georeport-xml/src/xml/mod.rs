//! Schema-less XML encoding and decoding of GeoReport payloads.
//!
//! No schema drives the transformation. The shape of the [`Value`] decides the shape of the
//! document, and decoding folds any XML document back into the same kind of tree.
//!
//! ## Value ↔ XML Mapping
//!
//! | Value | XML |
//! |-------|-----|
//! | `{"@id": 5}` | `<x id="5"/>` |
//! | `{"@id": 5, "#": "text"}` | `<x id="5">text</x>` |
//! | `{"code": 404}` | `<code>404</code>` |
//! | `{"keyword": ["a", "b"]}` | `<keyword>a</keyword><keyword>b</keyword>` |
//! | `[{"service_code": "001"}]` | `<request key="0"><service_code>001</service_code></request>` |
//! | `{"description": "a < b"}` | `<description><![CDATA[a < b]]></description>` |
//!
//! ## Root Element
//!
//! The root element is chosen from the top level of the value:
//!
//! - a map with an `error` key → `<errors>`
//! - a list whose first item has a `metadata` key → `<services>`
//! - a map with a `changeset` key → `<discovery>`
//! - anything else → `<service_requests>`
//!
//! ## Asymmetries
//!
//! Decoding is not an exact inverse of encoding:
//!
//! - a list with one item decodes as that item
//! - only attribute values are converted back to numbers; element text stays text
//! - elements named by content (`<request key="0">`) keep their `key` attribute as `@key`;
//!   only `<item key="...">` elements are placed back under their key
//!
//! ## Examples
//!
//! ```
//! use georeport_xml::{Map, Value};
//! use georeport_xml::xml::{self, DecodeOptions, EncodeOptions};
//!
//! let errors = Value::Map(Map::from([(
//!     "error",
//!     Value::Map(Map::from([("code", Value::from(404))])),
//! )]));
//! let document = xml::encode(&errors, &EncodeOptions::default())?;
//! assert!(document.contains("<errors><error><code>404</code></error></errors>"));
//!
//! let decoded = xml::decode(&document, &DecodeOptions::default())?;
//! assert_eq!(
//!     decoded,
//!     Value::Map(Map::from([(
//!         "error",
//!         Value::Map(Map::from([("code", Value::from("404"))])),
//!     )]))
//! );
//! # Ok::<(), georeport_xml::XmlError>(())
//! ```

pub mod de;
pub mod dom;
pub mod root;
pub mod ser;
pub mod utils;

use crate::error::{Result, XmlError};
use crate::format::XML_FORMAT;
use crate::value::Value;
use std::collections::BTreeMap;

pub use root::resolve_root_name;
pub use utils::needs_cdata;

/// Loose, string-keyed options as handed over by callers that keep a context map.
pub type OptionsMap = BTreeMap<String, Value>;

/// Option key for the advisory root element name.
pub const ROOT_NODE_NAME: &str = "xml_root_node_name";
/// Option key enabling indented output.
pub const FORMAT_OUTPUT: &str = "xml_format_output";
/// Option key for the XML declaration version.
pub const VERSION: &str = "xml_version";
/// Option key for the XML declaration encoding.
pub const ENCODING: &str = "xml_encoding";
/// Option key for the XML declaration standalone flag.
pub const STANDALONE: &str = "xml_standalone";
/// Option key keeping single-item lists as lists on decode.
pub const AS_COLLECTION: &str = "as_collection";
/// Option key controlling numeric coercion of attribute values on decode.
pub const TYPE_CAST_ATTRIBUTES: &str = "type_cast_attributes";

/// Options for [`encode`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    /// Advisory root element name. The content-based root name always replaces it.
    pub root_node_name: Option<String>,
    /// Indent the output with two spaces per level.
    pub format_output: bool,
    /// Version written in the XML declaration.
    pub version: String,
    /// Encoding written in the XML declaration.
    pub encoding: String,
    /// Standalone flag written in the XML declaration; omitted when `None`.
    pub standalone: Option<bool>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            root_node_name: None,
            format_output: false,
            version: "1.0".to_string(),
            encoding: "UTF-8".to_string(),
            standalone: None,
        }
    }
}

impl EncodeOptions {
    /// Reads the recognised keys out of a loose options map. Unknown keys are ignored.
    pub fn from_map(map: &OptionsMap) -> Self {
        let defaults = Self::default();
        Self {
            root_node_name: map.get(ROOT_NODE_NAME).and_then(option_text),
            format_output: map.get(FORMAT_OUTPUT).is_some_and(truthy),
            version: map
                .get(VERSION)
                .and_then(option_text)
                .unwrap_or(defaults.version),
            encoding: map
                .get(ENCODING)
                .and_then(option_text)
                .unwrap_or(defaults.encoding),
            standalone: map.get(STANDALONE).map(truthy),
        }
    }
}

/// Options for [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Keep every group of same-named children as a list, even a group of one.
    pub as_collection: bool,
    /// Turn digit-only attribute values into numbers.
    pub type_cast_attributes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            as_collection: false,
            type_cast_attributes: true,
        }
    }
}

impl DecodeOptions {
    /// Reads the recognised keys out of a loose options map. Unknown keys are ignored.
    pub fn from_map(map: &OptionsMap) -> Self {
        let defaults = Self::default();
        Self {
            as_collection: map
                .get(AS_COLLECTION)
                .map(truthy)
                .unwrap_or(defaults.as_collection),
            type_cast_attributes: map
                .get(TYPE_CAST_ATTRIBUTES)
                .map(truthy)
                .unwrap_or(defaults.type_cast_attributes),
        }
    }
}

fn option_text(value: &Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.to_string() != "0",
        Value::Text(s) => !s.is_empty() && s != "0",
        Value::Map(map) => !map.is_empty(),
        Value::List(items) => !items.is_empty(),
    }
}

/// Encodes `value` as an XML document.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String> {
    let root_name = resolve_root_name(value);
    tracing::debug!(
        root = root_name,
        requested = ?options.root_node_name,
        "resolved xml root element"
    );

    let root = ser::build_root(value, root_name)?;
    dom::write_document(&root, options)
}

/// Decodes an XML document into a value.
pub fn decode(xml: &str, options: &DecodeOptions) -> Result<Value> {
    let document = de::parse_document(xml)?;
    let value = de::decode_document(&document, options);
    tracing::trace!(
        entries = value.as_map().map(|m| m.len()).unwrap_or(0),
        "decoded xml document"
    );
    Ok(value)
}

/// Encoder/decoder pair registered under the `xml` format name.
///
/// This is the entry point for callers that dispatch on a negotiated format string and carry
/// their options as a loose map.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEncoder;

impl XmlEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Returns true only for `xml`.
    pub fn supports_encoding(&self, format: &str) -> bool {
        format == XML_FORMAT
    }

    /// Returns true only for `xml`.
    pub fn supports_decoding(&self, format: &str) -> bool {
        format == XML_FORMAT
    }

    /// Encodes `value` in `format`, which must be `xml`.
    pub fn encode(&self, value: &Value, format: &str, options: &OptionsMap) -> Result<String> {
        if !self.supports_encoding(format) {
            return Err(XmlError::UnsupportedFormat(format.to_string()));
        }
        encode(value, &EncodeOptions::from_map(options))
    }

    /// Decodes `xml` from `format`, which must be `xml`.
    pub fn decode(&self, xml: &str, format: &str, options: &OptionsMap) -> Result<Value> {
        if !self.supports_decoding(format) {
            return Err(XmlError::UnsupportedFormat(format.to_string()));
        }
        decode(xml, &DecodeOptions::from_map(options))
    }
}
