//! # GeoReport XML
//!
//! Schema-less XML encoding and decoding for Open311 GeoReport v2 payloads: service lists,
//! service-request lists, discovery documents and error lists.
//!
//! ## Features
//!
//! - **Content-based shape**: the root element, attributes, text content and repeated
//!   elements are all inferred from the [`Value`] being encoded; no schema is involved.
//! - **Safe decoding**: documents carrying a DOCTYPE are rejected outright, and any XML
//!   document folds back into the same [`Value`] tree.
//! - **JSON interop**: [`Value`] converts to and from `serde_json::Value`, so payloads can
//!   move between the JSON and XML sides of format negotiation.
//!
//! ## Key Conventions
//!
//! | Map key | XML |
//! |---------|-----|
//! | `@name` | attribute `name` |
//! | `#` | text content |
//! | valid element name | child element(s) named by the key |
//! | numeric or invalid name | child element named from its content, with `key="..."` |
//!
//! ## Examples
//!
//! ```
//! use georeport_xml::{Map, Value, XmlEncoder, OptionsMap};
//!
//! let services = Value::List(vec![Value::Map(Map::from([
//!     ("service_code", Value::from("001")),
//!     ("metadata", Value::from(false)),
//! ]))]);
//!
//! let encoder = XmlEncoder::new();
//! let xml = encoder.encode(&services, "xml", &OptionsMap::new())?;
//! assert!(xml.contains("<services><service key=\"0\">"));
//! # Ok::<(), georeport_xml::XmlError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod json;
pub mod value;
pub mod xml;

// Re-export common types and functions
pub use error::{DecodeError, EncodeError, Result, XmlError};
pub use format::{Format, negotiate_format};
pub use value::{Map, Number, Value};
pub use xml::{DecodeOptions, EncodeOptions, OptionsMap, XmlEncoder, decode, encode};
