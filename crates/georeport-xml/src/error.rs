//! Error types for GeoReport XML encoding and decoding.
//!
//! Errors are returned to the caller as-is. The transcoder never retries and never logs them;
//! the caller holds the request context needed to report them.

use thiserror::Error;

/// Errors produced while encoding a [`Value`](crate::Value) to XML or decoding XML back.
#[derive(Error, Debug)]
pub enum XmlError {
    /// Decode was called with empty or whitespace-only input.
    #[error("Invalid XML data, it can not be empty.")]
    EmptyDocument,

    /// The XML parser rejected the input. Carries the parser's own diagnostic.
    #[error("{0}")]
    MalformedXml(String),

    /// A DOCTYPE declaration was present at the document level.
    #[error("Document types are not allowed.")]
    DoctypeNotAllowed,

    /// The encoder reached a value it has no XML form for.
    #[error("An unexpected value could not be serialized: {0}")]
    UnserializableValue(String),

    /// A format other than `xml` was requested.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// JSON serialization or deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the serialized document failed.
    #[error("XML write error: {0}")]
    Write(String),
}

/// Error returned by [`encode`](crate::xml::encode).
pub type EncodeError = XmlError;

/// Error returned by [`decode`](crate::xml::decode).
pub type DecodeError = XmlError;

/// Result type alias for transcoder operations
pub type Result<T> = std::result::Result<T, XmlError>;

impl From<roxmltree::Error> for XmlError {
    fn from(err: roxmltree::Error) -> Self {
        match err {
            roxmltree::Error::DtdDetected => XmlError::DoctypeNotAllowed,
            other => XmlError::MalformedXml(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::Write(err.to_string())
    }
}

impl From<std::io::Error> for XmlError {
    fn from(err: std::io::Error) -> Self {
        XmlError::Write(err.to_string())
    }
}
