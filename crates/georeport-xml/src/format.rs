//! Format names and negotiation helpers.
//!
//! The transcoder itself only implements `xml`. Callers pick a format from the request path
//! suffix (`.xml` / `.json`) or from the `Accept` header; these helpers give them one shared
//! way of doing that.

use std::fmt;

/// Format name handled by [`XmlEncoder`](crate::xml::XmlEncoder).
pub const XML_FORMAT: &str = "xml";

/// Format name for JSON payloads.
pub const JSON_FORMAT: &str = "json";

/// Payload formats a GeoReport endpoint can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON format (application/json)
    Json,
    /// XML format (application/xml)
    Xml,
}

impl Format {
    /// Returns the format name used for dispatch.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => JSON_FORMAT,
            Format::Xml => XML_FORMAT,
        }
    }

    /// Returns the MIME type string for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }

    /// Parses a format name (`xml`, `json`), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            XML_FORMAT => Some(Format::Xml),
            JSON_FORMAT => Some(Format::Json),
            _ => None,
        }
    }

    /// Reads the format from a request path suffix, e.g. `/requests.xml`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let (_, suffix) = path.rsplit_once('.')?;
        if suffix.contains('/') {
            return None;
        }
        Self::from_name(suffix)
    }

    /// Parses a media type string, ignoring parameters.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let ct = media_type.split(';').next().unwrap_or("").trim().to_lowercase();

        if ct == "application/json" || ct == "text/json" || ct.ends_with("+json") {
            Some(Format::Json)
        } else if ct == "application/xml" || ct == "text/xml" || ct.ends_with("+xml") {
            Some(Format::Xml)
        } else {
            None
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Determines the response format from the path suffix and the Accept header.
///
/// The path suffix takes precedence. Otherwise the first recognised media type in the Accept
/// header wins, and JSON is the default.
pub fn negotiate_format(path: &str, accept: Option<&str>) -> Format {
    if let Some(format) = Format::from_path(path) {
        return format;
    }

    // Simplified: quality values are not weighed
    for media_type in accept.unwrap_or_default().split(',') {
        if let Some(format) = Format::from_media_type(media_type) {
            return format;
        }
    }

    Format::Json
}
