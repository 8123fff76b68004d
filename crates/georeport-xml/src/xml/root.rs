//! Content-based element naming.
//!
//! GeoReport payloads carry no schema, so the root element and the name of any element
//! stored under a positional key are chosen by looking at which keys the data holds.

use crate::value::Value;

/// Root element for error lists.
pub const ERRORS_ROOT: &str = "errors";
/// Root element for service-type lists.
pub const SERVICES_ROOT: &str = "services";
/// Root element for discovery documents.
pub const DISCOVERY_ROOT: &str = "discovery";
/// Root element for service-request lists, and the default.
pub const SERVICE_REQUESTS_ROOT: &str = "service_requests";

/// Chooses the document root element name from the top level of `value`.
pub fn resolve_root_name(value: &Value) -> &'static str {
    if value.has_key("error") {
        ERRORS_ROOT
    } else if value.first_item().is_some_and(|first| first.has_key("metadata")) {
        SERVICES_ROOT
    } else if value.has_key("changeset") {
        DISCOVERY_ROOT
    } else {
        SERVICE_REQUESTS_ROOT
    }
}

/// Chooses the element name for a value stored under a numeric or otherwise invalid key.
pub fn fallback_element_name(value: &Value) -> &'static str {
    if value.has_key("error") {
        "error"
    } else if value.has_key("metadata") {
        "service"
    } else if value.has_key("changeset") {
        "endpoint"
    } else {
        "request"
    }
}
