//! Utility functions and constants for XML encoding/decoding.
//!
//! This module holds the text safety classifier and the name and digit checks shared by the
//! encoder and decoder.

use once_cell::sync::Lazy;
use quick_xml::escape::{escape, partial_escape};
use regex::Regex;
use std::borrow::Cow;

/// Map key holding an element's text content.
pub const TEXT_KEY: &str = "#";

/// Prefix marking a map key as an XML attribute.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Attribute carrying the original map key on fallback-named elements.
pub const KEY_ATTRIBUTE: &str = "key";

/// Element name whose `key` attribute places it back under that key on decode.
pub const ITEM_ELEMENT: &str = "item";

static ELEMENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\pL_][\pL0-9._:-]*$").expect("element name pattern is valid")
});

/// Whether a string must be wrapped in CDATA to stay well-formed as element text.
///
/// The CDATA terminator `]]>` is not split; callers must not pass it.
pub fn needs_cdata(s: &str) -> bool {
    s.contains(['<', '>', '&'])
}

/// Checks if a name can be used verbatim as an XML element or attribute name.
pub fn is_valid_element_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(char::is_whitespace) && ELEMENT_NAME.is_match(name)
}

/// True for a non-empty string made only of ASCII digits.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Converts a boolean to element text.
pub fn bool_to_text(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Converts a boolean to attribute text using a plain string cast, so `false` is empty.
pub fn bool_to_attribute(b: bool) -> &'static str {
    if b { "1" } else { "" }
}

/// Escapes an attribute value. Tab, newline and carriage return are written as character
/// references so attribute-value normalization leaves them intact.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped;
    }
    Cow::Owned(
        escaped
            .replace('\t', "&#9;")
            .replace('\n', "&#10;")
            .replace('\r', "&#13;"),
    )
}

/// Escapes element text. Carriage returns become `&#13;` since parsers fold `\r\n` to `\n`.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = partial_escape(text);
    if !escaped.contains('\r') {
        return escaped;
    }
    Cow::Owned(escaped.replace('\r', "&#13;"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attribute_whitespace() {
        assert_eq!(escape_attribute("plain"), "plain");
        assert_eq!(
            escape_attribute("a\tb\nc\r\n<\"&"),
            "a&#9;b&#10;c&#13;&#10;&lt;&quot;&amp;"
        );
    }

    #[test]
    fn test_escape_text_carriage_return() {
        assert_eq!(escape_text("a\tb\nc"), "a\tb\nc");
        assert_eq!(escape_text("a\r\nb"), "a&#13;\nb");
    }

    #[test]
    fn test_needs_cdata() {
        assert!(needs_cdata("a<b"));
        assert!(needs_cdata("a&b"));
        assert!(needs_cdata("a>b"));
        assert!(!needs_cdata("plain"));
        assert!(!needs_cdata("quotes \" and ' are fine"));
    }

    #[test]
    fn test_is_valid_element_name() {
        assert!(is_valid_element_name("service_request"));
        assert!(is_valid_element_name("_private"));
        assert!(is_valid_element_name("georeport:service"));
        assert!(is_valid_element_name("Straße"));
        assert!(is_valid_element_name("v1.2-beta"));
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("0"));
        assert!(!is_valid_element_name("12abc"));
        assert!(!is_valid_element_name("has space"));
        assert!(!is_valid_element_name("trailing\n"));
        assert!(!is_valid_element_name("@foo"));
        assert!(!is_valid_element_name("#"));
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("0"));
        assert!(is_digits("0123"));
        assert!(!is_digits(""));
        assert!(!is_digits("-1"));
        assert!(!is_digits("1.5"));
        assert!(!is_digits("١٢"));
    }

    #[test]
    fn test_bool_text() {
        assert_eq!(bool_to_text(true), "1");
        assert_eq!(bool_to_text(false), "0");
        assert_eq!(bool_to_attribute(true), "1");
        assert_eq!(bool_to_attribute(false), "");
    }
}
