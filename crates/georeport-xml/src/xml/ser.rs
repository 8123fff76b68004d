//! Tree encoder: turns a [`Value`] into an output element tree.
//!
//! Map keys decide the XML shape:
//!
//! | Key | Value | Result |
//! |-----|-------|--------|
//! | `@name` | scalar | attribute `name` on the current element |
//! | `#` | any | text content of the current element |
//! | valid element name | list-like container | one `<name>` per item |
//! | valid element name | anything else | one `<name>` |
//! | numeric or invalid | anything | `<request key="...">` (name chosen from the value) |

use crate::error::{Result, XmlError};
use crate::value::{Number, Value};
use crate::xml::dom::Element;
use crate::xml::root::fallback_element_name;
use crate::xml::utils::{self, ATTRIBUTE_PREFIX, KEY_ATTRIBUTE, TEXT_KEY};

/// Builds the document root element for `value`.
///
/// Scalars and `Null` become the root's text content; containers are expanded entry by entry.
pub(crate) fn build_root(value: &Value, root_name: &str) -> Result<Element> {
    let mut root = Element::new(root_name);
    select_node_type(&mut root, value)?;
    Ok(root)
}

/// Expands the entries of a container into `parent`.
///
/// The returned flag reports whether content was appended. Every current rule appends, so it
/// is always `true`; [`append_node`] still honours it.
pub(crate) fn build(parent: &mut Element, value: &Value) -> Result<bool> {
    let mut appended = true;
    match value {
        Value::Map(map) => {
            for (key, entry) in map.iter() {
                appended = build_entry(parent, key, entry)?;
            }
        }
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                appended = build_entry(parent, &index.to_string(), item)?;
            }
        }
        scalar => appended = select_node_type(parent, scalar)?,
    }
    Ok(appended)
}

fn build_entry(parent: &mut Element, key: &str, value: &Value) -> Result<bool> {
    if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX)
        && is_attribute_value(value)
        && utils::is_valid_element_name(name)
    {
        parent.set_attribute(name, attribute_text(value)?);
        return Ok(true);
    }

    if key == TEXT_KEY {
        return select_node_type(parent, value);
    }

    if utils::is_valid_element_name(key) {
        if value.is_list_like() {
            let mut appended = true;
            for item in items(value) {
                appended = append_node(parent, item, key, None)?;
            }
            return Ok(appended);
        }
        return append_node(parent, value, key, None);
    }

    append_node(parent, value, fallback_element_name(value), Some(key))
}

/// Items of a list-like container, in entry order.
fn items(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::List(items) => Box::new(items.iter()),
        Value::Map(map) => Box::new(map.iter().map(|(_, v)| v)),
        _ => Box::new(std::iter::empty()),
    }
}

fn append_node(parent: &mut Element, value: &Value, name: &str, key: Option<&str>) -> Result<bool> {
    let mut node = Element::new(name);
    if let Some(key) = key {
        node.set_attribute(KEY_ATTRIBUTE, key);
    }
    let appended = select_node_type(&mut node, value)?;
    if appended {
        parent.append_child(node);
    }
    Ok(appended)
}

/// Writes `value` as the content of `node`.
fn select_node_type(node: &mut Element, value: &Value) -> Result<bool> {
    match value {
        Value::Map(_) | Value::List(_) => build(node, value),
        Value::Number(n) => {
            node.append_text(number_text(value, n)?);
            Ok(true)
        }
        Value::Text(s) if utils::needs_cdata(s) => {
            node.append_cdata(s.as_str());
            Ok(true)
        }
        Value::Text(s) => {
            node.append_text(s.as_str());
            Ok(true)
        }
        Value::Bool(b) => {
            node.append_text(utils::bool_to_text(*b));
            Ok(true)
        }
        Value::Null => Ok(true),
    }
}

fn is_attribute_value(value: &Value) -> bool {
    value.is_scalar() || matches!(value, Value::Null)
}

// Booleans use a plain string cast here ("1"/""), unlike element text ("1"/"0").
fn attribute_text(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Text(s) => s.clone(),
        Value::Number(n) => number_text(value, n)?,
        Value::Bool(b) => utils::bool_to_attribute(*b).to_string(),
        _ => String::new(),
    })
}

fn number_text(value: &Value, n: &Number) -> Result<String> {
    if n.is_finite() {
        Ok(n.to_string())
    } else {
        Err(XmlError::UnserializableValue(format!("{:?}", value)))
    }
}
