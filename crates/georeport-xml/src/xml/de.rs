//! Document parser and tree decoder.
//!
//! Input is parsed into a DOM with `roxmltree`, with DTD support switched off so any DOCTYPE
//! is rejected before entity declarations are looked at. The DOM is then folded back into a
//! [`Value`]:
//!
//! - attributes become `@name` entries, digit-only attribute values become numbers
//! - an element holding only text becomes that text
//! - same-named children are gathered into a list, and a list of one collapses to its item
//! - `<item key="k">` children are placed back under `k`

use crate::error::{Result, XmlError};
use crate::value::{Map, Number, Value};
use crate::xml::DecodeOptions;
use crate::xml::utils::{self, ATTRIBUTE_PREFIX, ITEM_ELEMENT, TEXT_KEY};
use quick_xml::Reader;
use quick_xml::events::Event;
use roxmltree::{Document, Node, ParsingOptions};

/// Key for text found among element siblings.
const MIXED_TEXT_KEY: &str = "#text";

/// Deepest element nesting accepted on decode.
pub const MAX_DEPTH: usize = 256;

/// Parses raw XML into a DOM.
pub(crate) fn parse_document(xml: &str) -> Result<Document<'_>> {
    if xml.trim().is_empty() {
        return Err(XmlError::EmptyDocument);
    }
    check_depth(xml)?;
    let options = ParsingOptions {
        allow_dtd: false,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

/// Rejects documents nested deeper than [`MAX_DEPTH`] before the DOM is built.
///
/// Only start and end tags are counted. Syntax errors stop the scan and are left for the DOM
/// parser to report.
fn check_depth(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(XmlError::MalformedXml(format!(
                        "Excessive depth in document: more than {} nested elements",
                        MAX_DEPTH
                    )));
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) | Err(_) => return Ok(()),
            Ok(_) => {}
        }
    }
}

/// Decodes a parsed document. The root element's name is not part of the result.
pub(crate) fn decode_document(document: &Document<'_>, options: &DecodeOptions) -> Value {
    let root = document.root_element();

    if !has_content(root) {
        let attributes = parse_attributes(root, options);
        if attributes.is_empty() {
            return Value::Text(root.text().unwrap_or_default().to_string());
        }
        return Value::Map(attributes);
    }

    let namespaces = namespace_entries(root);
    let decoded = parse_node(root, options);
    if namespaces.is_empty() {
        return decoded;
    }

    let mut merged = namespaces;
    match decoded {
        Value::Map(map) => {
            for (key, value) in map {
                merged.insert(key, value);
            }
        }
        scalar => {
            merged.insert("0", scalar);
        }
    }
    Value::Map(merged)
}

/// Namespace declarations in scope on the root, as `@xmlns` / `@xmlns:prefix` entries.
fn namespace_entries(root: Node<'_, '_>) -> Map {
    let mut entries = Map::new();
    for namespace in root.namespaces() {
        match namespace.name() {
            Some("xml") => {}
            Some(prefix) => {
                entries.insert(format!("@xmlns:{}", prefix), Value::from(namespace.uri()));
            }
            None => {
                entries.insert("@xmlns", Value::from(namespace.uri()));
            }
        }
    }
    entries
}

/// Decodes one node: attributes first, then content, then the merge of the two.
fn parse_node(node: Node<'_, '_>, options: &DecodeOptions) -> Value {
    let mut attributes = parse_attributes(node, options);
    let value = parse_value(node, options);

    if attributes.is_empty() {
        return value;
    }

    match value {
        // Content keys win over attribute keys with the same name.
        Value::Map(map) => {
            for (key, entry) in map {
                attributes.insert(key, entry);
            }
        }
        scalar => {
            attributes.insert(TEXT_KEY, scalar);
        }
    }
    Value::Map(attributes)
}

// TODO: only attributes get numeric coercion, element text stays a string. Kept for
// compatibility with existing consumers; decide whether text should be coerced too.
fn parse_attributes(node: Node<'_, '_>, options: &DecodeOptions) -> Map {
    let mut attributes = Map::new();
    for attribute in node.attributes() {
        let name = node
            .document()
            .input_text()
            .get(attribute.range_qname())
            .unwrap_or(attribute.name());
        let raw = attribute.value();
        let value = if options.type_cast_attributes && utils::is_digits(raw) {
            Number::from_digits(raw)
                .map(Value::Number)
                .unwrap_or_else(|| Value::from(raw))
        } else {
            Value::from(raw)
        };
        attributes.insert(format!("{}{}", ATTRIBUTE_PREFIX, name), value);
    }
    attributes
}

/// Accumulated children under one name.
enum Slot {
    /// Placed by an `<item key="...">` element
    Keyed(Value),
    /// Every same-named sibling, in document order
    Repeated(Vec<Value>),
}

impl Slot {
    fn push(&mut self, value: Value) {
        match self {
            Slot::Repeated(values) => values.push(value),
            Slot::Keyed(previous) => {
                let previous = std::mem::take(previous);
                *self = Slot::Repeated(vec![previous, value]);
            }
        }
    }
}

fn parse_value(node: Node<'_, '_>, options: &DecodeOptions) -> Value {
    let children: Vec<Node<'_, '_>> = content_children(node).collect();

    if children.is_empty() {
        let text = if node.is_text() { node.text().unwrap_or_default() } else { "" };
        return Value::Text(text.to_string());
    }

    if let [only] = children.as_slice()
        && only.is_text()
    {
        return Value::Text(only.text().unwrap_or_default().to_string());
    }

    let mut slots: Vec<(String, Slot)> = Vec::new();
    for child in children {
        let name = node_name(child);
        let value = parse_node(child, options);

        if name == ITEM_ELEMENT
            && let Some(key) = value.as_map().and_then(|m| m.get("@key")).map(key_text)
        {
            let content = value
                .as_map()
                .and_then(|m| m.get(TEXT_KEY))
                .cloned()
                .unwrap_or(value);
            match slots.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => *slot = Slot::Keyed(content),
                None => slots.push((key, Slot::Keyed(content))),
            }
            continue;
        }

        match slots.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => slot.push(value),
            None => slots.push((name, Slot::Repeated(vec![value]))),
        }
    }

    let mut map = Map::new();
    for (key, slot) in slots {
        let value = match slot {
            Slot::Keyed(value) => value,
            Slot::Repeated(mut values) if values.len() == 1 && !options.as_collection => {
                values.remove(0)
            }
            Slot::Repeated(values) => Value::List(values),
        };
        map.insert(key, value);
    }
    Value::Map(map)
}

/// Element and text children. Comments and processing instructions never count, and
/// whitespace-only text is dropped when the node also has element children.
fn content_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    let has_elements = node.children().any(|c| c.is_element());
    node.children().filter(move |child| {
        if child.is_element() {
            return true;
        }
        child.is_text()
            && !(has_elements && child.text().is_some_and(|t| t.trim().is_empty()))
    })
}

fn has_content(node: Node<'_, '_>) -> bool {
    content_children(node).next().is_some()
}

fn node_name(node: Node<'_, '_>) -> String {
    if node.is_text() {
        return MIXED_TEXT_KEY.to_string();
    }
    qualified_name(node).to_string()
}

/// The element name as written in the source, prefix included.
fn qualified_name<'input>(node: Node<'_, 'input>) -> &'input str {
    let input = node.document().input_text();
    input
        .get(node.range().start..)
        .and_then(|tag| tag.strip_prefix('<'))
        .and_then(|tag| {
            tag.split(|c: char| c.is_whitespace() || c == '/' || c == '>')
                .next()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or(node.tag_name().name())
}

fn key_text(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => format!("{:?}", other),
    }
}
