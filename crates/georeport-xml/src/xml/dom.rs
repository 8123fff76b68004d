//! Output node tree and its serialization through quick-xml.
//!
//! Each encode call builds one tree and writes it once; nothing here is shared between calls.

use crate::error::Result;
use crate::xml::EncodeOptions;
use crate::xml::utils::{escape_attribute, escape_text};
use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// A node in the output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing the value of an existing one with the same name.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn append_child(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn append_cdata(&mut self, text: impl Into<String>) {
        self.children.push(Node::CData(text.into()));
    }

    /// Child elements, skipping text and CDATA.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

/// Serializes `root` as a complete document with an XML declaration.
pub fn write_document(root: &Element, options: &EncodeOptions) -> Result<String> {
    let mut declaration = Writer::new(Vec::new());
    let standalone = options.standalone.map(|s| if s { "yes" } else { "no" });
    declaration.write_event(Event::Decl(BytesDecl::new(
        &options.version,
        Some(&options.encoding),
        standalone,
    )))?;

    let mut body = if options.format_output {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };
    write_element(&mut body, root)?;

    let mut out = declaration.into_inner();
    out.push(b'\n');
    out.extend(body.into_inner());
    out.push(b'\n');
    String::from_utf8(out).map_err(|e| crate::XmlError::Write(e.to_string()))
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        let value = escape_attribute(value);
        start.push_attribute(Attribute::from((name.as_bytes(), value.as_bytes())));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(escape_text(text))))?
            }
            Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
