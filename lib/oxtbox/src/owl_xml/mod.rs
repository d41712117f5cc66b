//! [OWL/XML](https://www.w3.org/TR/owl2-xml-serialization/) syntax for class expressions,
//! axioms and whole class models.
//!
//! Documents are read into a small element tree that is then decoded recursively.

mod parser;
mod serializer;

pub use parser::OwlXmlParser;
pub use serializer::OwlXmlSerializer;

use crate::error::{MalformedKind, MalformedStructure, OwlXmlError};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

/// One XML element: its local name, attributes, text content and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `<Name>` for error reporting.
    fn tag(&self) -> String {
        format!("<{}>", self.name)
    }

    fn push_events<'a>(&'a self, output: &mut Vec<Event<'a>>) {
        let start = BytesStart::new(self.name.as_str()).with_attributes(
            self.attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        if self.children.is_empty() && self.text.is_empty() {
            output.push(Event::Empty(start));
            return;
        }
        output.push(Event::Start(start));
        if !self.text.is_empty() {
            output.push(Event::Text(BytesText::new(&self.text)));
        }
        for child in &self.children {
            child.push_events(output);
        }
        output.push(Event::End(BytesEnd::new(self.name.as_str())));
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), OwlXmlError> {
        let mut output = Vec::new();
        self.push_events(&mut output);
        for event in output {
            writer.write_event(event)?;
        }
        Ok(())
    }

    /// Reads the root element of a document.
    ///
    /// Element names are taken without their namespace prefix. Whitespace-only text
    /// between elements is dropped.
    fn read(read: impl BufRead) -> Result<Self, OwlXmlError> {
        let mut reader = Reader::from_reader(read);
        reader.config_mut().expand_empty_elements = true;
        let mut buffer = Vec::new();
        let mut stack = Vec::<Element>::new();
        loop {
            match reader.read_event_into(&mut buffer)? {
                Event::Start(event) => {
                    let mut element = Element::new(utf8(event.local_name().as_ref())?);
                    for attribute in event.attributes() {
                        let attribute = attribute?;
                        let value = attribute.decode_and_unescape_value(reader.decoder())?;
                        element
                            .attributes
                            .push((utf8(attribute.key.as_ref())?.to_owned(), value.into_owned()));
                    }
                    stack.push(element);
                }
                Event::End(_) => {
                    let Some(mut element) = stack.pop() else {
                        return Err(unexpected_end().into());
                    };
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Text(event) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&event.unescape()?);
                    }
                }
                Event::CData(event) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(utf8(&event)?);
                    }
                }
                Event::Eof => return Err(unexpected_end().into()),
                _ => (),
            }
            buffer.clear();
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, MalformedStructure> {
    std::str::from_utf8(bytes).map_err(|e| {
        MalformedStructure::new("document", MalformedKind::InvalidValue, e.to_string())
    })
}

fn unexpected_end() -> MalformedStructure {
    MalformedStructure::new(
        "document",
        MalformedKind::MissingProperty,
        "unexpected end of the XML document",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_nested_elements() {
        let root = Element::read(
            b"<?xml version=\"1.0\"?>\n<owl:A xmlns:owl=\"http://www.w3.org/2002/07/owl#\">\n  <B k=\"a&amp;b\"/>\n  <C>x &lt; y</C>\n</owl:A>"
                .as_slice(),
        )
        .unwrap();
        assert_eq!(root.name, "A");
        assert!(root.text.is_empty());
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].attribute("k"), Some("a&b"));
        assert_eq!(root.children[1].text, "x < y");
    }

    #[test]
    fn writes_empty_elements() {
        let element = Element::new("A")
            .with_child(Element::new("B").with_attribute("IRI", "http://example.org/b"))
            .with_child(Element::new("C").with_text("1 < 2"));
        let mut writer = Writer::new(Vec::new());
        element.write(&mut writer).unwrap();
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            "<A><B IRI=\"http://example.org/b\"/><C>1 &lt; 2</C></A>"
        );
    }

    #[test]
    fn truncated_document_is_an_error() {
        assert!(Element::read(b"<A><B/>".as_slice()).is_err());
        assert!(Element::read(b"".as_slice()).is_err());
    }
}
