use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::element::XmlElement;

/// Errors that can occur while parsing XML into an [`XmlElement`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into an [`XmlElement`] tree.
///
/// Text and CDATA fragments of one element are concatenated as written;
/// an element whose text is blank once complete carries no text.
pub fn parse(xml: &[u8]) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut tree = TreeBuilder::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => tree.open(element_start(&e, &reader)?),
            Event::Empty(e) => tree.attach(element_start(&e, &reader)?)?,
            Event::Text(e) => tree.text(&e.unescape()?),
            Event::CData(e) => tree.text(std::str::from_utf8(e.as_ref())?),
            Event::End(e) => tree.close(e.name())?,
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    tree.finish()
}

/// Parse an XML file into an [`XmlElement`] tree.
pub fn parse_file(path: &Path) -> Result<XmlElement, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

/// Open elements plus the finished root.
#[derive(Debug, Default)]
struct TreeBuilder {
    open: Vec<XmlElement>,
    root: Option<XmlElement>,
}

impl TreeBuilder {
    fn open(&mut self, element: XmlElement) {
        self.open.push(element);
    }

    /// Text outside the root (whitespace around it) is dropped.
    fn text(&mut self, fragment: &str) {
        if let Some(current) = self.open.last_mut() {
            current.push_text(fragment);
        }
    }

    fn close(&mut self, name: QName<'_>) -> Result<(), ParseError> {
        let mut element = self.open.pop().ok_or_else(|| {
            ParseError::Malformed("encountered closing tag without open tag".to_string())
        })?;
        let tag = qname_to_string(name)?;
        if tag != element.tag {
            return Err(ParseError::Malformed(format!(
                "closing tag `{tag}` does not match open element `{}`",
                element.tag
            )));
        }
        if element.text.as_deref().is_some_and(|text| text.trim().is_empty()) {
            element.text = None;
        }
        self.attach(element)
    }

    fn attach(&mut self, element: XmlElement) -> Result<(), ParseError> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(element);
        } else if self.root.is_none() {
            self.root = Some(element);
        } else {
            return Err(ParseError::Malformed(format!(
                "multiple top-level elements found (second is `{}`)",
                element.tag
            )));
        }
        Ok(())
    }

    fn finish(self) -> Result<XmlElement, ParseError> {
        if let Some(unclosed) = self.open.last() {
            return Err(ParseError::Malformed(format!(
                "unclosed element `{}` at end of document",
                unclosed.tag
            )));
        }
        self.root
            .ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
    }
}

fn element_start(
    e: &quick_xml::events::BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<XmlElement, ParseError> {
    let mut element = XmlElement::new(qname_to_string(e.name())?);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.decode_and_unescape_value(reader.decoder())?;
        element
            .attributes
            .insert(qname_to_string(attr.key)?, value.into_owned());
    }
    Ok(element)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}
