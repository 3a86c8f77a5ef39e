//! Generic attributed-element tree built from an XML document.
//!
//! Only what the annotation format needs is kept: tag names, attributes,
//! inline text and child order. Comments, processing instructions and the
//! XML declaration are dropped.

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Manga109Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// Trimmed inline text, `None` when the element has no text content.
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }
}

/// Parse an XML document into its root `Element`.
pub fn parse_element_tree(xml: &str) -> Result<Element, Manga109Error> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Manga109Error::ParseError(format!("{e} (at byte {})", reader.error_position()))
        })?;

        match event {
            Event::Start(e) => stack.push(start_element(&e)?),
            Event::Empty(e) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml already rejects mismatched end tags.
                let element = stack.pop().ok_or_else(|| {
                    Manga109Error::ParseError("closing tag without opening tag".into())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|err| Manga109Error::ParseError(format!("bad text content: {err}")))?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|err| Manga109Error::ParseError(format!("bad CDATA: {err}")))?;
                append_text(&mut stack, text.trim());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Manga109Error::ParseError(format!(
            "unexpected end of document: <{}> is not closed",
            open.tag
        )));
    }

    root.ok_or_else(|| Manga109Error::ParseError("document has no root element".into()))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, Manga109Error> {
    let name = e.name();
    let tag = std::str::from_utf8(name.as_ref())
        .map_err(|err| Manga109Error::ParseError(format!("tag name is not UTF-8: {err}")))?
        .to_string();

    let mut element = Element::new(tag);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            Manga109Error::ParseError(format!("bad attribute on <{}>: {err}", element.tag))
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| {
                Manga109Error::ParseError(format!("attribute name is not UTF-8: {err}"))
            })?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| {
                Manga109Error::ParseError(format!("bad value for attribute '{key}': {err}"))
            })?
            .into_owned();
        element.attributes.insert(key, value);
    }

    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), Manga109Error> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(Manga109Error::ParseError(format!(
                "second root element <{}>",
                element.tag
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Text outside the root element is ignored.
fn append_text(stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(current) = stack.last_mut() {
        match current.text {
            Some(ref mut existing) => existing.push_str(text),
            None => current.text = Some(text.to_string()),
        }
    }
}
