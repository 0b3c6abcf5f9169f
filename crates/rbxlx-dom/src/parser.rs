//! Parse XML text into a [`RawNode`] tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Error, RawNode, Result};

/// Parse XML text into its document element.
///
/// Declarations, comments, processing instructions and whitespace-only text
/// are dropped. Other text is kept verbatim, including surrounding spaces.
/// Adjacent CDATA sections in one element are concatenated.
pub(crate) fn parse_xml_to_node(xml: &str) -> Result<RawNode> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<RawNode> = Vec::new();
    let mut root: Option<RawNode> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(Error::Xml(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        };

        match event {
            Event::Start(e) => {
                stack.push(start_node(&e)?);
            }
            Event::Empty(e) => {
                // Self-closing element
                let node = start_node(&e)?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(node, &mut stack, &mut root)?;
                }
            }
            Event::Text(e) => {
                if let Some(node) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    if !text.trim().is_empty() {
                        node.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if let Some(node) = stack.last_mut() {
                    let body = e.into_inner();
                    let body = std::str::from_utf8(&body)?;
                    node.cdata.get_or_insert_with(String::new).push_str(body);
                }
            }
            Event::Eof => break,
            _ => {} // Ignore declarations, comments, doctypes and processing instructions
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml(format!("unclosed element <{}>", open.tag)));
    }

    root.ok_or(Error::NoRoot)
}

/// Build a node from a start tag, unescaping attribute values.
fn start_node(e: &BytesStart<'_>) -> Result<RawNode> {
    let tag = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut node = RawNode::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

/// Attach a finished node to its parent, or make it the document element.
fn attach(node: RawNode, stack: &mut [RawNode], root: &mut Option<RawNode>) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }

    if root.is_some() {
        return Err(Error::Xml(format!(
            "multiple root elements: found <{}> after the document element",
            node.tag
        )));
    }

    *root = Some(node);
    Ok(())
}
