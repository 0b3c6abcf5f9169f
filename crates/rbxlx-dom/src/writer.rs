//! Render a [`RawNode`] tree back to XML text.

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Error, RawNode, Result};

/// Write the XML declaration followed by `root` and its subtree.
pub(crate) fn write_document<W: Write>(root: &RawNode, writer: W) -> Result<()> {
    let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| Error::Xml(e.to_string()))?;

    write_element(&mut xml_writer, root)
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, node: &RawNode) -> Result<()> {
    let mut elem = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if node.is_self_closing() {
        return writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::Xml(e.to_string()));
    }

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::Xml(e.to_string()))?;

    if let Some(text) = &node.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    if let Some(cdata) = &node.cdata {
        for section in cdata_sections(cdata) {
            writer
                .write_event(Event::CData(BytesCData::new(section)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }
    }

    for child in &node.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
        .map_err(|e| Error::Xml(e.to_string()))
}

/// Split a CDATA body so no section contains the `]]>` terminator.
///
/// Each `]]>` is cut between `]]` and `>`; the parser concatenates adjacent
/// sections back into the original body.
fn cdata_sections(body: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = body;

    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);

    sections
}
