//! The raw RBXLX document.

use std::io::Write;

use crate::parser::parse_xml_to_node;
use crate::writer::write_document;
use crate::{Error, RawNode, Result};

/// A parsed RBXLX document.
///
/// Wraps the `<roblox>` document element. Everything below it (items, their
/// property containers, `Meta`, `SharedStrings` and so on) is kept verbatim,
/// so writing the document back reproduces its structure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RawDocument {
    root: RawNode,
}

impl RawDocument {
    /// Tag of the RBXLX document element.
    pub const ROOT_TAG: &'static str = "roblox";

    /// Wrap an existing document element.
    pub fn new(root: RawNode) -> Self {
        Self { root }
    }

    /// Parse an RBXLX document from XML text.
    ///
    /// Fails on malformed XML or when the document element is not `<roblox>`.
    /// There is no recovery mode.
    pub fn parse(xml: &str) -> Result<Self> {
        let root = parse_xml_to_node(xml)?;

        if root.tag != Self::ROOT_TAG {
            return Err(Error::UnexpectedRoot {
                expected: Self::ROOT_TAG.to_string(),
                actual: root.tag,
            });
        }

        tracing::debug!(
            top_level = root.children.len(),
            "parsed RBXLX document element"
        );

        Ok(Self { root })
    }

    /// Parse an RBXLX document from UTF-8 bytes.
    pub fn parse_bytes(xml: &[u8]) -> Result<Self> {
        Self::parse(std::str::from_utf8(xml)?)
    }

    /// The `<roblox>` document element.
    pub fn root(&self) -> &RawNode {
        &self.root
    }

    /// Mutable access to the document element.
    pub fn root_mut(&mut self) -> &mut RawNode {
        &mut self.root
    }

    /// Consume the document, returning its document element.
    pub fn into_root(self) -> RawNode {
        self.root
    }

    /// Convert to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write XML to a writer.
    pub fn write_xml<W: Write>(&self, writer: W) -> Result<()> {
        write_document(&self.root, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<roblox xmlns:xmime="http://www.w3.org/2005/05/xmlmime" version="4">
    <Meta name="ExplicitAutoJoints">true</Meta>
    <External>null</External>
    <Item class="Workspace" referent="RBX0">
        <Properties>
            <string name="Name">Workspace</string>
            <token name="StreamingPauseMode" value="0"/>
        </Properties>
        <Item class="Script" referent="RBX1">
            <Properties>
                <ProtectedString name="Source"><![CDATA[if a[b[1]]]]><![CDATA[>0 then print("x & y") end]]></ProtectedString>
                <string name="Name">Main</string>
            </Properties>
        </Item>
    </Item>
</roblox>"#;

    #[test]
    fn test_parse_rejects_other_roots() {
        let result = RawDocument::parse("<model/>");
        assert!(matches!(result, Err(Error::UnexpectedRoot { .. })));
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let result = RawDocument::parse_bytes(&[0x3c, 0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Utf8(_))));
    }

    #[test]
    fn test_round_trip_is_structurally_equal() {
        let original = RawDocument::parse(PLACE).unwrap();
        let xml = original.to_xml_string().unwrap();
        let reparsed = RawDocument::parse(&xml).unwrap();

        assert_eq!(original, reparsed);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
    }

    #[test]
    fn test_round_trip_is_idempotent_text() {
        let once = RawDocument::parse(PLACE).unwrap().to_xml_string().unwrap();
        let twice = RawDocument::parse(&once).unwrap().to_xml_string().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preserves_script_cdata_with_terminator() {
        let document = RawDocument::parse(PLACE).unwrap();
        let xml = document.to_xml_string().unwrap();
        let reparsed = RawDocument::parse(&xml).unwrap();

        let script = reparsed.root().children_named("Item").next().unwrap()
            .child_named("Item").unwrap()
            .child_named("Properties").unwrap()
            .child_named("ProtectedString").unwrap();
        assert_eq!(
            script.cdata.as_deref(),
            Some(r#"if a[b[1]]>0 then print("x & y") end"#)
        );
    }

    #[test]
    fn test_round_trip_keeps_padded_text() {
        let document = RawDocument::parse(
            r#"<roblox><Item class="TextLabel"><Properties><string name="Text"> Score: </string></Properties></Item></roblox>"#,
        )
        .unwrap();
        let xml = document.to_xml_string().unwrap();
        assert!(xml.contains("<string name=\"Text\"> Score: </string>"));
        assert_eq!(RawDocument::parse(&xml).unwrap(), document);
    }

    #[test]
    fn test_preserves_attribute_order() {
        let document = RawDocument::parse(PLACE).unwrap();
        let keys: Vec<_> = document.root().attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["xmlns:xmime", "version"]);
    }
}
