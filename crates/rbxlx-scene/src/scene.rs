//! A raw document paired with the tree built from it.

use rbxlx_dom::RawDocument;

use crate::codec::EditOutcome;
use crate::edit::{self, Edit};
use crate::path::{self, NodePath};
use crate::tree::SceneTree;
use crate::Result;

/// An RBXLX document and its scene tree, kept in step.
///
/// Edits return a new `Scene`; the receiver is never modified, so earlier
/// snapshots stay valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// The lossless document, used for export.
    pub document: RawDocument,
    /// The navigable tree, used for display and lookups.
    pub tree: SceneTree,
}

impl Scene {
    /// Parse RBXLX text into a document and its tree.
    pub fn parse(xml: &str) -> Result<Self> {
        let document = RawDocument::parse(xml)?;
        let tree = SceneTree::build(&document)?;
        Ok(Self { document, tree })
    }

    /// Parse RBXLX from UTF-8 bytes.
    pub fn parse_bytes(xml: &[u8]) -> Result<Self> {
        let document = RawDocument::parse_bytes(xml)?;
        let tree = SceneTree::build(&document)?;
        Ok(Self { document, tree })
    }

    /// Render the document back to RBXLX text.
    pub fn to_xml_string(&self) -> Result<String> {
        Ok(self.document.to_xml_string()?)
    }

    /// Path to the node with `id`; root-only if there is none.
    pub fn resolve_path(&self, id: &str) -> NodePath {
        path::resolve_path(&self.tree, id)
    }

    /// Edit one property of the node at `path`.
    pub fn edit_property(
        &self,
        path: &NodePath,
        locator: &str,
        value: &str,
    ) -> Result<(Self, EditOutcome)> {
        let edit = edit::edit_property(&self.document, &self.tree, path, locator, value)?;
        Ok(Self::from_edit(edit))
    }

    /// Replace the script body of the node at `path`.
    pub fn edit_script_body(&self, path: &NodePath, content: &str) -> Result<(Self, EditOutcome)> {
        let edit = edit::edit_script_body(&self.document, &self.tree, path, content)?;
        Ok(Self::from_edit(edit))
    }

    fn from_edit(edit: Edit) -> (Self, EditOutcome) {
        let scene = Self {
            document: edit.document,
            tree: edit.tree,
        };
        (scene, edit.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const PLACE: &str = r#"<roblox><Item class="Part" referent="P"><Properties>
        <string name="Name">Block</string>
        <bool name="Anchored">false</bool>
    </Properties></Item></roblox>"#;

    #[test]
    fn test_edit_returns_new_snapshot() {
        let scene = Scene::parse(PLACE).unwrap();
        let path = scene.resolve_path("P");

        let (edited, outcome) = scene.edit_property(&path, "bool.Anchored", "true").unwrap();
        assert_eq!(outcome, EditOutcome::Applied);
        assert_ne!(edited, scene);

        let reparsed = Scene::parse(&edited.to_xml_string().unwrap()).unwrap();
        assert_eq!(reparsed, edited);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(Scene::parse("<roblox>"), Err(Error::Document(_))));
    }

    #[test]
    fn test_duplicate_referents_rejected() {
        let result = Scene::parse(r#"<roblox><Item referent="A"/><Item referent="A"/></roblox>"#);
        assert!(matches!(result, Err(Error::DuplicateReferent(_))));
    }
}
