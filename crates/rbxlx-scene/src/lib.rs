//! Scene tree, property codec and edit engine for Roblox RBXLX files.
//!
//! This crate sits on top of [`rbxlx_dom`]. It turns the raw document into a
//! navigable [`SceneTree`] of items with decoded properties and script bodies,
//! and applies edits back into the document without disturbing anything else.
//!
//! # Example
//!
//! ```no_run
//! use rbxlx_scene::{parse, serialize, resolve_path, edit_property};
//!
//! let xml = std::fs::read_to_string("place.rbxlx")?;
//! let scene = parse(&xml)?;
//!
//! let path = resolve_path(&scene.tree, "RBX1A2B3C");
//! let edit = edit_property(&scene.document, &scene.tree, &path, "Vector3.size", "4, 1, 2")?;
//!
//! std::fs::write("modified.rbxlx", serialize(&edit.document)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
mod edit;
mod error;
mod ids;
mod path;
mod property;
mod scene;
mod tree;

pub use codec::{decode, encode, CompoundType, EditOutcome, FragmentKind, PropertyValue};
pub use edit::{apply_property_edit, apply_tree_edit, edit_property, edit_script_body, Edit};
pub use error::{Error, Result};
pub use path::{resolve_path, NodePath, ROOT_MARKER};
pub use property::{Property, PropertyLocator, SCRIPT_SOURCE_LOCATOR};
pub use scene::Scene;
pub use tree::{Iter, SceneTree, TreeNode};

pub use rbxlx_dom::{RawDocument, RawNode};

/// Parse RBXLX text into a document and its tree.
pub fn parse(xml: &str) -> Result<Scene> {
    Scene::parse(xml)
}

/// Render a document back to RBXLX text.
pub fn serialize(document: &RawDocument) -> Result<String> {
    Ok(document.to_xml_string()?)
}
