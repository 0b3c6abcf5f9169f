//! Rbxlx - Roblox RBXLX place file parsing and editing library.
//!
//! This crate provides a unified interface to the rbxlx crates.
//!
//! # Crates
//!
//! - [`rbxlx_dom`] - Order-preserving XML document model, parser and writer
//! - [`rbxlx_scene`] - Value codec, scene tree, paths and edits
//!
//! # Example
//!
//! ```no_run
//! use rbxlx::prelude::*;
//!
//! let xml = std::fs::read_to_string("place.rbxlx")?;
//! let scene = Scene::parse(&xml)?;
//!
//! for node in scene.tree.iter() {
//!     println!("{} [{}]", node.name, node.class);
//! }
//!
//! let path = scene.resolve_path("RBX8A1F00C8");
//! let (scene, _) = scene.edit_script_body(&path, "print('hello')")?;
//! std::fs::write(rbxlx::DEFAULT_EXPORT_FILE_NAME, scene.to_xml_string()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use rbxlx_dom as dom;
pub use rbxlx_scene as scene;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use rbxlx_dom::{RawDocument, RawNode};
    pub use rbxlx_scene::{
        EditOutcome, NodePath, Property, PropertyLocator, PropertyValue, Scene, SceneTree,
        TreeNode,
    };
}

// Re-export the boundary operations at the crate root
pub use rbxlx_scene::{edit_property, edit_script_body, parse, resolve_path, serialize};

/// File extension of exported place files.
pub const EXPORT_EXTENSION: &str = "rbxlx";

/// MIME type of exported place files.
pub const EXPORT_MIME_TYPE: &str = "application/xml";

/// File name used when an export target is not given.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "modified.rbxlx";

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
