//! Order-preserving XML document model for Roblox RBXLX place files.
//!
//! RBXLX is Roblox's XML serialization of a scene. This crate reads it into a
//! [`RawDocument`]: a generic element tree that keeps attributes, element text
//! and CDATA sections apart, so the document can be edited and written back
//! without normalizing how each value was stored.
//!
//! The crate knows nothing about Roblox classes or property types; see the
//! `rbxlx-scene` crate for that layer.
//!
//! # Example
//!
//! ```no_run
//! use rbxlx_dom::RawDocument;
//!
//! let xml = std::fs::read_to_string("place.rbxlx")?;
//! let document = RawDocument::parse(&xml)?;
//!
//! for item in document.root().children_named("Item") {
//!     println!("{:?}", item.attribute("class"));
//! }
//!
//! let exported = document.to_xml_string()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod error;
mod node;
mod parser;
mod writer;

pub use document::RawDocument;
pub use error::{Error, Result};
pub use node::RawNode;
