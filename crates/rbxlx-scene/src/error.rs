//! Error types for scene building and editing.

use thiserror::Error;

/// Errors that can occur when building or editing a scene.
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be parsed or written.
    #[error("{0}")]
    Document(#[from] rbxlx_dom::Error),

    /// Two items declare the same referent, so paths would be ambiguous.
    #[error("duplicate referent {0:?}")]
    DuplicateReferent(String),

    /// A path segment did not resolve to an item.
    #[error("could not find node {segment:?}")]
    PathNotFound { segment: String },

    /// The item has no property group of this type.
    #[error("property type {group:?} missing")]
    PropertyGroupNotFound { group: String },

    /// The property group has no entry with this name.
    #[error("property {name:?} not found in {group:?} group")]
    PropertyNotFound { group: String, name: String },

    /// A property locator was not of the form `<type>.<name>`.
    #[error("invalid property locator {0:?}: expected <type>.<name>")]
    InvalidLocator(String),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, Error>;
