//! Error types for RBXLX document parsing and writing.

use thiserror::Error;

/// Errors that can occur when reading or writing an RBXLX document.
#[derive(Debug, Error)]
pub enum Error {
    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The input contained no element at all.
    #[error("no root element found in XML")]
    NoRoot,

    /// The document element is not the RBXLX container.
    #[error("unexpected root element: expected <{expected}>, got <{actual}>")]
    UnexpectedRoot { expected: String, actual: String },
}

/// Result type for RBXLX document operations.
pub type Result<T> = std::result::Result<T, Error>;
