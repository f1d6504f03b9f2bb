//! Error types for untoc library.

use std::io;
use thiserror::Error;

use crate::model::NodeKind;

/// Result type alias for untoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading scan files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The scan file could not be decoded.
    #[error("Invalid scan data: {0}")]
    Json(#[from] serde_json::Error),

    /// A user supplied pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// No table of contents heading was found in the document.
    #[error("Could not find a table of contents starting point")]
    MissingAnchor,

    /// An anchor has no ancestor of the level it must nest under.
    #[error(
        "{kind} anchor on page {page} (block {block}, paragraph {paragraph}) has no preceding {parent}",
        parent = .kind.parent_label()
    )]
    StructuralMismatch {
        kind: NodeKind,
        page: usize,
        block: usize,
        paragraph: usize,
    },

    /// Two anchors share page, block, paragraph and vertical position.
    #[error("Anchors on page {page} (block {block}, paragraph {paragraph}) cannot be ordered")]
    AmbiguousOrder {
        page: usize,
        block: usize,
        paragraph: usize,
    },

    /// Geometry was requested from a line or group without children.
    #[error("Element has no children and therefore no bounds")]
    EmptyElement,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}
