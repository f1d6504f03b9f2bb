//! Rendering module for converting extraction results to output formats.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{outline_tree, to_text};
