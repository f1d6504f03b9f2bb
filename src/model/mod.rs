//! Document model types for scanned outline extraction.
//!
//! Words come from the scanning backend; lines and line groups are built
//! from them by the grouper; outline nodes are built from anchor matches.

mod group;
mod outline;
mod word;

pub use group::{Group, Line, LineGroup};
pub use outline::{Anchor, NodeKind, Outline, OutlineNode, ReadingOrder};
pub use word::{BreakMap, BreakType, DetectedBreak, Word, WordProperty, WordRecord};
