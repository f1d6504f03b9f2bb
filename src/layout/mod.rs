//! Word grouping module.
//!
//! Clusters the OCR words of a page region into lines and line groups and
//! trims filler tokens such as dot leaders.

mod cleanup;
mod grouper;
mod options;

pub use cleanup::{clean_words, merge_ghost_groups};
pub use grouper::{is_in_line, WordGrouper};
pub use options::{GroupingOptions, IgnorePattern, ProximityThresholds, DEFAULT_IGNORE_PATTERN};
