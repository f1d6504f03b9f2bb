//! Outline construction module.
//!
//! Turns flat anchor detections into the nested outline tree and splits the
//! document into the regions owned by each node.

mod builder;
mod patterns;
mod span;

pub use builder::OutlineBuilder;
pub use patterns::{
    AnchorPatterns, CHAPTER_PATTERN, CONTENTS_PATTERN, PART_PATTERN, SECTION_PATTERN,
};
pub use span::{resolve_spans, OutlineSpan, PageRegion, YBounds};
