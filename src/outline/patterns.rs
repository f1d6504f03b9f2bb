//! Regular expressions that locate outline anchors in the scanned text.

use regex::Regex;

use crate::error::Result;
use crate::model::NodeKind;

/// Default pattern for the table of contents heading.
pub const CONTENTS_PATTERN: &str = r"(?i)(?:table\s*of\s*)?contents";
/// Default pattern for part headings.
pub const PART_PATTERN: &str = r"(?i)^part(?:$|\b)";
/// Default pattern for chapter headings.
pub const CHAPTER_PATTERN: &str = r"(?i)^chap(?:$|\.|ter)";
/// Default pattern for section headings.
pub const SECTION_PATTERN: &str = r"(?i)^sect(?:$|\.|ion)";

/// One pattern per outline level.
#[derive(Debug, Clone)]
pub struct AnchorPatterns {
    pub contents: Regex,
    pub part: Regex,
    pub chapter: Regex,
    pub section: Regex,
}

impl AnchorPatterns {
    /// Replace the table of contents pattern.
    pub fn with_contents(mut self, pattern: &str) -> Result<Self> {
        self.contents = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the part pattern.
    pub fn with_part(mut self, pattern: &str) -> Result<Self> {
        self.part = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the chapter pattern.
    pub fn with_chapter(mut self, pattern: &str) -> Result<Self> {
        self.chapter = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the section pattern.
    pub fn with_section(mut self, pattern: &str) -> Result<Self> {
        self.section = Regex::new(pattern)?;
        Ok(self)
    }

    /// The pattern for a level.
    pub fn for_kind(&self, kind: NodeKind) -> &Regex {
        match kind {
            NodeKind::TableOfContents => &self.contents,
            NodeKind::Part => &self.part,
            NodeKind::Chapter => &self.chapter,
            NodeKind::Section => &self.section,
        }
    }
}

impl Default for AnchorPatterns {
    fn default() -> Self {
        Self {
            contents: Regex::new(CONTENTS_PATTERN).expect("valid contents pattern"),
            part: Regex::new(PART_PATTERN).expect("valid part pattern"),
            chapter: Regex::new(CHAPTER_PATTERN).expect("valid chapter pattern"),
            section: Regex::new(SECTION_PATTERN).expect("valid section pattern"),
        }
    }
}
