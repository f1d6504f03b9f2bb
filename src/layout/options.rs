//! Word grouping options and thresholds.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default pattern for filler tokens: dot leaders, dashes and whitespace.
pub const DEFAULT_IGNORE_PATTERN: &str = r"^[\s.\-]+$";

/// Proximity limits in backend coordinate units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityThresholds {
    /// Maximum horizontal gap between adjacent words of a line
    pub word: f32,
    /// Reserved for a vertical-center distance test; not used by the grouper
    pub line: f32,
    /// Maximum slope between a candidate's center and the line's center
    pub line_slope: f32,
    /// Maximum vertical gap between a new line and its group
    pub group: f32,
    /// Maximum height difference between a candidate and the line
    pub height: f32,
}

impl ProximityThresholds {
    pub fn with_word(mut self, word: f32) -> Self {
        self.word = word;
        self
    }

    pub fn with_line_slope(mut self, line_slope: f32) -> Self {
        self.line_slope = line_slope;
        self
    }

    pub fn with_group(mut self, group: f32) -> Self {
        self.group = group;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        Self {
            word: 35.0,
            line: 12.0,
            line_slope: 1.0,
            group: 7.0,
            height: 10.0,
        }
    }
}

/// A pattern that must match a word's entire text.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    source: String,
    regex: Regex,
}

impl IgnorePattern {
    /// Compile a pattern; it is anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Whether the whole text matches.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for IgnorePattern {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_PATTERN).expect("default ignore pattern is valid")
    }
}

/// Options for the word grouper.
#[derive(Debug, Clone)]
pub struct GroupingOptions {
    /// Proximity limits
    pub thresholds: ProximityThresholds,

    /// Filler tokens trimmed from line ends (None disables trimming)
    pub ignore_pattern: Option<IgnorePattern>,

    /// Fuse groups separated by a group made only of filler tokens
    pub merge_ghost_groups: bool,
}

impl GroupingOptions {
    /// Create new grouping options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set proximity thresholds.
    pub fn with_thresholds(mut self, thresholds: ProximityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the filler pattern.
    pub fn with_ignore_pattern(mut self, pattern: IgnorePattern) -> Self {
        self.ignore_pattern = Some(pattern);
        self
    }

    /// Keep every word, including filler tokens at line ends.
    pub fn without_ignore_pattern(mut self) -> Self {
        self.ignore_pattern = None;
        self
    }

    /// Enable or disable the ghost group merge pass.
    pub fn with_ghost_merge(mut self, merge: bool) -> Self {
        self.merge_ghost_groups = merge;
        self
    }

    /// Whether a text is a filler token.
    pub fn is_ignorable(&self, text: &str) -> bool {
        self.ignore_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            thresholds: ProximityThresholds::default(),
            ignore_pattern: Some(IgnorePattern::default()),
            merge_ghost_groups: false,
        }
    }
}
