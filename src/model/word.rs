//! OCR word records and the break table that turns them into text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{BoundingBox, Element};

/// Kind of whitespace the OCR engine detected after a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    /// No break detected
    #[default]
    Unknown,
    /// Regular space
    Space,
    /// Wide space
    SureSpace,
    /// Line-wrapping space
    EolSureSpace,
    /// Hyphen at the end of a line
    Hyphen,
    /// Line break ending a paragraph
    LineBreak,
}

/// Detected break annotation as stored in scan files.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DetectedBreak {
    #[serde(rename = "type", default)]
    pub kind: BreakType,
}

/// Extra word properties reported by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordProperty {
    #[serde(default)]
    pub detected_break: Option<DetectedBreak>,
}

/// A word exactly as the scanning backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    /// Recognized text
    pub text: String,
    /// Quadrilateral around the word
    pub bounding_box: BoundingBox,
    /// Break annotation
    #[serde(default)]
    pub property: WordProperty,
}

impl WordRecord {
    /// Create a record without break annotation.
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            property: WordProperty::default(),
        }
    }

    /// Attach a break annotation.
    pub fn with_break(mut self, kind: BreakType) -> Self {
        self.property.detected_break = Some(DetectedBreak { kind });
        self
    }

    /// The detected break, `Unknown` when absent.
    pub fn break_type(&self) -> BreakType {
        self.property
            .detected_break
            .map(|b| b.kind)
            .unwrap_or_default()
    }
}

/// Maps break classifications to the literal text appended after a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakMap {
    entries: HashMap<BreakType, String>,
}

impl BreakMap {
    /// An empty table: every break renders as "".
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Set the text for one break type.
    pub fn with_entry(mut self, kind: BreakType, text: impl Into<String>) -> Self {
        self.entries.insert(kind, text.into());
        self
    }

    /// Text for a break type; unmapped types render as "".
    pub fn resolve(&self, kind: BreakType) -> &str {
        self.entries.get(&kind).map(String::as_str).unwrap_or("")
    }
}

impl Default for BreakMap {
    fn default() -> Self {
        Self::empty()
            .with_entry(BreakType::Unknown, "")
            .with_entry(BreakType::Space, " ")
            .with_entry(BreakType::SureSpace, " ")
            .with_entry(BreakType::EolSureSpace, "\n")
            .with_entry(BreakType::LineBreak, "\n")
            .with_entry(BreakType::Hyphen, "-")
    }
}

/// Atomic OCR token with its trailing break already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    text: String,
    bounding_box: BoundingBox,
    break_text: String,
}

impl Word {
    /// Create a word.
    pub fn new(
        text: impl Into<String>,
        bounding_box: BoundingBox,
        break_text: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            break_text: break_text.into(),
        }
    }

    /// Build a word from a backend record using the given break table.
    pub fn from_record(record: &WordRecord, breaks: &BreakMap) -> Self {
        Self::new(
            record.text.clone(),
            record.bounding_box,
            breaks.resolve(record.break_type()),
        )
    }

    /// Recognized text without break text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }
}

impl Element for Word {
    fn bounds(&self) -> Result<BoundingBox> {
        Ok(self.bounding_box)
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn break_text(&self) -> &str {
        &self.break_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_break_map() {
        let map = BreakMap::default();
        assert_eq!(map.resolve(BreakType::Unknown), "");
        assert_eq!(map.resolve(BreakType::Space), " ");
        assert_eq!(map.resolve(BreakType::SureSpace), " ");
        assert_eq!(map.resolve(BreakType::EolSureSpace), "\n");
        assert_eq!(map.resolve(BreakType::LineBreak), "\n");
        assert_eq!(map.resolve(BreakType::Hyphen), "-");
    }

    #[test]
    fn test_custom_break_map() {
        let map = BreakMap::empty().with_entry(BreakType::LineBreak, " ");
        assert_eq!(map.resolve(BreakType::LineBreak), " ");
        assert_eq!(map.resolve(BreakType::Space), "");
    }

    #[test]
    fn test_word_record_deserialize() {
        let json = r#"{
            "text": "Chapter",
            "bounding_box": {"vertices": [{"x": 10, "y": 5}, {"x": 80, "y": 5}, {"x": 80, "y": 25}, {"y": 25}]},
            "property": {"detected_break": {"type": "SPACE"}}
        }"#;
        let record: WordRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.text, "Chapter");
        assert_eq!(record.break_type(), BreakType::Space);
        assert_eq!(record.bounding_box.vertices[3].x, 0.0);

        let word = Word::from_record(&record, &BreakMap::default());
        assert_eq!(word.break_text(), " ");
        assert_eq!(word.text(), "Chapter");
    }

    #[test]
    fn test_word_record_without_property() {
        let json = r#"{"text": "1", "bounding_box": {"vertices": [{}, {}, {}, {}]}}"#;
        let record: WordRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.break_type(), BreakType::Unknown);
    }

    #[test]
    fn test_word_geometry() {
        let word = Word::new("Hi", BoundingBox::from_rect(0.0, 0.0, 40.0, 12.0), " ");
        assert_eq!(word.width().unwrap(), 40.0);
        assert_eq!(word.height().unwrap(), 12.0);
        assert_eq!(word.slope().unwrap(), 0.0);
    }
}
