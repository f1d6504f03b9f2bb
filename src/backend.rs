//! Scanning backend abstraction layer.
//!
//! Provides a trait-based interface over an OCR result, isolating the
//! outline and grouping logic from the format the scan is stored in.
//! [`ScannedDocument`] is the bundled implementation, loaded from JSON
//! shaped after common cloud OCR responses (pages, blocks, paragraphs,
//! words).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::model::{Anchor, BreakMap, Word, WordRecord};

/// Page dimensions in backend units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// A word whose text matched a search pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub page: usize,
    pub block: usize,
    pub paragraph: usize,
    pub bounding_box: BoundingBox,
    /// The matched word's full text
    pub text: String,
}

impl SearchResult {
    /// Turn the match into an outline anchor.
    pub fn into_anchor(self) -> Anchor {
        Anchor::new(self.page, self.block, self.paragraph, self.bounding_box).with_text(self.text)
    }
}

/// Abstract interface for OCR scan access.
pub trait ScanBackend {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Dimensions of a page.
    fn page_size(&self, page: usize) -> Result<PageSize>;

    /// Every word whose text matches `regex`, in no particular order.
    fn find_regex_matches(&self, regex: &Regex) -> Vec<SearchResult>;

    /// Words of a page whose center y lies in `[top, bottom)`, in reading
    /// order. Open bounds reach the page edge.
    fn words_within(
        &self,
        page: usize,
        top: Option<f32>,
        bottom: Option<f32>,
    ) -> Result<Vec<Word>>;
}

/// One OCR paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannedParagraph {
    #[serde(default)]
    pub words: Vec<WordRecord>,
}

/// One OCR block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannedBlock {
    #[serde(default)]
    pub paragraphs: Vec<ScannedParagraph>,
}

/// One OCR page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannedPage {
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub blocks: Vec<ScannedBlock>,
}

impl ScannedPage {
    /// Iterate `(block, paragraph, word)` in storage order.
    fn records(&self) -> impl Iterator<Item = (usize, usize, &WordRecord)> {
        self.blocks.iter().enumerate().flat_map(|(b, block)| {
            block
                .paragraphs
                .iter()
                .enumerate()
                .flat_map(move |(p, paragraph)| paragraph.words.iter().map(move |w| (b, p, w)))
        })
    }
}

/// In-memory [`ScanBackend`] over a full OCR result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannedDocument {
    #[serde(default)]
    pub pages: Vec<ScannedPage>,
    #[serde(skip)]
    break_map: BreakMap,
}

impl ScannedDocument {
    /// Create a document from pages.
    pub fn new(pages: Vec<ScannedPage>) -> Self {
        Self {
            pages,
            break_map: BreakMap::default(),
        }
        .normalized()
    }

    /// Parse a JSON scan.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        Ok(doc.normalized())
    }

    /// Parse a JSON scan from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Self = serde_json::from_reader(reader)?;
        Ok(doc.normalized())
    }

    /// Load a JSON scan file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Replace the break table used to build words.
    pub fn with_break_map(mut self, break_map: BreakMap) -> Self {
        self.break_map = break_map;
        self
    }

    /// Total number of words across all pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|page| page.records().count()).sum()
    }

    fn page(&self, page: usize) -> Result<&ScannedPage> {
        self.pages
            .get(page)
            .ok_or(Error::PageOutOfRange(page, self.pages.len()))
    }

    /// NFC-normalize every word's text.
    fn normalized(mut self) -> Self {
        for page in &mut self.pages {
            for block in &mut page.blocks {
                for paragraph in &mut block.paragraphs {
                    for word in &mut paragraph.words {
                        word.text = word.text.nfc().collect();
                    }
                }
            }
        }
        self
    }
}

impl ScanBackend for ScannedDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, page: usize) -> Result<PageSize> {
        let page = self.page(page)?;
        Ok(PageSize {
            width: page.width,
            height: page.height,
        })
    }

    fn find_regex_matches(&self, regex: &Regex) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for (index, page) in self.pages.iter().enumerate() {
            for (block, paragraph, record) in page.records() {
                if regex.is_match(&record.text) {
                    results.push(SearchResult {
                        page: index,
                        block,
                        paragraph,
                        bounding_box: record.bounding_box,
                        text: record.text.clone(),
                    });
                }
            }
        }
        results
    }

    fn words_within(
        &self,
        page: usize,
        top: Option<f32>,
        bottom: Option<f32>,
    ) -> Result<Vec<Word>> {
        let words = self
            .page(page)?
            .records()
            .filter(|(_, _, record)| {
                let center = record.bounding_box.extent().center_y();
                top.map_or(true, |top| center >= top)
                    && bottom.map_or(true, |bottom| center < bottom)
            })
            .map(|(_, _, record)| Word::from_record(record, &self.break_map))
            .collect();
        Ok(words)
    }
}
