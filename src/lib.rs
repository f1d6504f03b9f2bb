//! # untoc
//!
//! Outline and section text extraction for scanned books.
//!
//! This library takes the OCR result of a scanned textbook (words with
//! bounding boxes, grouped into pages, blocks and paragraphs), finds the
//! table of contents and the Part / Chapter / Section headings, assembles
//! them into a nested outline, and groups the text each heading owns into
//! lines and paragraphs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untoc::{extract_file, render};
//!
//! fn main() -> untoc::Result<()> {
//!     // Load an OCR scan and extract the outline
//!     let doc = extract_file("book.json")?;
//!
//!     // Print the outline tree
//!     println!("{}", render::outline_tree(&doc.outline));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Skew tolerant grouping**: Lines follow the slope between word centers
//! - **Strict or lenient outlines**: Misplaced headings fail or are skipped
//! - **Region modes**: Sections span pages or stay on their heading's page
//! - **Parallel processing**: Uses Rayon to group regions concurrently

pub mod backend;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod options;
pub mod outline;
pub mod render;

// Re-export commonly used types
pub use backend::{PageSize, ScanBackend, ScannedDocument, SearchResult};
pub use error::{Error, Result};
pub use extract::{ExtractedDocument, OutlineExtractor, SectionContent, TextBlock};
pub use geometry::{BoundingBox, Element, Extent, Point};
pub use layout::{GroupingOptions, IgnorePattern, ProximityThresholds, WordGrouper};
pub use model::{
    Anchor, BreakMap, BreakType, Line, LineGroup, NodeKind, Outline, OutlineNode, ReadingOrder,
    Word, WordRecord,
};
pub use options::{ErrorMode, ExtractOptions, RegionMode};
pub use outline::{AnchorPatterns, OutlineBuilder, PageRegion};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Extract the outline and section text from a JSON scan file.
///
/// # Arguments
///
/// * `path` - Path to the JSON scan
///
/// # Example
///
/// ```no_run
/// use untoc::extract_file;
///
/// let doc = extract_file("book.json").unwrap();
/// println!("Outline items: {}", doc.outline.total_items());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    extract_file_with_options(path, &ExtractOptions::default())
}

/// Extract from a JSON scan file with custom options.
///
/// # Example
///
/// ```no_run
/// use untoc::{extract_file_with_options, ExtractOptions, RegionMode};
///
/// let options = ExtractOptions::new()
///     .lenient()
///     .with_region_mode(RegionMode::AnchorPage);
/// let doc = extract_file_with_options("book.json", &options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<ExtractedDocument> {
    let scan = ScannedDocument::open(path)?;
    extract(&scan, options)
}

/// Extract from JSON scan text.
pub fn extract_json(json: &str, options: &ExtractOptions) -> Result<ExtractedDocument> {
    let scan = ScannedDocument::from_json(json)?;
    extract(&scan, options)
}

/// Extract from a reader yielding JSON scan data.
pub fn extract_reader<R: Read>(reader: R, options: &ExtractOptions) -> Result<ExtractedDocument> {
    let scan = ScannedDocument::from_reader(reader)?;
    extract(&scan, options)
}

/// Extract from any scanning backend.
pub fn extract<B: ScanBackend>(backend: &B, options: &ExtractOptions) -> Result<ExtractedDocument> {
    OutlineExtractor::new(backend, options).extract()
}

/// Build only the outline tree from a JSON scan file.
///
/// # Example
///
/// ```no_run
/// use untoc::outline_file;
///
/// let outline = outline_file("book.json").unwrap();
/// for node in outline.flatten() {
///     println!("{}", node);
/// }
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let scan = ScannedDocument::open(path)?;
    let options = ExtractOptions::default();
    let (outline, _) = OutlineExtractor::new(&scan, &options).build_outline()?;
    Ok(outline)
}

/// Convert a JSON scan file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = extract_file(path)?;
    render::to_text(&doc)
}

/// Convert a JSON scan file to extraction JSON.
///
/// # Example
///
/// ```no_run
/// use untoc::{to_json, JsonFormat};
///
/// let json = to_json("book.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("outline.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = extract_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for extracting outlines from scans.
///
/// # Example
///
/// ```no_run
/// use untoc::Untoc;
///
/// let text = Untoc::new()
///     .lenient()
///     .anchor_page_only()
///     .extract("book.json")?
///     .to_text()?;
/// # Ok::<(), untoc::Error>(())
/// ```
pub struct Untoc {
    options: ExtractOptions,
}

impl Untoc {
    /// Create a new Untoc builder.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Skip misplaced headings instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Group regions on the rayon pool.
    pub fn parallel(mut self) -> Self {
        self.options = self.options.with_parallel(true);
        self
    }

    /// Only read text from the page each heading is on.
    pub fn anchor_page_only(mut self) -> Self {
        self.options = self.options.with_region_mode(RegionMode::AnchorPage);
        self
    }

    /// Set anchor patterns.
    pub fn with_patterns(mut self, patterns: AnchorPatterns) -> Self {
        self.options = self.options.with_patterns(patterns);
        self
    }

    /// Set grouping options.
    pub fn with_grouping(mut self, grouping: GroupingOptions) -> Self {
        self.options = self.options.with_grouping(grouping);
        self
    }

    /// Current options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract from a JSON scan file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<UntocResult> {
        let document = extract_file_with_options(path, &self.options)?;
        Ok(UntocResult { document })
    }

    /// Extract from JSON scan text.
    pub fn extract_json(self, json: &str) -> Result<UntocResult> {
        let document = extract_json(json, &self.options)?;
        Ok(UntocResult { document })
    }
}

impl Default for Untoc {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an extraction.
pub struct UntocResult {
    /// The extracted outline and sections
    pub document: ExtractedDocument,
}

impl UntocResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// The outline as an indented tree.
    pub fn outline_tree(&self) -> String {
        render::outline_tree(&self.document.outline)
    }

    /// Get the document.
    pub fn document(&self) -> &ExtractedDocument {
        &self.document
    }
}
