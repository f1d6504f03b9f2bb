//! The extraction pipeline: anchors, outline tree, regions, grouped text.

use rayon::prelude::*;
use serde::Serialize;

use crate::backend::{PageSize, ScanBackend};
use crate::error::{Error, Result};
use crate::geometry::Element;
use crate::layout::{GroupingOptions, WordGrouper};
use crate::model::{Anchor, LineGroup, NodeKind, Outline, Word};
use crate::options::ExtractOptions;
use crate::outline::{resolve_spans, OutlineBuilder, PageRegion};

/// A paragraph-like group of lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    /// Text of each line, trailing whitespace removed
    pub lines: Vec<String>,
    /// Lines joined with newlines
    pub text: String,
}

impl TextBlock {
    fn from_group(group: &LineGroup) -> Self {
        let lines: Vec<String> = group
            .children()
            .iter()
            .map(|line| line.text().trim_end().to_string())
            .collect();
        let text = lines.join("\n");
        Self { lines, text }
    }
}

/// Grouped text of one page region owned by an outline node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionContent {
    /// Position of the owning node in the flattened outline
    pub node_index: usize,
    pub kind: NodeKind,
    pub number: Option<usize>,
    /// Display label of the owning node
    pub heading: String,
    pub region: PageRegion,
    pub blocks: Vec<TextBlock>,
}

impl SectionContent {
    /// All block text joined by blank lines.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Result of a full extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    /// Number of pages in the scan
    pub page_count: usize,
    pub outline: Outline,
    /// Region contents in outline order, then page order
    pub sections: Vec<SectionContent>,
    /// Anchors skipped in lenient mode
    pub diagnostics: Vec<String>,
}

impl ExtractedDocument {
    /// Sections owned by the node at `node_index` in the flattened outline.
    pub fn sections_for(&self, node_index: usize) -> impl Iterator<Item = &SectionContent> {
        self.sections
            .iter()
            .filter(move |section| section.node_index == node_index)
    }
}

/// Words of one region, collected before clustering.
struct RegionWork {
    node_index: usize,
    kind: NodeKind,
    number: Option<usize>,
    heading: String,
    region: PageRegion,
    size: PageSize,
    words: Vec<Word>,
}

impl RegionWork {
    fn cluster(self, grouping: &GroupingOptions) -> Result<SectionContent> {
        let grouper = WordGrouper::new(self.size.width, self.size.height, grouping);
        let groups = grouper.group(self.words)?;

        Ok(SectionContent {
            node_index: self.node_index,
            kind: self.kind,
            number: self.number,
            heading: self.heading,
            region: self.region,
            blocks: groups.iter().map(TextBlock::from_group).collect(),
        })
    }
}

/// Runs the extraction pipeline over a scan backend.
pub struct OutlineExtractor<'a, B: ScanBackend> {
    backend: &'a B,
    options: &'a ExtractOptions,
}

impl<'a, B: ScanBackend> OutlineExtractor<'a, B> {
    /// Create an extractor.
    pub fn new(backend: &'a B, options: &'a ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// Anchor detections for one outline level.
    pub fn find_anchors(&self, kind: NodeKind) -> Vec<Anchor> {
        self.backend
            .find_regex_matches(self.options.patterns.for_kind(kind))
            .into_iter()
            .map(|result| result.into_anchor())
            .collect()
    }

    /// Build the outline tree. Skipped anchors (lenient mode) are returned
    /// alongside.
    pub fn build_outline(&self) -> Result<(Outline, Vec<Error>)> {
        let contents = self.find_anchors(NodeKind::TableOfContents);
        let mut builder =
            OutlineBuilder::from_candidates(contents)?.with_error_mode(self.options.error_mode);

        builder.build_parts(self.find_anchors(NodeKind::Part))?;
        builder.build_chapters(self.find_anchors(NodeKind::Chapter))?;
        builder.build_sections(self.find_anchors(NodeKind::Section))?;

        Ok(builder.into_parts())
    }

    /// Build the outline and group the text of every region it owns.
    pub fn extract(&self) -> Result<ExtractedDocument> {
        let (outline, skipped) = self.build_outline()?;
        let page_count = self.backend.page_count();

        let work = self.collect_regions(&outline, page_count)?;
        log::debug!(
            "Clustering {} regions for {} outline nodes",
            work.len(),
            outline.total_items() + 1
        );

        let grouping = &self.options.grouping;
        let sections = if self.options.parallel {
            work.into_par_iter()
                .map(|region| region.cluster(grouping))
                .collect::<Result<Vec<_>>>()?
        } else {
            work.into_iter()
                .map(|region| region.cluster(grouping))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(ExtractedDocument {
            page_count,
            outline,
            sections,
            diagnostics: skipped.iter().map(ToString::to_string).collect(),
        })
    }

    fn collect_regions(&self, outline: &Outline, page_count: usize) -> Result<Vec<RegionWork>> {
        let mut work = Vec::new();

        for (node_index, span) in resolve_spans(outline).iter().enumerate() {
            for region in span.regions(page_count, self.options.region_mode) {
                let words = self
                    .backend
                    .words_within(region.page, region.top, region.bottom)?;
                if words.is_empty() {
                    log::debug!("Region on page {} is empty", region.page);
                    continue;
                }

                work.push(RegionWork {
                    node_index,
                    kind: span.start.kind,
                    number: span.start.number,
                    heading: span.start.to_string(),
                    region,
                    size: self.backend.page_size(region.page)?,
                    words,
                });
            }
        }

        Ok(work)
    }
}
