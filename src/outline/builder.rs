//! Assembles flat anchor detections into the outline tree.
//!
//! Levels are built top-down: every Part first, then every Chapter, then
//! every Section. Each level is sorted into reading order before insertion,
//! so a node is always appended after the siblings that precede it.

use crate::error::{Error, Result};
use crate::model::{Anchor, NodeKind, Outline, OutlineNode, ReadingOrder};
use crate::options::ErrorMode;

/// Builds an [`Outline`] below a table of contents anchor.
#[derive(Debug)]
pub struct OutlineBuilder {
    root: OutlineNode,
    error_mode: ErrorMode,
    diagnostics: Vec<Error>,
}

impl OutlineBuilder {
    /// Start an outline at the given table of contents anchor.
    pub fn new(root: Anchor) -> Self {
        Self {
            root: OutlineNode::new(NodeKind::TableOfContents, root),
            error_mode: ErrorMode::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Start at the earliest of several table of contents detections.
    pub fn from_candidates(candidates: Vec<Anchor>) -> Result<Self> {
        let count = candidates.len();
        let root = candidates
            .into_iter()
            .min_by(|a, b| a.sort_cmp(b))
            .ok_or(Error::MissingAnchor)?;

        log::debug!(
            "Table of contents on page {} ({} candidates)",
            root.page,
            count
        );
        Ok(Self::new(root))
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Insert Part anchors below the root.
    pub fn build_parts(&mut self, anchors: Vec<Anchor>) -> Result<usize> {
        self.build_level(NodeKind::Part, anchors)
    }

    /// Insert Chapter anchors below their Parts.
    pub fn build_chapters(&mut self, anchors: Vec<Anchor>) -> Result<usize> {
        self.build_level(NodeKind::Chapter, anchors)
    }

    /// Insert Section anchors below their Chapters.
    pub fn build_sections(&mut self, anchors: Vec<Anchor>) -> Result<usize> {
        self.build_level(NodeKind::Section, anchors)
    }

    /// Anchors skipped in lenient mode, with the reason.
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// The tree built so far.
    pub fn root(&self) -> &OutlineNode {
        &self.root
    }

    /// Finish and return the outline.
    pub fn finish(self) -> Outline {
        Outline::new(self.root)
    }

    /// Finish and return the outline along with the skipped anchors.
    pub fn into_parts(self) -> (Outline, Vec<Error>) {
        (Outline::new(self.root), self.diagnostics)
    }

    /// Sort and insert one level. Returns the number of inserted nodes.
    fn build_level(&mut self, kind: NodeKind, mut anchors: Vec<Anchor>) -> Result<usize> {
        let Some(parent_kind) = kind.parent_kind() else {
            return Ok(0);
        };

        anchors.sort_by(|a, b| a.sort_cmp(b));

        let total = anchors.len();
        let mut inserted = 0;
        let mut previous: Option<Anchor> = None;

        for anchor in anchors {
            if anchor.reading_order(&self.root.anchor) == ReadingOrder::Before {
                log::debug!(
                    "Ignoring {} on page {} before the table of contents",
                    kind,
                    anchor.page
                );
                continue;
            }

            let duplicate = previous
                .as_ref()
                .is_some_and(|p| p.reading_order(&anchor) == ReadingOrder::Ambiguous);

            let result = if duplicate {
                Err(anchor.ambiguous_error())
            } else {
                previous = Some(anchor.clone());
                self.insert(OutlineNode::new(kind, anchor), parent_kind)
            };

            if self.handle(result)? {
                inserted += 1;
            }
        }

        log::debug!("Inserted {} of {} {} anchors", inserted, total, kind);
        Ok(inserted)
    }

    fn insert(&mut self, node: OutlineNode, parent_kind: NodeKind) -> Result<bool> {
        // Anchors before the root never get here.
        if node.is_before(&self.root) == ReadingOrder::Ambiguous {
            return Err(node.anchor.ambiguous_error());
        }

        if parent_kind == NodeKind::TableOfContents {
            self.root.add(node);
            return Ok(true);
        }

        let parent = self.root.find_parent_for(&node, parent_kind)?;
        parent.add(node);
        Ok(true)
    }

    fn handle(&mut self, result: Result<bool>) -> Result<bool> {
        match result {
            Err(err @ (Error::StructuralMismatch { .. } | Error::AmbiguousOrder { .. }))
                if self.error_mode == ErrorMode::Lenient =>
            {
                log::warn!("Skipping anchor: {}", err);
                self.diagnostics.push(err);
                Ok(false)
            }
            other => other,
        }
    }
}
