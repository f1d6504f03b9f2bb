//! Page regions owned by each outline node.

use serde::Serialize;

use crate::model::{Outline, OutlineNode};
use crate::options::RegionMode;

/// Vertical interval on the start page of a span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YBounds {
    /// Bottom of the start anchor
    pub top: f32,
    /// Top of the next anchor when it is on the same page
    pub bottom: Option<f32>,
}

/// Horizontal band of one page; open bounds reach the page edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageRegion {
    pub page: usize,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl PageRegion {
    fn full(page: usize) -> Self {
        Self {
            page,
            top: None,
            bottom: None,
        }
    }
}

/// The part of the document running from one outline node to the next.
#[derive(Debug, Clone, Copy)]
pub struct OutlineSpan<'a> {
    pub start: &'a OutlineNode,
    pub end: Option<&'a OutlineNode>,
}

impl<'a> OutlineSpan<'a> {
    pub fn new(start: &'a OutlineNode, end: Option<&'a OutlineNode>) -> Self {
        Self { start, end }
    }

    /// Bounds of the span on its start page.
    pub fn y_bounds(&self) -> YBounds {
        let bottom = self
            .end
            .filter(|end| end.page() == self.start.page())
            .map(|end| end.min_y());

        YBounds {
            top: self.start.max_y(),
            bottom,
        }
    }

    /// Regions covered by the span, page by page.
    ///
    /// `page_count` bounds open-ended spans. With [`RegionMode::AnchorPage`]
    /// only the start page region is returned.
    pub fn regions(&self, page_count: usize, mode: RegionMode) -> Vec<PageRegion> {
        let start_page = self.start.page();
        let bounds = self.y_bounds();
        let mut regions = vec![PageRegion {
            page: start_page,
            top: Some(bounds.top),
            bottom: bounds.bottom,
        }];

        if mode == RegionMode::AnchorPage || bounds.bottom.is_some() {
            return regions;
        }

        match self.end {
            Some(end) if end.page() > start_page => {
                regions.extend((start_page + 1..end.page()).map(PageRegion::full));
                regions.push(PageRegion {
                    page: end.page(),
                    top: None,
                    bottom: Some(end.min_y()),
                });
            }
            Some(_) => {}
            None => regions.extend((start_page + 1..page_count).map(PageRegion::full)),
        }

        regions
    }
}

/// Pair every node in reading order with the node that follows it.
pub fn resolve_spans(outline: &Outline) -> Vec<OutlineSpan<'_>> {
    let nodes = outline.flatten();
    nodes
        .iter()
        .enumerate()
        .map(|(index, &start)| OutlineSpan::new(start, nodes.get(index + 1).copied()))
        .collect()
}
