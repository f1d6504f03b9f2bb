//! Outline tree types: the table of contents root, parts, chapters and sections.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;

/// Level of an outline node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The root, anchored on the "Table of Contents" heading
    TableOfContents,
    Part,
    Chapter,
    Section,
}

impl NodeKind {
    /// The level a node of this kind must be attached under.
    pub fn parent_kind(self) -> Option<NodeKind> {
        match self {
            NodeKind::TableOfContents => None,
            NodeKind::Part => Some(NodeKind::TableOfContents),
            NodeKind::Chapter => Some(NodeKind::Part),
            NodeKind::Section => Some(NodeKind::Chapter),
        }
    }

    /// Display name of the parent level, empty for the root.
    pub fn parent_label(self) -> &'static str {
        self.parent_kind().map(NodeKind::label).unwrap_or("")
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::TableOfContents => "Table of Contents",
            NodeKind::Part => "Part",
            NodeKind::Chapter => "Chapter",
            NodeKind::Section => "Section",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of comparing two anchors in reading order.
///
/// Anchors at the exact same position cannot be ordered; callers must deal
/// with `Ambiguous` explicitly instead of treating it as "not before".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingOrder {
    Before,
    After,
    Ambiguous,
}

/// A regex match from the scanning backend marking a heading candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Page index (0-based)
    pub page: usize,
    /// Block index within the page
    pub block: usize,
    /// Paragraph index within the block
    pub paragraph: usize,
    /// Box of the matched word
    pub bounding_box: BoundingBox,
    /// Matched text
    #[serde(default)]
    pub text: String,
}

impl Anchor {
    /// Create an anchor.
    pub fn new(page: usize, block: usize, paragraph: usize, bounding_box: BoundingBox) -> Self {
        Self {
            page,
            block,
            paragraph,
            bounding_box,
            text: String::new(),
        }
    }

    /// Set the matched text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Topmost vertex y.
    pub fn min_y(&self) -> f32 {
        self.bounding_box.top()
    }

    /// Bottommost vertex y.
    pub fn max_y(&self) -> f32 {
        self.bounding_box.bottom()
    }

    /// Compare by page, block, paragraph, then top coordinate.
    pub fn reading_order(&self, other: &Anchor) -> ReadingOrder {
        let ordering = self
            .page
            .cmp(&other.page)
            .then(self.block.cmp(&other.block))
            .then(self.paragraph.cmp(&other.paragraph));

        match ordering {
            Ordering::Less => ReadingOrder::Before,
            Ordering::Greater => ReadingOrder::After,
            Ordering::Equal => match self.min_y().partial_cmp(&other.min_y()) {
                Some(Ordering::Less) => ReadingOrder::Before,
                Some(Ordering::Greater) => ReadingOrder::After,
                Some(Ordering::Equal) | None => ReadingOrder::Ambiguous,
            },
        }
    }

    /// Total order used for sorting detections; ties stay adjacent.
    pub(crate) fn sort_cmp(&self, other: &Anchor) -> Ordering {
        self.page
            .cmp(&other.page)
            .then(self.block.cmp(&other.block))
            .then(self.paragraph.cmp(&other.paragraph))
            .then(self.min_y().total_cmp(&other.min_y()))
    }

    pub(crate) fn ambiguous_error(&self) -> Error {
        Error::AmbiguousOrder {
            page: self.page,
            block: self.block,
            paragraph: self.paragraph,
        }
    }
}

/// One detected heading in the outline tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Level of the node
    pub kind: NodeKind,
    /// The detection this node was built from
    pub anchor: Anchor,
    /// Ordinal among siblings (1-based)
    pub number: Option<usize>,
    /// Heading title, when known
    pub title: Option<String>,
    /// Longer description, when known
    pub description: Option<String>,
    /// Child nodes in reading order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a node without number or children.
    pub fn new(kind: NodeKind, anchor: Anchor) -> Self {
        Self {
            kind,
            anchor,
            number: None,
            title: None,
            description: None,
            children: Vec::new(),
        }
    }

    /// Pre-assign the ordinal.
    pub fn with_number(mut self, number: usize) -> Self {
        self.number = Some(number);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn page(&self) -> usize {
        self.anchor.page
    }

    pub fn min_y(&self) -> f32 {
        self.anchor.min_y()
    }

    pub fn max_y(&self) -> f32 {
        self.anchor.max_y()
    }

    /// Append a child, numbering it after its siblings unless it already has a number.
    pub fn add(&mut self, mut child: OutlineNode) -> &mut Self {
        if child.number.is_none() {
            child.number = Some(self.children.len() + 1);
        }
        self.children.push(child);
        self
    }

    /// Reading-order comparison of the two anchors.
    pub fn is_before(&self, other: &OutlineNode) -> ReadingOrder {
        self.anchor.reading_order(&other.anchor)
    }

    /// Find the node of `parent_kind` that `item` should be appended to.
    ///
    /// Walks down from `self`, at each level picking the last child that
    /// precedes `item`, until a node of the requested kind is reached.
    pub fn find_parent_for(
        &mut self,
        item: &OutlineNode,
        parent_kind: NodeKind,
    ) -> Result<&mut OutlineNode> {
        let mut target = self.children.len().checked_sub(1);
        for (index, child) in self.children.iter().enumerate() {
            match item.is_before(child) {
                ReadingOrder::Before => {
                    target = index.checked_sub(1);
                    break;
                }
                ReadingOrder::After => {}
                ReadingOrder::Ambiguous => return Err(item.anchor.ambiguous_error()),
            }
        }

        let index = target.ok_or_else(|| item.mismatch_error())?;
        let parent = &mut self.children[index];
        if parent.kind == parent_kind {
            return Ok(parent);
        }
        parent.find_parent_for(item, parent_kind)
    }

    pub(crate) fn mismatch_error(&self) -> Error {
        Error::StructuralMismatch {
            kind: self.kind,
            page: self.anchor.page,
            block: self.anchor.block,
            paragraph: self.anchor.paragraph,
        }
    }

    /// This node followed by every descendant, depth first.
    pub fn flatten(&self) -> Vec<&OutlineNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.flatten());
        }
        nodes
    }

    /// Number of nodes in this subtree, including this one.
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::total_nodes).sum::<usize>()
    }
}

impl fmt::Display for OutlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(number) = self.number {
            write!(f, " {}", number)?;
        }
        if let Some(ref title) = self.title {
            write!(f, ": {}", title)?;
        }
        Ok(())
    }
}

/// A fully built outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// The table of contents root
    pub root: OutlineNode,
}

impl Outline {
    pub fn new(root: OutlineNode) -> Self {
        Self { root }
    }

    /// All nodes in reading order, root first.
    pub fn flatten(&self) -> Vec<&OutlineNode> {
        self.root.flatten()
    }

    /// Number of nodes below the root.
    pub fn total_items(&self) -> usize {
        self.root.total_nodes() - 1
    }

    /// Whether anything besides the root was detected.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(page: usize, block: usize, paragraph: usize, top: f32) -> Anchor {
        Anchor::new(
            page,
            block,
            paragraph,
            BoundingBox::from_rect(10.0, top, 90.0, top + 20.0),
        )
    }

    fn node(kind: NodeKind, page: usize, block: usize, top: f32) -> OutlineNode {
        OutlineNode::new(kind, anchor(page, block, 0, top))
    }

    #[test]
    fn test_reading_order_priorities() {
        let a = anchor(1, 5, 5, 500.0);
        assert_eq!(a.reading_order(&anchor(2, 0, 0, 0.0)), ReadingOrder::Before);
        assert_eq!(a.reading_order(&anchor(1, 4, 9, 900.0)), ReadingOrder::After);
        assert_eq!(a.reading_order(&anchor(1, 5, 6, 0.0)), ReadingOrder::Before);
        assert_eq!(a.reading_order(&anchor(1, 5, 5, 499.0)), ReadingOrder::After);
        assert_eq!(a.reading_order(&anchor(1, 5, 5, 501.0)), ReadingOrder::Before);
    }

    #[test]
    fn test_equal_keys_are_ambiguous() {
        let a = anchor(3, 1, 2, 40.0);
        let b = anchor(3, 1, 2, 40.0);
        assert_eq!(a.reading_order(&b), ReadingOrder::Ambiguous);
        assert_eq!(b.reading_order(&a), ReadingOrder::Ambiguous);
    }

    #[test]
    fn test_nan_coordinate_is_ambiguous() {
        let a = anchor(0, 0, 0, f32::NAN);
        assert_eq!(a.reading_order(&anchor(0, 0, 0, 1.0)), ReadingOrder::Ambiguous);
    }

    #[test]
    fn test_add_assigns_sequential_numbers() {
        let mut root = node(NodeKind::TableOfContents, 0, 0, 0.0);
        root.add(node(NodeKind::Part, 1, 0, 0.0));
        root.add(node(NodeKind::Part, 2, 0, 0.0).with_number(7));
        root.add(node(NodeKind::Part, 3, 0, 0.0));

        let numbers: Vec<Option<usize>> = root.children.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![Some(1), Some(7), Some(3)]);
    }

    #[test]
    fn test_find_parent_for_picks_last_preceding() {
        let mut root = node(NodeKind::TableOfContents, 0, 0, 0.0);
        root.add(node(NodeKind::Part, 1, 0, 0.0));
        root.add(node(NodeKind::Part, 5, 0, 0.0));

        let chapter = node(NodeKind::Chapter, 3, 0, 0.0);
        let parent = root.find_parent_for(&chapter, NodeKind::Part).unwrap();
        assert_eq!(parent.page(), 1);

        let late = node(NodeKind::Chapter, 9, 0, 0.0);
        let parent = root.find_parent_for(&late, NodeKind::Part).unwrap();
        assert_eq!(parent.page(), 5);
    }

    #[test]
    fn test_find_parent_for_descends_levels() {
        let mut root = node(NodeKind::TableOfContents, 0, 0, 0.0);
        let mut part = node(NodeKind::Part, 1, 0, 0.0);
        part.add(node(NodeKind::Chapter, 2, 0, 0.0));
        part.add(node(NodeKind::Chapter, 4, 0, 0.0));
        root.add(part);

        let section = node(NodeKind::Section, 3, 0, 0.0);
        let parent = root.find_parent_for(&section, NodeKind::Chapter).unwrap();
        assert_eq!(parent.kind, NodeKind::Chapter);
        assert_eq!(parent.page(), 2);
    }

    #[test]
    fn test_find_parent_for_without_preceding_sibling() {
        let mut root = node(NodeKind::TableOfContents, 0, 0, 0.0);
        root.add(node(NodeKind::Part, 4, 0, 0.0));

        let early = node(NodeKind::Chapter, 2, 0, 0.0);
        let err = root.find_parent_for(&early, NodeKind::Part).unwrap_err();
        assert!(matches!(
            err,
            Error::StructuralMismatch {
                kind: NodeKind::Chapter,
                page: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_find_parent_for_missing_level() {
        let mut root = node(NodeKind::TableOfContents, 0, 0, 0.0);
        root.add(node(NodeKind::Part, 1, 0, 0.0));

        let section = node(NodeKind::Section, 2, 0, 0.0);
        let err = root.find_parent_for(&section, NodeKind::Chapter).unwrap_err();
        assert!(matches!(err, Error::StructuralMismatch { .. }));
    }

    #[test]
    fn test_find_parent_for_ambiguous_sibling() {
        let mut root = node(NodeKind::TableOfContents, 0, 0, 0.0);
        root.add(node(NodeKind::Part, 1, 0, 0.0));

        let clash = node(NodeKind::Chapter, 1, 0, 0.0);
        let err = root.find_parent_for(&clash, NodeKind::Part).unwrap_err();
        assert!(matches!(err, Error::AmbiguousOrder { page: 1, .. }));
    }

    #[test]
    fn test_flatten_is_preorder() {
        let mut root = node(NodeKind::TableOfContents, 0, 0, 0.0);
        let mut part = node(NodeKind::Part, 1, 0, 0.0);
        part.add(node(NodeKind::Chapter, 2, 0, 0.0));
        root.add(part);
        root.add(node(NodeKind::Part, 3, 0, 0.0));

        let pages: Vec<usize> = root.flatten().iter().map(|n| n.page()).collect();
        assert_eq!(pages, vec![0, 1, 2, 3]);
        assert_eq!(Outline::new(root).total_items(), 3);
    }

    #[test]
    fn test_display() {
        let chapter = node(NodeKind::Chapter, 1, 0, 0.0)
            .with_number(2)
            .with_title("Atoms");
        assert_eq!(chapter.to_string(), "Chapter 2: Atoms");
        assert_eq!(node(NodeKind::Part, 1, 0, 0.0).to_string(), "Part");
    }
}
