//! Plain text rendering for outlines and extraction results.

use std::fmt::Write;

use crate::error::Result;
use crate::extract::ExtractedDocument;
use crate::model::{Outline, OutlineNode};

/// Render the outline as an indented tree, one node per line.
pub fn outline_tree(outline: &Outline) -> String {
    let mut output = String::new();
    write_node(&mut output, &outline.root, 0);
    output
}

fn write_node(output: &mut String, node: &OutlineNode, depth: usize) {
    let _ = writeln!(output, "{}{}", "  ".repeat(depth), node);
    for child in &node.children {
        write_node(output, child, depth + 1);
    }
}

/// Convert an extraction result to plain text: the outline tree followed by
/// the grouped text of every node.
pub fn to_text(doc: &ExtractedDocument) -> Result<String> {
    let mut output = outline_tree(&doc.outline);
    let mut current = None;

    for section in &doc.sections {
        if current != Some(section.node_index) {
            current = Some(section.node_index);
            let _ = write!(output, "\n== {} ==\n", section.heading);
        }

        let text = section.text();
        if !text.is_empty() {
            let _ = write!(output, "\n{}\n", text);
        }
    }

    Ok(output.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{SectionContent, TextBlock};
    use crate::geometry::BoundingBox;
    use crate::model::{Anchor, NodeKind};
    use crate::outline::PageRegion;

    fn node(kind: NodeKind, page: usize) -> OutlineNode {
        OutlineNode::new(
            kind,
            Anchor::new(page, 0, 0, BoundingBox::from_rect(0.0, 0.0, 10.0, 10.0)),
        )
    }

    fn outline() -> Outline {
        let mut part = node(NodeKind::Part, 1);
        part.add(node(NodeKind::Chapter, 2).with_title("Origins"));
        let mut root = node(NodeKind::TableOfContents, 0);
        root.add(part);
        Outline::new(root)
    }

    #[test]
    fn test_outline_tree() {
        assert_eq!(
            outline_tree(&outline()),
            "Table of Contents\n  Part 1\n    Chapter 1: Origins\n"
        );
    }

    #[test]
    fn test_to_text() {
        let block = |text: &str| TextBlock {
            lines: vec![text.to_string()],
            text: text.to_string(),
        };
        let section = |page: usize, text: &str| SectionContent {
            node_index: 2,
            kind: NodeKind::Chapter,
            number: Some(1),
            heading: "Chapter 1: Origins".to_string(),
            region: PageRegion {
                page,
                top: None,
                bottom: None,
            },
            blocks: vec![block(text)],
        };

        let doc = ExtractedDocument {
            page_count: 4,
            outline: outline(),
            sections: vec![section(2, "It began."), section(3, "It went on.")],
            diagnostics: Vec::new(),
        };

        let text = to_text(&doc).unwrap();
        assert!(text.starts_with("Table of Contents\n"));
        assert_eq!(text.matches("== Chapter 1: Origins ==").count(), 1);
        assert!(text.ends_with("It began.\n\nIt went on."));
    }
}
