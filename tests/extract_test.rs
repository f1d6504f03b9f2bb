//! Integration tests for the extraction pipeline.

use std::io::Write;

use serde_json::{json, Value};
use untoc::{
    extract_file, extract_file_with_options, extract_json, render, Error, ExtractOptions,
    JsonFormat, NodeKind, RegionMode, ScanBackend, ScannedDocument, Untoc,
};

/// One OCR word as JSON, with a space break.
fn word(text: &str, left: f32, top: f32) -> Value {
    let width = 14.0 * text.chars().count() as f32;
    json!({
        "text": text,
        "bounding_box": {"vertices": [
            {"x": left, "y": top},
            {"x": left + width, "y": top},
            {"x": left + width, "y": top + 20.0},
            {"x": left, "y": top + 20.0}
        ]},
        "property": {"detected_break": {"type": "SPACE"}}
    })
}

/// A page whose blocks each hold one paragraph of lines.
fn page(blocks: &[&[(f32, &str)]]) -> Value {
    let blocks: Vec<Value> = blocks
        .iter()
        .map(|lines| {
            let mut words = Vec::new();
            for &(top, line) in lines.iter() {
                let mut left = 100.0;
                for text in line.split_whitespace() {
                    words.push(word(text, left, top));
                    left += 14.0 * text.chars().count() as f32 + 10.0;
                }
            }
            json!({"paragraphs": [{"words": words}]})
        })
        .collect();

    json!({"width": 1700, "height": 2200, "blocks": blocks})
}

fn book() -> String {
    json!({"pages": [
        page(&[&[(100.0, "A Short Book")]]),
        page(&[
            &[(100.0, "Table of Contents")],
            &[(200.0, "Part I ........ 3"), (225.0, "Chapter 1 ........ 4")],
        ]),
        page(&[&[(100.0, "Part I")], &[(300.0, "Early days")]]),
        page(&[
            &[(100.0, "Chapter 1")],
            &[(200.0, "It was a bright day."), (225.0, "Nothing happened.")],
            &[(400.0, "Section 1.1")],
            &[(500.0, "Details follow here.")],
        ]),
        page(&[&[(100.0, "More details.")]]),
    ]})
    .to_string()
}

#[test]
fn test_scan_loading() {
    let scan = ScannedDocument::from_json(&book()).unwrap();
    assert_eq!(scan.page_count(), 5);
    assert_eq!(scan.page_size(0).unwrap().width, 1700.0);
    assert!(scan.word_count() > 20);
}

#[test]
fn test_outline_from_book() {
    let doc = extract_json(&book(), &ExtractOptions::default()).unwrap();
    let tree = render::outline_tree(&doc.outline);
    assert_eq!(
        tree,
        "Table of Contents\n  Part 1\n    Chapter 1\n  Part 2\n    Chapter 1\n      Section 1\n"
    );
}

#[test]
fn test_contents_entries_become_nodes_when_ordered() {
    // The table of contents lists "Part" and "Chapter" itself; they follow
    // the root and nest like real headings.
    let doc = extract_json(&book(), &ExtractOptions::default()).unwrap();
    let first_part = &doc.outline.root.children[0];
    assert_eq!(first_part.page(), 1);
    assert_eq!(first_part.children[0].page(), 1);
}

#[test]
fn test_section_text() {
    let doc = extract_json(&book(), &ExtractOptions::default()).unwrap();

    let flat = doc.outline.flatten();
    let chapter = flat
        .iter()
        .position(|n| n.kind == NodeKind::Chapter && n.page() == 3)
        .unwrap();
    let texts: Vec<String> = doc.sections_for(chapter).map(|s| s.text()).collect();
    assert_eq!(texts, vec!["It was a bright day.\nNothing happened."]);

    let section = flat
        .iter()
        .position(|n| n.kind == NodeKind::Section)
        .unwrap();
    let pages: Vec<usize> = doc.sections_for(section).map(|s| s.region.page).collect();
    assert_eq!(pages, vec![3, 4]);
    let texts: Vec<String> = doc.sections_for(section).map(|s| s.text()).collect();
    assert_eq!(texts, vec!["Details follow here.", "More details."]);
}

#[test]
fn test_anchor_page_mode_stays_on_heading_page() {
    let options = ExtractOptions::default().with_region_mode(RegionMode::AnchorPage);
    let doc = extract_json(&book(), &options).unwrap();
    assert!(doc.sections.iter().all(|s| s.region.page != 4));
}

#[test]
fn test_parallel_output_is_identical() {
    let sequential = extract_json(&book(), &ExtractOptions::default()).unwrap();
    let parallel = extract_json(&book(), &ExtractOptions::default().with_parallel(true)).unwrap();
    assert_eq!(
        render::to_json(&sequential, JsonFormat::Compact).unwrap(),
        render::to_json(&parallel, JsonFormat::Compact).unwrap()
    );
}

#[test]
fn test_missing_contents_is_fatal() {
    let scan = json!({"pages": [page(&[&[(100.0, "Chapter 1")]])]}).to_string();
    assert!(matches!(
        extract_json(&scan, &ExtractOptions::default()),
        Err(Error::MissingAnchor)
    ));
}

#[test]
fn test_lenient_extraction_reports_skipped_anchors() {
    let scan = json!({"pages": [
        page(&[&[(100.0, "Contents")]]),
        page(&[&[(100.0, "Chapter 1")], &[(200.0, "Orphaned text.")]]),
    ]})
    .to_string();

    assert!(matches!(
        extract_json(&scan, &ExtractOptions::default()),
        Err(Error::StructuralMismatch { .. })
    ));

    let doc = extract_json(&scan, &ExtractOptions::default().lenient()).unwrap();
    assert_eq!(doc.diagnostics.len(), 1);
    assert!(doc.outline.is_empty());
    // The root owns everything after it.
    let texts: Vec<String> = doc.sections_for(0).map(|s| s.text()).collect();
    assert_eq!(texts, vec!["Chapter 1\n\nOrphaned text."]);
}

#[test]
fn test_extract_file_and_render() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(book().as_bytes()).unwrap();

    let doc = extract_file(file.path()).unwrap();
    assert_eq!(doc.page_count, 5);

    let json = render::to_json(&doc, JsonFormat::Pretty).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["outline"]["root"]["kind"], "table_of_contents");
    assert!(value["sections"].as_array().is_some_and(|s| !s.is_empty()));

    let text = render::to_text(&doc).unwrap();
    assert!(text.starts_with("Table of Contents"));
    assert!(text.contains("== Section 1 =="));
    assert!(text.contains("Details follow here."));
}

#[test]
fn test_extract_file_with_options_and_builder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    std::fs::write(&path, book()).unwrap();

    let options = ExtractOptions::default().lenient();
    let doc = extract_file_with_options(&path, &options).unwrap();
    assert!(doc.diagnostics.is_empty());

    let result = Untoc::new().extract(&path).unwrap();
    assert_eq!(result.document().outline.total_items(), 5);
}
