//! Outline behavior of merged documents.

use bookmerge::{MergeWarning, NamedBlob, merge_request};

use crate::common::{outline, page_labels, pdf_bytes};

#[test]
fn test_zero_page_document_in_middle_points_to_next_page() {
    let response = merge_request(
        vec![
            NamedBlob::new("a.pdf", pdf_bytes("a", 2)),
            NamedBlob::new("b.pdf", pdf_bytes("b", 0)),
            NamedBlob::new("c.pdf", pdf_bytes("c", 1)),
        ],
        "out",
    )
    .unwrap();

    assert_eq!(page_labels(response.bytes()), vec!["a-0", "a-1", "c-0"]);
    assert_eq!(
        outline(response.bytes()),
        vec![
            ("a".to_string(), 0),
            ("b".to_string(), 2),
            ("c".to_string(), 2)
        ]
    );
    assert!(response.document.warnings.is_empty());
}

#[test]
fn test_trailing_zero_page_document_is_omitted_with_warning() {
    let response = merge_request(
        vec![
            NamedBlob::new("a.pdf", pdf_bytes("a", 1)),
            NamedBlob::new("z.pdf", pdf_bytes("z", 0)),
        ],
        "out",
    )
    .unwrap();

    assert_eq!(outline(response.bytes()), vec![("a".to_string(), 0)]);
    assert_eq!(
        response.document.warnings,
        vec![MergeWarning::AmbiguousOutline {
            title: "z".to_string(),
            target_page_index: 1,
        }]
    );
    // The entry is still reported to the caller.
    assert_eq!(response.document.outline.len(), 2);
}

#[test]
fn test_non_ascii_titles_survive() {
    let response = merge_request(
        vec![
            NamedBlob::new("Überblick.pdf", pdf_bytes("u", 1)),
            NamedBlob::new("résumé.pdf", pdf_bytes("r", 1)),
            NamedBlob::new("日本語.pdf", pdf_bytes("j", 1)),
        ],
        "out",
    )
    .unwrap();

    let titles: Vec<String> = outline(response.bytes())
        .into_iter()
        .map(|(title, _)| title)
        .collect();
    assert_eq!(titles, vec!["résumé", "Überblick", "日本語"]);
}

#[test]
fn test_duplicate_titles_produce_separate_entries() {
    let response = merge_request(
        vec![
            NamedBlob::new("report.pdf", pdf_bytes("first", 1)),
            NamedBlob::new("report.pdf", pdf_bytes("second", 2)),
        ],
        "out",
    )
    .unwrap();

    assert_eq!(
        outline(response.bytes()),
        vec![("report".to_string(), 0), ("report".to_string(), 1)]
    );
    assert_eq!(
        page_labels(response.bytes()),
        vec!["first-0", "second-0", "second-1"]
    );
}

#[test]
fn test_titles_drop_directories_and_extension() {
    let response = merge_request(
        vec![
            NamedBlob::new("scans/2024/chapter.two.pdf", pdf_bytes("c", 1)),
            NamedBlob::new("appendix", pdf_bytes("a", 1)),
        ],
        "out",
    )
    .unwrap();

    assert_eq!(
        outline(response.bytes()),
        vec![("appendix".to_string(), 0), ("chapter.two".to_string(), 1)]
    );
}
