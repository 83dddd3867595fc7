//! End-to-end tests of the in-memory request API.

use bookmerge::codec::{LopdfCodec, PdfCodec};
use bookmerge::{NamedBlob, merge_request};
use rstest::rstest;

use crate::common::{outline, page_labels, pdf_bytes};

#[test]
fn test_two_documents_sorted_by_name() {
    let response = merge_request(
        vec![
            NamedBlob::new("b.pdf", pdf_bytes("b", 2)),
            NamedBlob::new("a.pdf", pdf_bytes("a", 1)),
        ],
        "merged_document",
    )
    .unwrap();

    assert_eq!(response.file_name, "merged_document.pdf");
    assert_eq!(response.document.total_pages, 3);
    assert_eq!(page_labels(response.bytes()), vec!["a-0", "b-0", "b-1"]);
    assert_eq!(
        outline(response.bytes()),
        vec![("a".to_string(), 0), ("b".to_string(), 1)]
    );
}

#[test]
fn test_sort_is_case_insensitive() {
    let response = merge_request(
        vec![
            NamedBlob::new("Z.pdf", pdf_bytes("Z", 1)),
            NamedBlob::new("a.pdf", pdf_bytes("a", 1)),
        ],
        "out",
    )
    .unwrap();

    assert_eq!(
        outline(response.bytes()),
        vec![("a".to_string(), 0), ("Z".to_string(), 1)]
    );
}

#[test]
fn test_single_document() {
    let response = merge_request(vec![NamedBlob::new("only.pdf", pdf_bytes("o", 3))], "x").unwrap();

    assert_eq!(page_labels(response.bytes()), vec!["o-0", "o-1", "o-2"]);
    assert_eq!(outline(response.bytes()), vec![("only".to_string(), 0)]);
}

#[rstest]
#[case("report", "report.pdf")]
#[case("report.pdf", "report.pdf")]
#[case("Report.PDF", "Report.PDF")]
fn test_output_file_name(#[case] base: &str, #[case] expected: &str) {
    let response = merge_request(vec![NamedBlob::new("a.pdf", pdf_bytes("a", 1))], base).unwrap();
    assert_eq!(response.file_name, expected);
}

#[test]
fn test_page_count_conserved() {
    let counts = [3usize, 1, 4, 1, 5];
    let files = counts
        .iter()
        .enumerate()
        .map(|(i, &n)| NamedBlob::new(format!("doc{i}.pdf"), pdf_bytes(&format!("d{i}"), n)))
        .collect();

    let response = merge_request(files, "out").unwrap();

    let codec = LopdfCodec::new();
    let decoded = codec.decode(response.bytes()).unwrap();
    assert_eq!(codec.page_count(&decoded), counts.iter().sum::<usize>());

    let targets: Vec<usize> = outline(response.bytes()).into_iter().map(|(_, p)| p).collect();
    assert_eq!(targets, vec![0, 3, 4, 8, 9]);
}

#[test]
fn test_permutations_give_identical_bytes() {
    let make = |order: &[usize]| {
        let names = ["alpha.pdf", "Beta.pdf", "gamma.pdf"];
        order
            .iter()
            .map(|&i| NamedBlob::new(names[i], pdf_bytes(names[i], i + 1)))
            .collect::<Vec<_>>()
    };

    let first = merge_request(make(&[0, 1, 2]), "out").unwrap();
    let second = merge_request(make(&[2, 0, 1]), "out").unwrap();
    let third = merge_request(make(&[1, 2, 0]), "out").unwrap();

    assert_eq!(first.bytes(), second.bytes());
    assert_eq!(first.bytes(), third.bytes());
}

#[test]
fn test_round_trip_preserves_pages() {
    let response = merge_request(
        vec![
            NamedBlob::new("x.pdf", pdf_bytes("x", 2)),
            NamedBlob::new("y.pdf", pdf_bytes("y", 1)),
        ],
        "out",
    )
    .unwrap();

    let codec = LopdfCodec::new();
    let again = codec
        .encode(codec.decode(response.bytes()).unwrap())
        .unwrap();

    assert_eq!(page_labels(&again), page_labels(response.bytes()));
    assert_eq!(outline(&again), outline(response.bytes()));
}

#[test]
fn test_summary_matches_output() {
    let response = merge_request(
        vec![
            NamedBlob::new("b.pdf", pdf_bytes("b", 2)),
            NamedBlob::new("a.pdf", pdf_bytes("a", 1)),
        ],
        "book",
    )
    .unwrap();

    let summary = response.summary();
    assert_eq!(summary.file_name, "book.pdf");
    assert_eq!(summary.total_pages, 3);
    assert_eq!(summary.size, response.bytes().len() as u64);
    assert_eq!(summary.documents[0].title, "a");
    assert_eq!(summary.documents[1].first_page_index, 1);
}
