//! Failure reporting of merge requests.

use bookmerge::codec::CodecError;
use bookmerge::{BookmergeError, MergeStage, NamedBlob, merge_request};
use lopdf::dictionary;

use crate::common::pdf_bytes;

#[test]
fn test_empty_input_is_rejected_while_normalizing() {
    let err = merge_request(Vec::new(), "out").unwrap_err();

    assert_eq!(err.stage(), Some(MergeStage::Normalizing));
    assert!(matches!(err.root(), BookmergeError::InvalidInput { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_corrupt_document_is_named() {
    let err = merge_request(
        vec![
            NamedBlob::new("good.pdf", pdf_bytes("g", 1)),
            NamedBlob::new("reports/bad.pdf", b"%PDF-1.4 garbage".to_vec()),
        ],
        "out",
    )
    .unwrap_err();

    assert_eq!(err.stage(), Some(MergeStage::Merging));
    assert_eq!(err.offending_document(), Some("bad"));
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("'bad'"));
}

#[test]
fn test_first_corrupt_document_in_merge_order_is_reported() {
    let err = merge_request(
        vec![
            NamedBlob::new("zeta.pdf", Vec::new()),
            NamedBlob::new("Alpha.pdf", b"nope".to_vec()),
        ],
        "out",
    )
    .unwrap_err();

    assert_eq!(err.offending_document(), Some("Alpha"));
}

#[test]
fn test_document_without_page_tree_is_malformed() {
    let mut doc = lopdf::Document::with_version("1.5");
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog" });
    doc.trailer.set("Root", catalog_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let err = merge_request(vec![NamedBlob::new("hollow.pdf", bytes)], "out").unwrap_err();

    match err.root() {
        BookmergeError::Decode { document, cause } => {
            assert_eq!(document, "hollow");
            assert!(matches!(
                cause,
                CodecError::Malformed { .. } | CodecError::Structure { .. }
            ));
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn test_encrypted_document_is_reported_with_hint() {
    let mut doc = lopdf::Document::load_mem(&pdf_bytes("sec", 1)).unwrap();
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "P" => -4,
        "O" => lopdf::Object::string_literal(vec![0u8; 32]),
        "U" => lopdf::Object::string_literal(vec![0u8; 32]),
    });
    doc.trailer.set("Encrypt", encrypt_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let err = merge_request(
        vec![
            NamedBlob::new("open.pdf", pdf_bytes("open", 1)),
            NamedBlob::new("sec.pdf", bytes),
        ],
        "out",
    )
    .unwrap_err();

    assert_eq!(err.stage(), Some(MergeStage::Merging));
    assert_eq!(err.exit_code(), 3);
    match err.root() {
        BookmergeError::Decode { document, cause } => {
            assert_eq!(document, "sec");
            assert!(matches!(cause, CodecError::Encrypted { .. }));
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
    assert!(err.to_string().contains("Hint: Decrypt the PDF first"));
}

#[test]
fn test_blank_output_name_is_rejected() {
    let err = merge_request(vec![NamedBlob::new("a.pdf", pdf_bytes("a", 1))], "  ").unwrap_err();

    assert_eq!(err.stage(), Some(MergeStage::Normalizing));
    assert!(matches!(err.root(), BookmergeError::InvalidInput { .. }));
}

#[test]
fn test_output_name_with_directory_is_rejected() {
    let err = merge_request(
        vec![NamedBlob::new("a.pdf", pdf_bytes("a", 1))],
        "../escape",
    )
    .unwrap_err();

    assert!(matches!(err.root(), BookmergeError::InvalidInput { .. }));
}

#[test]
fn test_blank_input_name_is_rejected() {
    let err = merge_request(vec![NamedBlob::new(" ", pdf_bytes("a", 1))], "out").unwrap_err();

    assert_eq!(err.stage(), Some(MergeStage::Normalizing));
    assert!(matches!(err.root(), BookmergeError::InvalidInput { .. }));
}
