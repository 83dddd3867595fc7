//! Document outline (bookmark) structure for lopdf documents.
//!
//! Entries are appended one at a time to the catalog's `Outlines` tree as
//! flat, top-level items linked through `Prev`/`Next`. Each destination is
//! `[page /XYZ null null null]`, which keeps the viewer's zoom.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};

use super::{CodecError, CodecResult};

/// A top-level outline item read back from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    /// Decoded title text.
    pub title: String,
    /// Zero-based index of the destination page.
    pub page_index: usize,
}

/// Encode `text` as a PDF text string.
///
/// Printable ASCII is stored as a literal string, which PDFDocEncoding reads
/// identically. Anything else is stored as UTF-16BE with a byte order mark.
pub fn text_string(text: &str) -> Object {
    let plain = text
        .chars()
        .all(|c| matches!(c, ' '..='~' | '\t' | '\n' | '\r'));

    if plain {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode a PDF text string produced by [`text_string`] or a PDF writer.
pub fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        // Latin-1 covers the printable range of PDFDocEncoding we care about.
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Append a top-level outline item pointing at `page_id`.
///
/// Creates the `Outlines` root on first use and sets `PageMode` so viewers
/// open with the bookmark panel visible.
pub fn append_item(doc: &mut Document, title: &str, page_id: ObjectId) -> CodecResult<ObjectId> {
    let root_id = ensure_root(doc)?;
    let last = root_dict(doc, root_id)?
        .get(b"Last")
        .and_then(Object::as_reference)
        .ok();

    let item_id = doc.new_object_id();
    let dest = vec![
        Object::Reference(page_id),
        Object::Name(b"XYZ".to_vec()),
        Object::Null,
        Object::Null,
        Object::Null,
    ];

    let mut item = Dictionary::new();
    item.set("Title", text_string(title));
    item.set("Parent", Object::Reference(root_id));
    item.set("Dest", Object::Array(dest));
    if let Some(prev_id) = last {
        item.set("Prev", Object::Reference(prev_id));
    }
    doc.objects.insert(item_id, Object::Dictionary(item));

    match last {
        Some(prev_id) => match doc.get_object_mut(prev_id) {
            Ok(Object::Dictionary(prev)) => prev.set("Next", Object::Reference(item_id)),
            _ => {
                return Err(CodecError::structure(
                    "last outline item is not a dictionary",
                ));
            }
        },
        None => {
            root_dict_mut(doc, root_id)?.set("First", Object::Reference(item_id));
        }
    }

    let root = root_dict_mut(doc, root_id)?;
    let count = root.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    root.set("Count", Object::Integer(count + 1));
    root.set("Last", Object::Reference(item_id));

    Ok(item_id)
}

/// Read the top-level outline items of a document, in order.
///
/// Items whose destination is not a page of the document are skipped.
pub fn top_level_items(doc: &Document) -> Vec<OutlineItem> {
    let page_indices: std::collections::HashMap<ObjectId, usize> = doc
        .get_pages()
        .into_values()
        .enumerate()
        .map(|(index, id)| (id, index))
        .collect();

    let Some(root_id) = outline_root(doc) else {
        return Vec::new();
    };
    let Ok(root) = doc.get_dictionary(root_id) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    let mut next = root.get(b"First").and_then(Object::as_reference).ok();
    // Bounded by the object count so a cyclic Next chain cannot loop forever.
    let mut budget = doc.objects.len();

    while let Some(item_id) = next {
        if budget == 0 {
            break;
        }
        budget -= 1;

        let Ok(item) = doc.get_dictionary(item_id) else {
            break;
        };

        let title = match item.get(b"Title") {
            Ok(Object::String(bytes, _)) => decode_text_string(bytes),
            _ => String::new(),
        };
        let page = item
            .get(b"Dest")
            .and_then(Object::as_array)
            .ok()
            .and_then(|dest| dest.first())
            .and_then(|target| target.as_reference().ok())
            .and_then(|page_id| page_indices.get(&page_id).copied());

        if let Some(page_index) = page {
            items.push(OutlineItem { title, page_index });
        }

        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }

    items
}

fn outline_root(doc: &Document) -> Option<ObjectId> {
    doc.catalog()
        .ok()?
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .ok()
}

fn ensure_root(doc: &mut Document) -> CodecResult<ObjectId> {
    if let Some(root_id) = outline_root(doc)
        && doc.get_dictionary(root_id).is_ok()
    {
        return Ok(root_id);
    }

    let root_id = doc.add_object(dictionary! {
        "Type" => "Outlines",
        "Count" => 0,
    });

    let catalog = doc
        .catalog_mut()
        .map_err(|e| CodecError::structure(format!("failed to get catalog: {e}")))?;
    catalog.set("Outlines", Object::Reference(root_id));
    catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

    Ok(root_id)
}

fn root_dict(doc: &Document, root_id: ObjectId) -> CodecResult<&Dictionary> {
    doc.get_dictionary(root_id)
        .map_err(|e| CodecError::structure(format!("outline root is unusable: {e}")))
}

fn root_dict_mut(doc: &mut Document, root_id: ObjectId) -> CodecResult<&mut Dictionary> {
    doc.get_dictionary_mut(root_id)
        .map_err(|e| CodecError::structure(format!("outline root is unusable: {e}")))
}
