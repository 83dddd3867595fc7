//! [`PdfCodec`] implementation backed by `lopdf`.
//!
//! Appending keeps each source's page tree intact: the source's root `Pages`
//! node is re-parented under the output's root and its objects are moved over
//! after renumbering. Inherited page attributes (MediaBox, Resources, Rotate)
//! stay where the source put them, and page content streams are never
//! re-encoded.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};
use tracing::debug;

use super::outline;
use super::{CodecError, CodecResult, PdfCodec};
use crate::config::Metadata;

/// Value written to the Info dictionary's `Producer` and `Creator` keys.
pub const PRODUCER: &str = "bookmerge";

/// Options for [`LopdfCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LopdfOptions {
    /// Minimum PDF version of the output. The highest input version wins
    /// when it is newer.
    pub version: String,

    /// Metadata written to the output's Info dictionary.
    pub metadata: Metadata,
}

impl Default for LopdfOptions {
    fn default() -> Self {
        Self {
            version: "1.5".to_string(),
            metadata: Metadata::default(),
        }
    }
}

/// PDF codec built on `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfCodec {
    options: LopdfOptions,
}

impl LopdfCodec {
    /// Create a codec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with custom options.
    pub fn with_options(options: LopdfOptions) -> Self {
        Self { options }
    }

    /// Create a codec that writes the given metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self::with_options(LopdfOptions {
            metadata,
            ..LopdfOptions::default()
        })
    }

    /// Returns the codec options.
    pub fn options(&self) -> &LopdfOptions {
        &self.options
    }

    /// Write the Info dictionary.
    ///
    /// Only non-empty metadata fields are set. No dates are written, so the
    /// same inputs always encode to the same bytes.
    fn set_metadata(&self, doc: &mut Document) {
        let metadata = &self.options.metadata;

        let mut info = Dictionary::new();
        let fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                info.set(key, outline::text_string(value));
            }
        }
        info.set(
            "Creator",
            Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
        );
        info.set(
            "Producer",
            Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
        );

        let info_id = doc.add_object(info);
        doc.trailer.set("Info", Object::Reference(info_id));
    }
}

/// Object id of a document's root `Pages` node.
fn pages_root(doc: &Document) -> CodecResult<ObjectId> {
    let catalog = doc
        .catalog()
        .map_err(|e| CodecError::structure(format!("failed to get catalog: {e}")))?;

    catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|e| CodecError::structure(format!("failed to get pages reference: {e}")))
}

/// Classify a parser failure.
fn load_error(error: lopdf::Error) -> CodecError {
    let details = error.to_string();
    let lower = details.to_lowercase();

    if lower.contains("encrypt") || lower.contains("password") || lower.contains("decrypt") {
        CodecError::Encrypted { details }
    } else {
        CodecError::Malformed { details }
    }
}

impl PdfCodec for LopdfCodec {
    type Document = Document;

    fn empty_document(&self) -> Document {
        let mut doc = Document::with_version(self.options.version.as_str());

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Document> {
        let doc = Document::load_mem(bytes).map_err(load_error)?;

        if doc.trailer.has(b"Encrypt") {
            return Err(CodecError::Encrypted {
                details: "document has an Encrypt dictionary".to_string(),
            });
        }

        let pages_id = pages_root(&doc)?;
        doc.get_dictionary(pages_id)
            .map_err(|e| CodecError::structure(format!("page tree root is unusable: {e}")))?;

        Ok(doc)
    }

    fn encode(&self, document: Document) -> CodecResult<Vec<u8>> {
        let mut doc = document;

        self.set_metadata(&mut doc);

        let pruned = doc.prune_objects();
        if !pruned.is_empty() {
            debug!(objects = pruned.len(), "Pruned unreachable objects");
        }
        doc.renumber_objects();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(|e| CodecError::Serialize {
            details: e.to_string(),
        })?;

        Ok(buffer)
    }

    fn page_count(&self, document: &Document) -> usize {
        document.get_pages().len()
    }

    fn append_pages(&self, target: &mut Document, source: Document) -> CodecResult<()> {
        let mut source = source;

        let added = source.get_pages().len();
        if added == 0 {
            return Ok(());
        }

        let target_pages_id = pages_root(target)?;

        // Renumber objects to avoid ID conflicts
        source.renumber_objects_with(target.max_id + 1);

        let source_catalog_id = source
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|e| CodecError::structure(format!("failed to get catalog: {e}")))?;
        let source_pages_id = pages_root(&source)?;

        source
            .get_dictionary_mut(source_pages_id)
            .map_err(|e| CodecError::structure(format!("page tree root is unusable: {e}")))?
            .set("Parent", Object::Reference(target_pages_id));

        // The source catalog would otherwise be a second document root.
        source.objects.remove(&source_catalog_id);

        if source.version > target.version {
            target.version = source.version.clone();
        }
        target.max_id = target.max_id.max(source.max_id);
        target.objects.extend(source.objects);

        let pages = target
            .get_dictionary_mut(target_pages_id)
            .map_err(|e| CodecError::structure(format!("failed to get pages object: {e}")))?;

        match pages.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => kids.push(Object::Reference(source_pages_id)),
            Ok(_) => return Err(CodecError::structure("Kids is not an array")),
            Err(_) => return Err(CodecError::structure("Pages dictionary missing Kids array")),
        }

        let current_count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", Object::Integer(current_count + added as i64));

        debug!(pages = added, "Appended page tree");

        Ok(())
    }

    fn add_outline_entry(
        &self,
        target: &mut Document,
        title: &str,
        page_index: usize,
    ) -> CodecResult<()> {
        let pages = target.get_pages();
        let page_id = u32::try_from(page_index + 1)
            .ok()
            .and_then(|number| pages.get(&number).copied())
            .ok_or(CodecError::PageOutOfRange {
                index: page_index,
                page_count: pages.len(),
            })?;

        outline::append_item(target, title, page_id)?;
        Ok(())
    }
}
