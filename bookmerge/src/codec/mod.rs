//! PDF codec boundary.
//!
//! The merge engine never touches a concrete PDF library directly. It talks to
//! a [`PdfCodec`], a small capability interface covering exactly what a
//! whole-document merge needs: decode, encode, count pages, append pages, and
//! add a top-level outline entry. [`LopdfCodec`] is the production backend.
//!
//! # Examples
//!
//! ```no_run
//! use bookmerge::codec::{LopdfCodec, PdfCodec};
//!
//! # fn example(a: &[u8], b: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let codec = LopdfCodec::new();
//! let mut merged = codec.empty_document();
//! codec.append_pages(&mut merged, codec.decode(a)?)?;
//! codec.append_pages(&mut merged, codec.decode(b)?)?;
//! codec.add_outline_entry(&mut merged, "First", 0)?;
//! let bytes = codec.encode(merged)?;
//! # Ok(())
//! # }
//! ```

pub mod lopdf_backend;
pub mod outline;

pub use lopdf_backend::{LopdfCodec, LopdfOptions};

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Failure reported by a PDF codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The bytes are not a well-formed PDF.
    #[error("not a well-formed PDF: {details}")]
    Malformed {
        /// What the parser rejected.
        details: String,
    },

    /// The document is encrypted and cannot be merged.
    #[error("PDF is encrypted: {details}")]
    Encrypted {
        /// Details reported by the parser.
        details: String,
    },

    /// The document parsed but its structure is unusable.
    #[error("invalid document structure: {details}")]
    Structure {
        /// Which part of the structure is broken.
        details: String,
    },

    /// An outline entry targets a page that does not exist.
    #[error("page index {index} is out of range for a document with {page_count} page(s)")]
    PageOutOfRange {
        /// Requested zero-based page index.
        index: usize,
        /// Pages actually present.
        page_count: usize,
    },

    /// Serialization failed.
    #[error("serialization failed: {details}")]
    Serialize {
        /// Details reported by the writer.
        details: String,
    },
}

impl CodecError {
    /// Create a Malformed error.
    pub fn malformed(details: impl Into<String>) -> Self {
        Self::Malformed {
            details: details.into(),
        }
    }

    /// Create a Structure error.
    pub fn structure(details: impl Into<String>) -> Self {
        Self::Structure {
            details: details.into(),
        }
    }
}

/// Capability interface over a PDF manipulation backend.
///
/// Implementations own their document representation through the associated
/// [`PdfCodec::Document`] type. A document passed to [`PdfCodec::append_pages`]
/// or [`PdfCodec::encode`] is consumed; the codec may reuse its objects
/// without copying.
pub trait PdfCodec {
    /// In-memory document representation.
    type Document;

    /// Create an output document with an empty page tree.
    fn empty_document(&self) -> Self::Document;

    /// Parse PDF bytes.
    fn decode(&self, bytes: &[u8]) -> CodecResult<Self::Document>;

    /// Serialize a document to PDF bytes.
    fn encode(&self, document: Self::Document) -> CodecResult<Vec<u8>>;

    /// Number of pages in the document.
    fn page_count(&self, document: &Self::Document) -> usize;

    /// Append every page of `source` to the end of `target`, in order.
    fn append_pages(&self, target: &mut Self::Document, source: Self::Document)
    -> CodecResult<()>;

    /// Append a top-level outline entry titled `title` pointing at the
    /// zero-based page `page_index` of `target`.
    fn add_outline_entry(
        &self,
        target: &mut Self::Document,
        title: &str,
        page_index: usize,
    ) -> CodecResult<()>;
}

impl<C: PdfCodec + ?Sized> PdfCodec for &C {
    type Document = C::Document;

    fn empty_document(&self) -> Self::Document {
        (**self).empty_document()
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Self::Document> {
        (**self).decode(bytes)
    }

    fn encode(&self, document: Self::Document) -> CodecResult<Vec<u8>> {
        (**self).encode(document)
    }

    fn page_count(&self, document: &Self::Document) -> usize {
        (**self).page_count(document)
    }

    fn append_pages(
        &self,
        target: &mut Self::Document,
        source: Self::Document,
    ) -> CodecResult<()> {
        (**self).append_pages(target, source)
    }

    fn add_outline_entry(
        &self,
        target: &mut Self::Document,
        title: &str,
        page_index: usize,
    ) -> CodecResult<()> {
        (**self).add_outline_entry(target, title, page_index)
    }
}
