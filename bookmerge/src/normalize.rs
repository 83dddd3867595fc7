//! Input normalization.
//!
//! Turns an unordered set of named byte blobs into the canonical merge order.
//! Each blob gets a display name (its file name without directories and
//! without the final extension). Blobs are then sorted case-insensitively by
//! display name. The sort is stable, so blobs whose names differ only in case
//! keep the order they were supplied in.

use tracing::debug;

use crate::error::{BookmergeError, Result};

/// A named byte payload as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBlob {
    /// Original name, typically a file name.
    pub name: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

impl NamedBlob {
    /// Create a new named blob.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// One input document, ready to merge.
///
/// Immutable once created; the engine consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    display_name: String,
    content: Vec<u8>,
}

impl SourceDocument {
    /// Title used for this document's outline entry.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Raw document bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Split into display name and content.
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.display_name, self.content)
    }
}

/// Source documents in canonical merge order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedInputSet {
    documents: Vec<SourceDocument>,
}

impl OrderedInputSet {
    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Always false for a set produced by [`normalize`].
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate the documents in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, SourceDocument> {
        self.documents.iter()
    }

    /// Display names in merge order.
    pub fn display_names(&self) -> Vec<&str> {
        self.documents.iter().map(SourceDocument::display_name).collect()
    }

    /// Total size of all document contents in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.documents.iter().map(|d| d.content.len() as u64).sum()
    }
}

impl IntoIterator for OrderedInputSet {
    type Item = SourceDocument;
    type IntoIter = std::vec::IntoIter<SourceDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedInputSet {
    type Item = &'a SourceDocument;
    type IntoIter = std::slice::Iter<'a, SourceDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Derive the display name of an input name.
///
/// Strips any directory components, then the final extension. Leading dots
/// do not start an extension, so `.pdf` stays `.pdf`.
///
/// # Examples
///
/// ```
/// use bookmerge::normalize::display_name;
///
/// assert_eq!(display_name("Chapter 1.pdf"), "Chapter 1");
/// assert_eq!(display_name("scans/2024/a.b.pdf"), "a.b");
/// assert_eq!(display_name("README"), "README");
/// ```
pub fn display_name(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let stem_start = base.len() - base.trim_start_matches('.').len();
    match base[stem_start..].rfind('.') {
        Some(dot) => &base[..stem_start + dot],
        None => base,
    }
}

/// Normalize named blobs into canonical merge order.
///
/// # Errors
///
/// Returns [`BookmergeError::InvalidInput`] if the set is empty, or if a name
/// is blank or yields a blank display name. Nothing is decoded here.
///
/// # Examples
///
/// ```
/// use bookmerge::normalize::{normalize, NamedBlob};
///
/// let ordered = normalize(vec![
///     NamedBlob::new("b.pdf", vec![]),
///     NamedBlob::new("A.pdf", vec![]),
/// ])
/// .unwrap();
/// assert_eq!(ordered.display_names(), vec!["A", "b"]);
/// ```
pub fn normalize(inputs: Vec<NamedBlob>) -> Result<OrderedInputSet> {
    if inputs.is_empty() {
        return Err(BookmergeError::invalid_input("no files were supplied"));
    }

    let mut documents = Vec::with_capacity(inputs.len());
    for (position, blob) in inputs.into_iter().enumerate() {
        if blob.name.trim().is_empty() {
            return Err(BookmergeError::invalid_input(format!(
                "input #{} has a blank name",
                position + 1
            )));
        }

        let display = display_name(&blob.name);
        if display.trim().is_empty() {
            return Err(BookmergeError::invalid_input(format!(
                "input '{}' has no usable file name",
                blob.name
            )));
        }

        documents.push(SourceDocument {
            display_name: display.to_string(),
            content: blob.bytes,
        });
    }

    // Stable: equal keys keep their supplied order.
    documents.sort_by_cached_key(|d| d.display_name.to_lowercase());

    for (position, document) in documents.iter().enumerate() {
        debug!(
            position,
            name = %document.display_name,
            bytes = document.content.len(),
            "Normalized input"
        );
    }

    Ok(OrderedInputSet { documents })
}
