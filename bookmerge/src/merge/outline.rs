//! Outline offset bookkeeping.
//!
//! Every source document gets one outline entry whose target is the number of
//! pages accumulated before it. Entries for zero-page documents point at the
//! next page that will exist; if no page follows, the entry cannot be anchored.

use serde::Serialize;

use super::MergeWarning;

/// One top-level bookmark of the merged document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Bookmark title (the source's display name).
    pub title: String,
    /// Zero-based page index in the merged document.
    pub target_page_index: usize,
}

/// Per-source page accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Display name of the source.
    pub title: String,
    /// Pages the source contributed.
    pub page_count: usize,
    /// Index of the source's first page in the merged document.
    pub first_page_index: usize,
}

/// Outline entries and page offsets, built in merge order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutlinePlan {
    entries: Vec<OutlineEntry>,
    documents: Vec<DocumentSummary>,
    total_pages: usize,
}

impl OutlinePlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next document and return its outline entry.
    pub fn record(&mut self, title: &str, page_count: usize) -> &OutlineEntry {
        let offset = self.total_pages;

        self.documents.push(DocumentSummary {
            title: title.to_string(),
            page_count,
            first_page_index: offset,
        });
        self.total_pages += page_count;

        self.entries.push(OutlineEntry {
            title: title.to_string(),
            target_page_index: offset,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// All entries, in merge order.
    pub fn entries(&self) -> &[OutlineEntry] {
        &self.entries
    }

    /// Page accounting per document, in merge order.
    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    /// Pages accumulated so far.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Entries whose target page exists.
    pub fn anchored(&self) -> impl Iterator<Item = &OutlineEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.target_page_index < self.total_pages)
    }

    /// Warnings for entries with no page to anchor to.
    pub fn warnings(&self) -> Vec<MergeWarning> {
        self.entries
            .iter()
            .filter(|entry| entry.target_page_index >= self.total_pages)
            .map(|entry| MergeWarning::AmbiguousOutline {
                title: entry.title.clone(),
                target_page_index: entry.target_page_index,
            })
            .collect()
    }

    /// Split into entries and document summaries.
    pub fn into_parts(self) -> (Vec<OutlineEntry>, Vec<DocumentSummary>, usize) {
        (self.entries, self.documents, self.total_pages)
    }
}
