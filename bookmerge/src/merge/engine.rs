//! Core merge implementation.
//!
//! Sources are decoded one at a time and their pages appended to a single
//! output document in [`OrderedInputSet`] order. Once every page is in place,
//! one outline entry per source is attached and the result is encoded.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use super::outline::{DocumentSummary, OutlineEntry, OutlinePlan};
use super::{MergeStage, MergeWarning};
use crate::codec::PdfCodec;
use crate::error::{BookmergeError, Result};
use crate::normalize::OrderedInputSet;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStatistics {
    /// Number of source documents merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Number of bookmarks written to the output.
    pub bookmarks_added: usize,

    /// Total size of the source documents.
    pub input_size: u64,

    /// Size of the encoded output.
    pub output_size: u64,

    /// Time spent decoding and appending.
    pub merge_time: Duration,

    /// Time spent encoding.
    pub encode_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Encoded result of a merge.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    /// Encoded PDF bytes.
    pub bytes: Vec<u8>,

    /// One entry per source, in merge order, including entries that could
    /// not be anchored (see [`MergedDocument::warnings`]).
    pub outline: Vec<OutlineEntry>,

    /// Page accounting per source.
    pub documents: Vec<DocumentSummary>,

    /// Total pages in the output.
    pub total_pages: usize,

    /// Non-fatal problems.
    pub warnings: Vec<MergeWarning>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// A fully assembled document that has not been encoded yet.
#[derive(Debug)]
pub struct Accumulated<D> {
    document: D,
    plan: OutlinePlan,
    warnings: Vec<MergeWarning>,
    bookmarks_added: usize,
    input_size: u64,
    merge_time: Duration,
}

impl<D> Accumulated<D> {
    /// Outline plan of the assembled document.
    pub fn plan(&self) -> &OutlinePlan {
        &self.plan
    }

    /// Warnings raised while assembling.
    pub fn warnings(&self) -> &[MergeWarning] {
        &self.warnings
    }
}

/// Merges ordered sources through a [`PdfCodec`].
#[derive(Debug, Clone, Default)]
pub struct MergeEngine<C> {
    codec: C,
}

impl<C: PdfCodec> MergeEngine<C> {
    /// Create an engine over `codec`.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Returns the codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Merge and encode in one step.
    ///
    /// # Errors
    ///
    /// Returns the first failure, annotated with the stage it happened in.
    /// Nothing is produced on failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bookmerge::codec::LopdfCodec;
    /// use bookmerge::merge::MergeEngine;
    /// use bookmerge::normalize::{normalize, NamedBlob};
    ///
    /// # fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
    /// let ordered = normalize(vec![NamedBlob::new("b.pdf", b), NamedBlob::new("a.pdf", a)])?;
    /// let merged = MergeEngine::new(LopdfCodec::new()).merge(ordered)?;
    /// assert_eq!(merged.outline[0].title, "a");
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip_all, fields(documents = ordered.len()))]
    pub fn merge(&self, ordered: OrderedInputSet) -> Result<MergedDocument> {
        let accumulated = self.accumulate(ordered)?;
        self.finish(accumulated)
    }

    /// Decode every source, append its pages, and attach the outline.
    ///
    /// # Errors
    ///
    /// - [`BookmergeError::Decode`] naming the first source that cannot be
    ///   decoded or appended
    /// - [`BookmergeError::Outline`] if an entry cannot be attached
    ///
    /// Errors are annotated with [`MergeStage::Merging`].
    pub fn accumulate(&self, ordered: OrderedInputSet) -> Result<Accumulated<C::Document>> {
        self.accumulate_inner(ordered)
            .map_err(|e| e.at_stage(MergeStage::Merging))
    }

    fn accumulate_inner(&self, ordered: OrderedInputSet) -> Result<Accumulated<C::Document>> {
        let start = Instant::now();
        let input_size = ordered.total_bytes();
        let mut target = self.codec.empty_document();
        let mut plan = OutlinePlan::new();

        info!(documents = ordered.len(), "Starting merge");

        for source in ordered {
            let (title, content) = source.into_parts();

            let document = self
                .codec
                .decode(&content)
                .map_err(|e| BookmergeError::decode(&title, e))?;
            drop(content);

            let pages = self.codec.page_count(&document);
            self.codec
                .append_pages(&mut target, document)
                .map_err(|e| BookmergeError::decode(&title, e))?;

            let entry = plan.record(&title, pages);
            debug!(
                document = %title,
                pages,
                first_page = entry.target_page_index,
                "Appended document"
            );
        }

        let mut bookmarks_added = 0;
        for entry in plan.anchored() {
            self.codec
                .add_outline_entry(&mut target, &entry.title, entry.target_page_index)
                .map_err(|e| BookmergeError::outline(&entry.title, e))?;
            bookmarks_added += 1;
        }

        let warnings = plan.warnings();
        for warning in &warnings {
            let MergeWarning::AmbiguousOutline {
                title,
                target_page_index,
            } = warning;
            warn!(
                document = %title,
                target_page_index,
                "Document has no pages and nothing follows it; bookmark omitted"
            );
        }

        Ok(Accumulated {
            document: target,
            plan,
            warnings,
            bookmarks_added,
            input_size,
            merge_time: start.elapsed(),
        })
    }

    /// Encode an assembled document.
    ///
    /// # Errors
    ///
    /// Returns [`BookmergeError::Encode`] annotated with
    /// [`MergeStage::Encoding`].
    pub fn finish(&self, accumulated: Accumulated<C::Document>) -> Result<MergedDocument> {
        let start = Instant::now();
        let Accumulated {
            document,
            plan,
            warnings,
            bookmarks_added,
            input_size,
            merge_time,
        } = accumulated;

        let bytes = self
            .codec
            .encode(document)
            .map_err(|e| BookmergeError::encode(e).at_stage(MergeStage::Encoding))?;

        let (outline, documents, total_pages) = plan.into_parts();
        let statistics = MergeStatistics {
            files_merged: documents.len(),
            total_pages,
            bookmarks_added,
            input_size,
            output_size: bytes.len() as u64,
            merge_time,
            encode_time: start.elapsed(),
        };

        info!(
            documents = statistics.files_merged,
            pages = total_pages,
            bytes = bytes.len(),
            "Merge complete"
        );

        Ok(MergedDocument {
            bytes,
            outline,
            documents,
            total_pages,
            warnings,
            statistics,
        })
    }

    /// Compute the outline and page offsets without assembling anything.
    ///
    /// Each source is decoded once to count its pages.
    ///
    /// # Errors
    ///
    /// Returns [`BookmergeError::Decode`] naming the first source that cannot
    /// be decoded.
    pub fn plan(&self, ordered: &OrderedInputSet) -> Result<OutlinePlan> {
        let mut plan = OutlinePlan::new();

        for source in ordered {
            let document = self
                .codec
                .decode(source.content())
                .map_err(|e| BookmergeError::decode(source.display_name(), e))?;
            plan.record(source.display_name(), self.codec.page_count(&document));
        }

        Ok(plan)
    }
}
