//! Request-level entry point.
//!
//! A request takes named blobs and an output base name and returns the merged
//! bytes with their file name. Each request owns its own state and runs once.

use serde::Serialize;
use tracing::{info, instrument};

use crate::codec::{LopdfCodec, PdfCodec};
use crate::config::output_file_name;
use crate::error::{BookmergeError, Result};
use crate::merge::{
    DocumentSummary, MergeEngine, MergeStage, MergeState, MergeWarning, MergedDocument,
    OutlineEntry,
};
use crate::normalize::{NamedBlob, normalize};

/// Result of a successful request.
#[derive(Debug, Clone)]
pub struct MergeResponse {
    /// File name for the merged document, always ending in `.pdf`.
    pub file_name: String,
    /// The merged document.
    pub document: MergedDocument,
}

impl MergeResponse {
    /// Encoded PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.document.bytes
    }

    /// Serializable summary without the document bytes.
    pub fn summary(&self) -> MergeSummary {
        MergeSummary {
            file_name: self.file_name.clone(),
            total_pages: self.document.total_pages,
            size: self.document.bytes.len() as u64,
            documents: self.document.documents.clone(),
            outline: self.document.outline.clone(),
            warnings: self.document.warnings.clone(),
        }
    }
}

/// Machine-readable description of a merged document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Output file name.
    pub file_name: String,
    /// Total pages.
    pub total_pages: usize,
    /// Encoded size in bytes.
    pub size: u64,
    /// Page accounting per source.
    pub documents: Vec<DocumentSummary>,
    /// Outline entries in order.
    pub outline: Vec<OutlineEntry>,
    /// Non-fatal problems.
    pub warnings: Vec<MergeWarning>,
}

/// One merge request and its lifecycle state.
#[derive(Debug)]
pub struct MergeRequest<C> {
    engine: MergeEngine<C>,
    state: MergeState,
}

impl<C: PdfCodec> MergeRequest<C> {
    /// Create an idle request using `codec`.
    pub fn new(codec: C) -> Self {
        Self {
            engine: MergeEngine::new(codec),
            state: MergeState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MergeState {
        self.state
    }

    /// Run the request.
    ///
    /// # Errors
    ///
    /// - [`BookmergeError::InvalidInput`] for an empty set, blank names, or a
    ///   blank base name
    /// - [`BookmergeError::Decode`] naming the first source that cannot be
    ///   decoded
    /// - [`BookmergeError::Encode`] if the result cannot be serialized
    /// - [`BookmergeError::Other`] if the request has already run
    ///
    /// Core errors are wrapped in [`BookmergeError::Merge`] carrying the
    /// failing stage.
    pub fn run(&mut self, files: Vec<NamedBlob>, output_base_name: &str) -> Result<MergeResponse> {
        if self.state != MergeState::Idle {
            return Err(BookmergeError::other("merge request has already run"));
        }

        self.state = MergeState::Running(MergeStage::Normalizing);
        let file_name = output_file_name(output_base_name).map_err(|e| self.fail(e))?;
        let ordered = normalize(files).map_err(|e| self.fail(e))?;

        self.state = MergeState::Running(MergeStage::Merging);
        let accumulated = self.engine.accumulate(ordered).map_err(|e| self.fail(e))?;

        self.state = MergeState::Running(MergeStage::Encoding);
        let document = self.engine.finish(accumulated).map_err(|e| self.fail(e))?;

        self.state = MergeState::Done;
        info!(
            file_name = %file_name,
            pages = document.total_pages,
            warnings = document.warnings.len(),
            "Request complete"
        );

        Ok(MergeResponse {
            file_name,
            document,
        })
    }

    fn fail(&mut self, error: BookmergeError) -> BookmergeError {
        let stage = match self.state {
            MergeState::Running(stage) => stage,
            _ => MergeStage::Normalizing,
        };
        let error = error.at_stage(stage);
        self.state = MergeState::Failed(error.stage().unwrap_or(stage));
        error
    }
}

/// Merge `files` into one PDF with one bookmark per source.
///
/// Sources are ordered case-insensitively by display name (file name without
/// extension), and each bookmark points at the first page its source
/// contributed.
///
/// # Errors
///
/// See [`MergeRequest::run`].
///
/// # Examples
///
/// ```no_run
/// use bookmerge::{merge_request, NamedBlob};
///
/// # fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
/// let response = merge_request(
///     vec![NamedBlob::new("b.pdf", b), NamedBlob::new("a.pdf", a)],
///     "merged_document",
/// )?;
/// assert_eq!(response.file_name, "merged_document.pdf");
/// std::fs::write(&response.file_name, response.bytes())?;
/// # Ok(())
/// # }
/// ```
#[instrument(skip_all, fields(files = files.len(), output = output_base_name))]
pub fn merge_request(files: Vec<NamedBlob>, output_base_name: &str) -> Result<MergeResponse> {
    MergeRequest::new(LopdfCodec::new()).run(files, output_base_name)
}
