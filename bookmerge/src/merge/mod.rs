//! Merge engine and supporting types.
//!
//! - [`engine`]: concatenates an [`OrderedInputSet`](crate::normalize::OrderedInputSet)
//!   through a [`PdfCodec`](crate::codec::PdfCodec)
//! - [`outline`]: page offset bookkeeping for the one-entry-per-document outline
//! - [`files`]: async front end that reads inputs from disk

pub mod engine;
pub mod files;
pub mod outline;

pub use engine::{Accumulated, MergeEngine, MergeStatistics, MergedDocument};
pub use files::{FileMerge, MergePlan, merge_files, plan_files};
pub use outline::{DocumentSummary, OutlineEntry, OutlinePlan};

use std::fmt;

use serde::Serialize;

/// Stage of a merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStage {
    /// Validating names and ordering inputs.
    Normalizing,
    /// Decoding sources and appending their pages.
    Merging,
    /// Serializing the merged document.
    Encoding,
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normalizing => "normalizing",
            Self::Merging => "merging",
            Self::Encoding => "encoding",
        };
        f.write_str(name)
    }
}

/// Lifecycle of a single merge request.
///
/// `Idle → Normalizing → Merging → Encoding → Done`, or `Failed` from any
/// working stage. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeState {
    /// Not started.
    #[default]
    Idle,
    /// Working in the given stage.
    Running(MergeStage),
    /// Finished successfully.
    Done,
    /// Failed in the given stage.
    Failed(MergeStage),
}

impl MergeState {
    /// Whether the request has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }

    /// Stage being worked on or failed in.
    pub fn stage(&self) -> Option<MergeStage> {
        match self {
            Self::Running(stage) | Self::Failed(stage) => Some(*stage),
            Self::Idle | Self::Done => None,
        }
    }
}

/// Non-fatal condition reported alongside a successful merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergeWarning {
    /// A document contributed no pages and no later page exists to anchor
    /// its outline entry. The entry was left out of the output outline.
    AmbiguousOutline {
        /// Title of the omitted entry.
        title: String,
        /// Page index the entry would have pointed at.
        target_page_index: usize,
    },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousOutline {
                title,
                target_page_index,
            } => write!(
                f,
                "'{title}' has no pages and nothing follows it; bookmark (page {}) omitted",
                target_page_index + 1
            ),
        }
    }
}
