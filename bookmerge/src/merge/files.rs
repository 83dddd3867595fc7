//! Merging files from disk.
//!
//! Reads the configured inputs concurrently, then runs the synchronous merge
//! on a blocking thread.

use tokio::task;
use tracing::{error, instrument};

use super::{MergeEngine, OutlinePlan};
use crate::codec::LopdfCodec;
use crate::config::Config;
use crate::error::{BookmergeError, Result};
use crate::io::{InputReader, LoadStatistics, collect_loaded};
use crate::normalize::{NamedBlob, normalize};
use crate::request::{MergeRequest, MergeResponse};

/// Result of merging files from disk.
#[derive(Debug)]
pub struct FileMerge {
    /// The merged document and its file name.
    pub response: MergeResponse,

    /// Statistics about reading the inputs.
    pub load_statistics: LoadStatistics,
}

/// What a merge would produce, computed without producing it.
#[derive(Debug)]
pub struct MergePlan {
    /// Outline entries and per-document page counts, in merge order.
    pub plan: OutlinePlan,

    /// Statistics about reading the inputs.
    pub load_statistics: LoadStatistics,
}

/// Read every configured input.
///
/// All read failures are logged; the first one is returned.
async fn load_inputs(config: &Config) -> Result<(Vec<NamedBlob>, LoadStatistics)> {
    let reader = InputReader::new();
    let (results, load_statistics) = reader
        .load_all(config.inputs(), config.effective_jobs())
        .await;

    let (loaded, failures) = collect_loaded(results)?;
    for failure in &failures {
        error!("{failure}");
    }
    if let Some(first) = failures.into_iter().next() {
        return Err(first);
    }

    let blobs = loaded.into_iter().map(|input| input.blob).collect();
    Ok((blobs, load_statistics))
}

/// Merge the configured inputs.
///
/// # Errors
///
/// Returns an error if any input cannot be read, or if the merge fails.
///
/// # Examples
///
/// ```no_run
/// # use bookmerge::config::Config;
/// # use bookmerge::merge::merge_files;
/// # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
/// let merged = merge_files(&config).await?;
/// println!("Merged {} pages", merged.response.document.total_pages);
/// # Ok(())
/// # }
/// ```
#[instrument(skip_all, fields(inputs = config.inputs().len()))]
pub async fn merge_files(config: &Config) -> Result<FileMerge> {
    let (blobs, load_statistics) = load_inputs(config).await?;

    let codec = LopdfCodec::with_metadata(config.metadata.clone());
    let name = config.output_name.clone();

    let response = task::spawn_blocking(move || MergeRequest::new(codec).run(blobs, &name))
        .await
        .map_err(|e| BookmergeError::other(format!("Merge task failed: {e}")))??;

    Ok(FileMerge {
        response,
        load_statistics,
    })
}

/// Compute the merge order, page counts, and outline for the configured
/// inputs without merging.
///
/// # Errors
///
/// Returns an error if any input cannot be read or decoded.
#[instrument(skip_all, fields(inputs = config.inputs().len()))]
pub async fn plan_files(config: &Config) -> Result<MergePlan> {
    let (blobs, load_statistics) = load_inputs(config).await?;

    let plan = task::spawn_blocking(move || {
        let ordered = normalize(blobs)?;
        MergeEngine::new(LopdfCodec::new()).plan(&ordered)
    })
    .await
    .map_err(|e| BookmergeError::other(format!("Plan task failed: {e}")))??;

    Ok(MergePlan {
        plan,
        load_statistics,
    })
}
