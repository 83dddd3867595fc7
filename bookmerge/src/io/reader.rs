//! Input file reading.
//!
//! Files are read as raw bytes and turned into [`NamedBlob`]s named after
//! their file name. Parsing happens later, inside the merge engine. Reads can
//! run concurrently; results always come back in input order.
//!
//! # Examples
//!
//! ```no_run
//! use bookmerge::io::reader::InputReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = InputReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.load_all(&paths, 4).await;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::error::{BookmergeError, Result};
use crate::normalize::NamedBlob;
use crate::utils::format_file_size;

/// A file read into memory.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    /// Blob named after the file name.
    pub blob: NamedBlob,

    /// Path to the source file.
    pub path: PathBuf,

    /// Time taken to read the file.
    pub load_time: Duration,
}

impl LoadedInput {
    /// File size in bytes.
    pub fn file_size(&self) -> u64 {
        self.blob.bytes.len() as u64
    }
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedInput>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone, Default)]
pub struct LoadStatistics {
    /// Number of files successfully read.
    pub success_count: usize,

    /// Number of files that failed to read.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Average time per successful load.
    pub average_time: Duration,

    /// Total size of successfully read files.
    pub total_size: u64,
}

impl LoadStatistics {
    /// Create statistics from load results.
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut success_count = 0;
        let mut failure_count = 0;
        let mut total_size = 0;
        let mut total_load_time = Duration::ZERO;

        for result in results {
            match result {
                Ok(loaded) => {
                    success_count += 1;
                    total_size += loaded.file_size();
                    total_load_time += loaded.load_time;
                }
                Err(_) => {
                    failure_count += 1;
                }
            }
        }

        let average_time = if success_count > 0 {
            total_load_time / success_count as u32
        } else {
            Duration::ZERO
        };

        Self {
            success_count,
            failure_count,
            total_time,
            average_time,
            total_size,
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Reads input files into memory.
#[derive(Debug, Clone, Default)]
pub struct InputReader;

impl InputReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The path is not a regular file
    /// - The file cannot be read
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use bookmerge::io::reader::InputReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = InputReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Read {} bytes in {:?}", loaded.file_size(), loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedInput> {
        let start = Instant::now();

        let metadata = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BookmergeError::file_not_found(path.to_path_buf()),
            _ => BookmergeError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_file() {
            return Err(BookmergeError::not_a_file(path.to_path_buf()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BookmergeError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| BookmergeError::not_a_file(path.to_path_buf()))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Read input");

        Ok(LoadedInput {
            blob: NamedBlob::new(name, bytes),
            path: path.to_path_buf(),
            load_time: start.elapsed(),
        })
    }

    /// Read multiple files one at a time, in order.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            results.push(self.load(path).await);
        }

        results
    }

    /// Read multiple files concurrently.
    ///
    /// At most `workers` reads are in flight at once. Results are returned in
    /// the same order as `paths`.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        let workers = workers.max(1);

        let tasks = paths.iter().map(|path| {
            let reader = self.clone();
            let path = path.clone();
            async move { reader.load(&path).await }
        });

        stream::iter(tasks).buffered(workers).collect().await
    }

    /// Read all files, choosing sequential or concurrent loading by batch size.
    ///
    /// # Returns
    ///
    /// A tuple of (results, statistics) where results contains the load
    /// outcome for each file in input order.
    pub async fn load_all(
        &self,
        paths: &[PathBuf],
        max_workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        // Use sequential loading for small batches
        let results = if paths.len() <= 3 {
            self.load_sequential(paths).await
        } else {
            self.load_parallel(paths, max_workers).await
        };

        let stats = LoadStatistics::from_results(&results, start.elapsed());
        (results, stats)
    }
}

/// Split load results into successful loads and non-fatal failures.
///
/// # Errors
///
/// Returns the first fatal error as soon as it is seen.
pub fn collect_loaded(results: Vec<LoadResult>) -> Result<(Vec<LoadedInput>, Vec<BookmergeError>)> {
    let mut loaded = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for result in results {
        match result {
            Ok(input) => loaded.push(input),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => failures.push(e),
        }
    }

    Ok((loaded, failures))
}
