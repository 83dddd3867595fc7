//! Configuration module for bookmerge.
//!
//! This module holds the validated configuration that drives a merge from the
//! command line: which files to read, where the merged document goes, and how
//! chatty the run should be.

use std::path::PathBuf;

use crate::error::{BookmergeError, Result};

/// Default base name of the merged document.
pub const DEFAULT_OUTPUT_NAME: &str = "merged_document";

/// PDF metadata to set on the output document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject.
    pub subject: Option<String>,
    /// Document keywords (comma-separated).
    pub keywords: Option<String>,
}

impl Metadata {
    /// Check if any metadata fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
    }

    /// Create metadata from optional strings.
    ///
    /// Values are trimmed; blank values are treated as unset.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        subject: Option<String>,
        keywords: Option<String>,
    ) -> Self {
        Self {
            title: non_blank(title),
            author: non_blank(author),
            subject: non_blank(subject),
            keywords: non_blank(keywords),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths. Merge order is decided by display name, not by
    /// the order given here.
    pub inputs: Vec<PathBuf>,

    /// Directory the merged document is written to.
    pub output_dir: PathBuf,

    /// Base name of the merged document, with or without `.pdf`.
    pub output_name: String,

    /// Dry run mode - list the merge plan without writing anything.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a JSON summary instead of human-readable output.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Metadata to set on output document.
    pub metadata: Metadata,

    /// Number of concurrent file reads (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from("."),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
            overwrite_mode: OverwriteMode::default(),
            metadata: Metadata::default(),
            jobs: None,
        }
    }
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Full path of the merged document.
    ///
    /// # Errors
    ///
    /// Returns an error if the output name is not a usable file name.
    pub fn output_path(&self) -> Result<PathBuf> {
        let file_name = output_file_name(&self.output_name)?;
        Ok(self.output_dir.join(file_name))
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output name is blank or contains a path separator
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(BookmergeError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(BookmergeError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(BookmergeError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        let output = self
            .output_path()
            .map_err(|e| BookmergeError::invalid_config(e.to_string()))?;

        for input in &self.inputs {
            if input == &output {
                return Err(BookmergeError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    output.display()
                )));
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if human-readable output should be displayed.
    ///
    /// Returns false in JSON mode, and in quiet mode unless doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.json && (!self.quiet || self.dry_run)
    }
}

/// Derive the merged document's file name from a base name.
///
/// Appends `.pdf` unless the name already ends with it (in any case).
///
/// # Errors
///
/// Returns [`BookmergeError::InvalidInput`] if the name is blank or contains
/// a path separator.
///
/// # Examples
///
/// ```
/// use bookmerge::config::output_file_name;
///
/// assert_eq!(output_file_name("report").unwrap(), "report.pdf");
/// assert_eq!(output_file_name("report.PDF").unwrap(), "report.PDF");
/// assert!(output_file_name("  ").is_err());
/// ```
pub fn output_file_name(base: &str) -> Result<String> {
    let base = base.trim();

    if base.is_empty() {
        return Err(BookmergeError::invalid_input("output name is blank"));
    }

    if base.contains(['/', '\\']) {
        return Err(BookmergeError::invalid_input(format!(
            "output name must be a file name, not a path: {base}"
        )));
    }

    if base.to_lowercase().ends_with(".pdf") && base.len() > 4 {
        Ok(base.to_string())
    } else {
        Ok(format!("{base}.pdf"))
    }
}
