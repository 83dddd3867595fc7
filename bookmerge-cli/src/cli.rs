//! CLI argument parsing for bookmerge.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::Parser;
use std::path::{Path, PathBuf};

use bookmerge::config::{Config, DEFAULT_OUTPUT_NAME, Metadata, OverwriteMode, output_file_name};
use bookmerge::error::{BookmergeError, Result};
use bookmerge::utils::collect_paths_for_patterns;

/// Merge PDF files into one document with a bookmark per file.
///
/// Inputs are ordered by file name, ignoring case and extension, whatever
/// order they are given in. Every input gets one top-level bookmark titled
/// with its name and pointing at its first page.
#[derive(Parser, Debug)]
#[command(name = "bookmerge")]
#[command(version)]
#[command(about = "Merge PDF files into one document with a bookmark per file", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files or glob patterns
    ///
    /// The merge order is decided by file name, not by argument order.
    ///
    /// Examples:
    ///   bookmerge intro.pdf chapter1.pdf appendix.pdf
    ///   bookmerge 'scans/*.pdf' -n archive
    #[arg(value_name = "FILE", required_unless_present = "input_list")]
    pub inputs: Vec<String>,

    /// Read input paths from a file (one path per line)
    ///
    /// Empty lines and lines starting with '#' are ignored.
    /// Can be combined with direct inputs.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Base name of the merged document
    ///
    /// ".pdf" is appended unless the name already ends with it.
    #[arg(short = 'n', long, value_name = "NAME", default_value = DEFAULT_OUTPUT_NAME)]
    pub name: String,

    /// Directory to write the merged document to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Show the merge order and bookmarks without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output - show statistics and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of an existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a JSON summary of the merge on stdout
    #[arg(long)]
    pub json: bool,

    /// Number of files to read concurrently
    ///
    /// Default is the number of CPU cores. Use 1 for sequential reads.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Set title metadata for the merged document
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Set author metadata for the merged document
    #[arg(long, value_name = "TEXT")]
    pub author: Option<String>,

    /// Set subject metadata for the merged document
    #[arg(long, value_name = "TEXT")]
    pub subject: Option<String>,

    /// Set keywords metadata for the merged document (comma-separated)
    #[arg(long, value_name = "TEXT")]
    pub keywords: Option<String>,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// `inputs` are the resolved input paths, see [`Cli::get_all_inputs`].
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> Result<Config> {
        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let metadata = Metadata::new(
            self.title.clone(),
            self.author.clone(),
            self.subject.clone(),
            self.keywords.clone(),
        );

        let config = Config {
            inputs,
            output_dir: self.output_dir.clone(),
            output_name: self.name.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            overwrite_mode,
            metadata,
            jobs: self.jobs,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate CLI arguments before touching the file system.
    ///
    /// # Errors
    ///
    /// Returns an error if no inputs are given, the job count is zero, or the
    /// output name is not a usable file name.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.input_list.is_none() {
            return Err(BookmergeError::invalid_config("No input files specified"));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(BookmergeError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        output_file_name(&self.name).map_err(|e| BookmergeError::invalid_config(e.to_string()))?;

        Ok(())
    }

    /// Resolve every input path.
    ///
    /// Direct arguments are glob-expanded first; paths from `--input-list`
    /// follow.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern matches nothing, the input list cannot
    /// be read, or no inputs remain.
    pub async fn get_all_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut all_inputs = collect_paths_for_patterns(&self.inputs)?;

        if let Some(ref input_list_path) = self.input_list {
            all_inputs.extend(read_input_list(input_list_path).await?);
        }

        if all_inputs.is_empty() {
            return Err(BookmergeError::invalid_input("no files were supplied"));
        }

        Ok(all_inputs)
    }
}

/// Read input paths from a file.
///
/// One path per line. Lines starting with '#' are comments; empty lines are
/// skipped.
async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    use tokio::fs::File;
    use tokio::io::{AsyncBufReadExt, BufReader};

    let read_error = |source| BookmergeError::FailedToReadInputList {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(read_error)?;
    let mut lines = BufReader::new(file).lines();
    let mut paths = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await.map_err(read_error)? {
        line_number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('\0') {
            return Err(BookmergeError::InvalidInputList {
                path: path.to_path_buf(),
                line_number,
                details: "Path contains a NUL byte".to_string(),
            });
        }

        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}
