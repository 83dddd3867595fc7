//! bookmerge - Merge PDF files into one document with a bookmark per file.
//!
//! Inputs are ordered case-insensitively by file name (without extension),
//! concatenated page for page, and given a flat outline: one top-level
//! bookmark per input, titled with its name and pointing at the first page it
//! contributed.
//!
//! # Examples
//!
//! ## Merging in memory
//!
//! ```no_run
//! use bookmerge::{merge_request, NamedBlob};
//!
//! # fn example(intro: Vec<u8>, body: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let response = merge_request(
//!     vec![NamedBlob::new("body.pdf", body), NamedBlob::new("Intro.pdf", intro)],
//!     "book",
//! )?;
//!
//! // Outline: "body" then "Intro"
//! for entry in &response.document.outline {
//!     println!("{} -> page {}", entry.title, entry.target_page_index + 1);
//! }
//! std::fs::write(&response.file_name, response.bytes())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Merging files
//!
//! ```no_run
//! use bookmerge::config::Config;
//! use bookmerge::io::OutputWriter;
//! use bookmerge::merge;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     output_name: "merged".to_string(),
//!     ..Config::default()
//! };
//!
//! let merged = merge::merge_files(&config).await?;
//! OutputWriter::new()
//!     .save(merged.response.document.bytes, &config.output_path()?)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod request;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{BookmergeError, Result};
pub use merge::{MergeStage, MergeWarning, OutlineEntry};
pub use normalize::NamedBlob;
pub use request::{MergeResponse, MergeSummary, merge_request};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
