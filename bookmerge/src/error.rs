//! Error types for bookmerge.
//!
//! This module defines every error that can occur while normalizing inputs,
//! merging documents, or moving bytes between the file system and the merge
//! core. Errors are designed to be informative and actionable: each one names
//! the offending input or output and, where useful, hints at a fix.
//!
//! # Error Categories
//!
//! - **Input Errors**: empty input sets, blank file names
//! - **Codec Errors**: a source is not a decodable PDF, or the merged result
//!   cannot be encoded
//! - **I/O Errors**: file not found, permission denied, etc.
//! - **Configuration Errors**: invalid argument combinations

use std::io;
use std::path::PathBuf;

use crate::codec::CodecError;
use crate::merge::MergeStage;

/// Result type alias for bookmerge operations.
pub type Result<T> = std::result::Result<T, BookmergeError>;

/// Main error type for bookmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum BookmergeError {
    /// The input set is empty or contains a malformed name.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What is wrong with the input.
        reason: String,
    },

    /// One source could not be decoded as a PDF.
    #[error("Failed to read PDF '{document}'\n  Reason: {cause}{}", decode_hint(.cause))]
    Decode {
        /// Display name of the offending source.
        document: String,
        /// Underlying codec failure.
        #[source]
        cause: CodecError,
    },

    /// The merged document could not be encoded.
    #[error("Failed to encode merged PDF\n  Reason: {cause}")]
    Encode {
        /// Underlying codec failure.
        #[source]
        cause: CodecError,
    },

    /// An outline entry could not be attached to the merged document.
    #[error("Failed to add bookmark '{title}'\n  Reason: {cause}")]
    Outline {
        /// Title of the entry.
        title: String,
        /// Underlying codec failure.
        #[source]
        cause: CodecError,
    },

    /// A core error annotated with the merge stage it happened in.
    #[error("{source}")]
    Merge {
        /// Stage of the request that failed.
        stage: MergeStage,
        /// The error raised by that stage.
        source: Box<BookmergeError>,
    },

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input path is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different name",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", .path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input list file contains invalid paths.
    #[error(
        "Invalid entry in input list file: {} at line {line_number}\n  Details: {details}",
        .path.display()
    )]
    InvalidInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Line number with the error.
        line_number: usize,
        /// Details about what's invalid.
        details: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

fn decode_hint(cause: &CodecError) -> &'static str {
    match cause {
        CodecError::Encrypted { .. } => {
            "\n  Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
        }
        _ => "",
    }
}

impl BookmergeError {
    /// Create an InvalidInput error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a Decode error for the named source.
    pub fn decode(document: impl Into<String>, cause: CodecError) -> Self {
        Self::Decode {
            document: document.into(),
            cause,
        }
    }

    /// Create an Encode error.
    pub fn encode(cause: CodecError) -> Self {
        Self::Encode { cause }
    }

    /// Create an Outline error.
    pub fn outline(title: impl Into<String>, cause: CodecError) -> Self {
        Self::Outline {
            title: title.into(),
            cause,
        }
    }

    /// Annotate an error with the stage it happened in.
    ///
    /// Already-annotated errors keep their original stage.
    pub fn at_stage(self, stage: MergeStage) -> Self {
        match self {
            Self::Merge { .. } => self,
            other => Self::Merge {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// The stage a merge error was raised in, if it was annotated.
    pub fn stage(&self) -> Option<MergeStage> {
        match self {
            Self::Merge { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The error with any stage annotation peeled off.
    pub fn root(&self) -> &BookmergeError {
        match self {
            Self::Merge { source, .. } => source.root(),
            other => other,
        }
    }

    /// Display name of the source that caused the failure, if any.
    pub fn offending_document(&self) -> Option<&str> {
        match self.root() {
            Self::Decode { document, .. } => Some(document),
            _ => None,
        }
    }

    /// Check if this error should stop all processing immediately.
    ///
    /// Every core error aborts the request. Only per-file access problems
    /// reported while collecting inputs are considered non-fatal, so a caller
    /// can report all of them before giving up.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self.root(),
            Self::FileNotFound { .. } | Self::FileNotAccessible { .. } | Self::NotAFile { .. }
        )
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Merge { source, .. } => source.exit_code(),
            Self::InvalidInput { .. } => 1,
            Self::Decode { .. } => 3,
            Self::Encode { .. } => 6,
            Self::Outline { .. } => 6,
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::FailedToReadInputList { .. } => 2,
            Self::InvalidInputList { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
