//! Error types for ILR submission ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading submissions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Input path does not exist.
    #[error("input not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is neither `.xml` nor `.json`.
    #[error("unsupported input format: {path} (expected .xml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Document is not a well-formed ILR XML message.
    #[error("invalid ILR XML: {message}")]
    InvalidXml { message: String },

    /// Document is not a well-formed ILR JSON message.
    #[error("invalid ILR JSON: {message}")]
    InvalidJson { message: String },

    /// Parse failure with the file it came from.
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<IngestError>,
    },

    /// File name does not follow the ILR naming convention.
    #[error("invalid ILR file name '{name}'")]
    InvalidFileName { name: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
