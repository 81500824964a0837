//! Error types for reference data loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading ILR reference data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Reference directory not found.
    #[error("Reference data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read a reference file from disk.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a CSV record.
    #[error("Failed to parse CSV {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Invalid value in CSV field.
    #[error("Invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
    },
}

impl StandardsError {
    pub(crate) fn csv(file: &str, error: &csv::Error) -> Self {
        Self::CsvParse {
            file: file.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type for reference data operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
