//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading source files.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be opened.
    #[error("Cannot open {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent.
    #[error("Missing column '{column}' (found: {found})")]
    MissingColumn {
        /// Requested header
        column: String,
        /// Headers present in the file
        found: String,
    },

    /// No row produced a usable record.
    #[error("No usable records in column '{column}'")]
    NoRecords {
        /// Value column that was read
        column: String,
    },
}

impl LoaderError {
    /// Create an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
