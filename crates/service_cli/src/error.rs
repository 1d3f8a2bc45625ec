//! CLI error types.

use adapter_loader::LoaderError;
use s2f_model::ModelError;
use thiserror::Error;

/// Errors surfaced by `s2f` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Configuration path
        path: String,
        /// Parser message
        message: String,
    },

    /// Configuration is inconsistent
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Required input not given on the command line or in the configuration
    #[error("Missing input: {0} (pass it as a flag or set it in the configuration)")]
    MissingInput(&'static str),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid argument or environment value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Source file could not be read
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Model build failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// CSV export failed
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export failed
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
