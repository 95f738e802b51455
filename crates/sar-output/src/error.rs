//! Error types for sar-output.

use sar_core::SarError;
use sar_map::MapError;
use thiserror::Error;

/// Errors that can occur when writing or reading mission output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map record: {0}")]
    Map(#[from] MapError),

    #[error("record: {0}")]
    Core(#[from] SarError),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
