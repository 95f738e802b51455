//! Prediction-subsystem error type.

use thiserror::Error;

use sar_core::SarError;

/// Errors produced by `sar-predict`.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("k must be >= 1")]
    ZeroK,

    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] SarError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PredictResult<T> = Result<T, PredictError>;
