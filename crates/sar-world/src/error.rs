//! World-subsystem error type.

use thiserror::Error;

/// Errors produced while building or loading a world.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("invalid world: {0}")]
    Invalid(String),

    #[error("world parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
