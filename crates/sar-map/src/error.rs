//! Map-subsystem error type.

use thiserror::Error;

/// Errors produced by `sar-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("unknown cell status {0:?}")]
    UnknownStatus(String),
}

pub type MapResult<T> = Result<T, MapError>;
