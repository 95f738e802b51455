//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `SarError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `sar-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SarError {
    #[error("{0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sar-core`.
pub type SarResult<T> = Result<T, SarError>;
