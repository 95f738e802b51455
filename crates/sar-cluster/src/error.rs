//! Clustering error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("cluster count must be >= 1")]
    ZeroClusters,

    #[error("no rescuers to assign clusters to")]
    NoRescuers,

    #[error("points have inconsistent dimensions")]
    RaggedPoints,
}

pub type ClusterResult<T> = Result<T, ClusterError>;
