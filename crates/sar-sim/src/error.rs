use sar_cluster::ClusterError;
use sar_core::{AgentId, SarError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("mission configuration error: {0}")]
    Config(String),

    #[error("{0} reported twice")]
    DuplicateReport(AgentId),

    #[error("report latch expected {expected} reports and is already released")]
    LatchReleased { expected: usize },

    #[error("rescue planning requested before the explorer maps were fused")]
    NotFused,

    #[error("mission has already run")]
    Finished,

    #[error(transparent)]
    Core(#[from] SarError),

    #[error("clustering error: {0}")]
    Cluster(#[from] ClusterError),
}

pub type SimResult<T> = Result<T, SimError>;
