//! `sar-cluster` — partition victims and hand the groups to rescuers.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`kmeans`] | `KMeans`, `KMeansFit`                                         |
//! | [`assign`] | `ClusterAssigner`, `ClusterAssignment`, `assign_round_robin`  |
//! | [`error`]  | `ClusterError`, `ClusterResult<T>`                            |

pub mod assign;
pub mod error;
pub mod kmeans;

#[cfg(test)]
mod tests;

pub use assign::{assign_round_robin, ClusterAssigner, ClusterAssignment, RescuerAssignment, RescuerRole};
pub use error::{ClusterError, ClusterResult};
pub use kmeans::{KMeans, KMeansFit};
