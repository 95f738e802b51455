//! `sar-predict` — victim triage and survival prediction.
//!
//! A deliberately small nearest-neighbour model: features are min-max
//! normalised, the triage class is a majority vote and the survival score a
//! mean over the `k` closest training rows.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`scaler`]    | `MinMaxScaler`                                           |
//! | [`knn`]       | `KnnClassifier`, `KnnRegressor`                          |
//! | [`dataset`]   | `Dataset`, `load_dataset`, `read_dataset`                |
//! | [`predictor`] | `TriagePredictor` trait, `VictimPredictor`, `Prediction`, `ModelMetrics` |
//! | [`error`]     | `PredictError`, `PredictResult<T>`                       |

pub mod dataset;
pub mod error;
pub mod knn;
pub mod predictor;
pub mod scaler;

#[cfg(test)]
mod tests;

pub use dataset::{load_dataset, read_dataset, Dataset};
pub use error::{PredictError, PredictResult};
pub use knn::{KnnClassifier, KnnRegressor};
pub use predictor::{ModelMetrics, Prediction, TriagePredictor, VictimPredictor};
pub use scaler::MinMaxScaler;
