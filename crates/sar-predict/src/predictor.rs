//! `VictimPredictor` — triage class and survival score from vital signs.
//!
//! # Training
//!
//! [`VictimPredictor::train`] first estimates quality on a seeded 80/20
//! hold-out split (a scaler and both models fitted on the 80 % part, scored
//! on the rest; the train part doubles as test set when the split leaves
//! nothing over).  The returned predictor is then fitted on the full
//! dataset.

use sar_core::{SimRng, TriageClass};

use crate::dataset::Dataset;
use crate::knn::{KnnClassifier, KnnRegressor};
use crate::scaler::MinMaxScaler;
use crate::PredictResult;

// ── Public types ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Prediction {
    pub triage:   TriageClass,
    /// Clamped to `[0, 1]`.
    pub survival: f64,
}

/// Hold-out quality of a trained predictor.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ModelMetrics {
    pub tri_accuracy: f64,
    pub sobr_mae:     f64,
    pub train_rows:   usize,
    pub test_rows:    usize,
}

/// Anything that can classify a victim from its raw vital signs.
pub trait TriagePredictor: Send + Sync {
    /// Number of values expected in a signal vector.
    fn feature_count(&self) -> usize;

    fn predict(&self, signals: &[f64]) -> PredictResult<Prediction>;

    /// Hold-out quality, if the predictor measured one.
    fn quality(&self) -> Option<ModelMetrics> {
        None
    }
}

// ── VictimPredictor ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct VictimPredictor {
    scaler:     MinMaxScaler,
    classifier: KnnClassifier,
    regressor:  KnnRegressor,
    metrics:    ModelMetrics,
}

impl VictimPredictor {
    pub fn train(dataset: &Dataset, k: usize, seed: u64) -> PredictResult<Self> {
        let metrics = evaluate(dataset, k, seed)?;
        let (scaler, classifier, regressor) = fit(dataset, k)?;
        tracing::info!(
            k,
            rows         = dataset.len(),
            tri_accuracy = metrics.tri_accuracy,
            sobr_mae     = metrics.sobr_mae,
            "victim predictor trained"
        );
        Ok(Self { scaler, classifier, regressor, metrics })
    }

    pub fn metrics(&self) -> ModelMetrics {
        self.metrics
    }
}

impl TriagePredictor for VictimPredictor {
    fn feature_count(&self) -> usize {
        self.scaler.dim()
    }

    fn predict(&self, signals: &[f64]) -> PredictResult<Prediction> {
        let x = self.scaler.transform(signals)?;
        Ok(Prediction {
            triage:   self.classifier.predict(&x),
            survival: self.regressor.predict(&x).clamp(0.0, 1.0),
        })
    }

    fn quality(&self) -> Option<ModelMetrics> {
        Some(self.metrics)
    }
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn fit(data: &Dataset, k: usize) -> PredictResult<(MinMaxScaler, KnnClassifier, KnnRegressor)> {
    let (scaler, x) = MinMaxScaler::fit_transform(&data.features)?;
    let classifier = KnnClassifier::fit(k, x.clone(), data.triage.clone())?;
    let regressor = KnnRegressor::fit(k, x, data.survival.clone())?;
    Ok((scaler, classifier, regressor))
}

fn evaluate(data: &Dataset, k: usize, seed: u64) -> PredictResult<ModelMetrics> {
    let mut indices: Vec<usize> = (0..data.len()).collect();
    SimRng::new(seed).shuffle(&mut indices);

    let split = ((data.len() as f64 * 0.8) as usize).max(1).min(data.len());
    let (train_idx, test_idx) = indices.split_at(split);
    let test_idx = if test_idx.is_empty() { train_idx } else { test_idx };

    let train = data.subset(train_idx);
    let test = data.subset(test_idx);
    let (scaler, classifier, regressor) = fit(&train, k)?;

    let mut correct = 0usize;
    let mut abs_error = 0.0;
    for i in 0..test.len() {
        let x = scaler.transform(&test.features[i])?;
        if classifier.predict(&x) == test.triage[i] {
            correct += 1;
        }
        abs_error += (regressor.predict(&x) - test.survival[i]).abs();
    }

    let n = test.len() as f64;
    Ok(ModelMetrics {
        tri_accuracy: correct as f64 / n,
        sobr_mae:     abs_error / n,
        train_rows:   train.len(),
        test_rows:    test.len(),
    })
}
