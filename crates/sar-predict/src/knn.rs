//! k-nearest-neighbour classifier and regressor.
//!
//! Both models store their (already normalised) training samples and answer
//! queries by a linear scan with Euclidean distance.  Neighbours at equal
//! distance keep training-sample order.

use std::collections::BTreeMap;

use sar_core::TriageClass;

use crate::{PredictError, PredictResult};

/// `(distance, sample index)` of the `k` nearest samples.
fn nearest(samples: &[Vec<f64>], k: usize, query: &[f64]) -> Vec<(f64, usize)> {
    let mut dist: Vec<(f64, usize)> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let d2: f64 = s.iter().zip(query).map(|(a, b)| (a - b) * (a - b)).sum();
            (d2.sqrt(), i)
        })
        .collect();
    dist.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    dist.truncate(k);
    dist
}

fn check(k: usize, features: &[Vec<f64>], targets: usize) -> PredictResult<()> {
    if k == 0 {
        return Err(PredictError::ZeroK);
    }
    if features.is_empty() {
        return Err(PredictError::EmptyDataset);
    }
    if features.len() != targets {
        return Err(PredictError::Parse(format!(
            "{} feature rows but {} targets",
            features.len(),
            targets
        )));
    }
    Ok(())
}

// ── KnnClassifier ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct KnnClassifier {
    k:        usize,
    features: Vec<Vec<f64>>,
    labels:   Vec<TriageClass>,
}

impl KnnClassifier {
    pub fn fit(k: usize, features: Vec<Vec<f64>>, labels: Vec<TriageClass>) -> PredictResult<Self> {
        check(k, &features, labels.len())?;
        Ok(Self { k, features, labels })
    }

    /// Majority vote among the `k` nearest samples.  Ties go to the class
    /// whose voters are closer on average, then to the lower class index.
    pub fn predict(&self, query: &[f64]) -> TriageClass {
        // class -> (votes, summed distance)
        let mut tally: BTreeMap<TriageClass, (usize, f64)> = BTreeMap::new();
        for (d, i) in nearest(&self.features, self.k, query) {
            let e = tally.entry(self.labels[i]).or_insert((0, 0.0));
            e.0 += 1;
            e.1 += d;
        }

        let mut best: Option<(TriageClass, usize, f64)> = None;
        for (class, (votes, total)) in tally {
            let mean = total / votes as f64;
            let better = match best {
                None => true,
                Some((_, bv, bm)) => votes > bv || (votes == bv && mean < bm),
            };
            if better {
                best = Some((class, votes, mean));
            }
        }
        best.map_or(TriageClass::Green, |(c, _, _)| c)
    }
}

// ── KnnRegressor ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct KnnRegressor {
    k:        usize,
    features: Vec<Vec<f64>>,
    targets:  Vec<f64>,
}

impl KnnRegressor {
    pub fn fit(k: usize, features: Vec<Vec<f64>>, targets: Vec<f64>) -> PredictResult<Self> {
        check(k, &features, targets.len())?;
        Ok(Self { k, features, targets })
    }

    /// Mean target of the `k` nearest samples (unclamped).
    pub fn predict(&self, query: &[f64]) -> f64 {
        let near = nearest(&self.features, self.k, query);
        let sum: f64 = near.iter().map(|&(_, i)| self.targets[i]).sum();
        sum / near.len() as f64
    }
}
