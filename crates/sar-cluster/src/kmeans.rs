//! Seeded Lloyd's k-means.
//!
//! # Algorithm
//!
//! 1. Shuffle the point indices with a `SimRng` seeded from `seed` and take
//!    the first `k` points as initial centroids.  With fewer than `k` points
//!    the last centroid is duplicated until there are `k`.
//! 2. Assign every point to the nearest centroid by squared Euclidean
//!    distance; ties go to the lowest centroid index.
//! 3. Move every centroid to the component-wise mean of its points; a
//!    centroid with no points stays where it is.
//! 4. Repeat 2-3 until no assignment changes or `max_iter` rounds ran.

use sar_core::SimRng;

use crate::{ClusterError, ClusterResult};

pub const DEFAULT_MAX_ITER: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct KMeansFit {
    /// Cluster index (`0..k`) of every input point.
    pub labels:     Vec<usize>,
    pub centroids:  Vec<Vec<f64>>,
    pub iterations: usize,
}

#[derive(Copy, Clone, Debug)]
pub struct KMeans {
    pub k:        usize,
    pub max_iter: usize,
    pub seed:     u64,
}

impl KMeans {
    pub fn new(k: usize, seed: u64) -> Self {
        Self { k, max_iter: DEFAULT_MAX_ITER, seed }
    }

    pub fn fit(&self, points: &[Vec<f64>]) -> ClusterResult<KMeansFit> {
        if self.k == 0 {
            return Err(ClusterError::ZeroClusters);
        }
        let Some(first) = points.first() else {
            return Ok(KMeansFit { labels: Vec::new(), centroids: Vec::new(), iterations: 0 });
        };
        let dim = first.len();
        if points.iter().any(|p| p.len() != dim) {
            return Err(ClusterError::RaggedPoints);
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        SimRng::new(self.seed).shuffle(&mut order);
        let mut centroids: Vec<Vec<f64>> =
            order.iter().take(self.k).map(|&i| points[i].clone()).collect();
        while centroids.len() < self.k {
            let last = centroids[centroids.len() - 1].clone();
            centroids.push(last);
        }

        let mut labels: Vec<Option<usize>> = vec![None; points.len()];
        let mut iterations = 0;
        while iterations < self.max_iter {
            iterations += 1;

            let mut changed = false;
            for (i, point) in points.iter().enumerate() {
                let best = nearest(&centroids, point);
                if labels[i] != Some(best) {
                    labels[i] = Some(best);
                    changed = true;
                }
            }
            if !changed {
                break;
            }

            for (c, centroid) in centroids.iter_mut().enumerate() {
                let members: Vec<&Vec<f64>> = points
                    .iter()
                    .zip(&labels)
                    .filter(|(_, l)| **l == Some(c))
                    .map(|(p, _)| p)
                    .collect();
                if members.is_empty() {
                    continue;
                }
                for (d, value) in centroid.iter_mut().enumerate() {
                    *value = members.iter().map(|p| p[d]).sum::<f64>() / members.len() as f64;
                }
            }
        }

        Ok(KMeansFit {
            labels: labels.into_iter().map(|l| l.unwrap_or(0)).collect(),
            centroids,
            iterations,
        })
    }
}

/// Index of the closest centroid; first index wins ties.
fn nearest(centroids: &[Vec<f64>], point: &[f64]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d: f64 = c.iter().zip(point).map(|(a, b)| (a - b) * (a - b)).sum();
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}
