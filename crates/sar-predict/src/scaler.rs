//! Per-column min-max normalisation.

use crate::{PredictError, PredictResult};

/// Maps every column independently onto `[0, 1]` using the minimum and
/// maximum seen during [`fit`][Self::fit].  A column whose values are all
/// equal maps to `0`.  Values outside the fitted range are not clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl MinMaxScaler {
    /// Fit on a non-empty batch of equally long rows.
    pub fn fit<R: AsRef<[f64]>>(rows: &[R]) -> PredictResult<Self> {
        let first = rows.first().ok_or(PredictError::EmptyDataset)?.as_ref();
        let mut min = first.to_vec();
        let mut max = first.to_vec();
        for row in &rows[1..] {
            let row = row.as_ref();
            if row.len() != min.len() {
                return Err(PredictError::FeatureCount { expected: min.len(), got: row.len() });
            }
            for (i, &v) in row.iter().enumerate() {
                min[i] = min[i].min(v);
                max[i] = max[i].max(v);
            }
        }
        Ok(Self { min, max })
    }

    /// Number of columns.
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    pub fn transform(&self, row: &[f64]) -> PredictResult<Vec<f64>> {
        if row.len() != self.dim() {
            return Err(PredictError::FeatureCount { expected: self.dim(), got: row.len() });
        }
        Ok(row
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(&v, (&lo, &hi))| if hi == lo { 0.0 } else { (v - lo) / (hi - lo) })
            .collect())
    }

    /// Fit and transform the same batch.
    pub fn fit_transform<R: AsRef<[f64]>>(rows: &[R]) -> PredictResult<(Self, Vec<Vec<f64>>)> {
        let scaler = Self::fit(rows)?;
        let out = rows
            .iter()
            .map(|r| scaler.transform(r.as_ref()))
            .collect::<PredictResult<Vec<_>>>()?;
        Ok((scaler, out))
    }
}
