//! Labelled training data.
//!
//! # CSV format
//!
//! One header row, then one row per patient.  Every column except the last
//! two is a numeric feature; the last two are the triage class (`0..=3`) and
//! the survival probability:
//!
//! ```text
//! idade,fc,fr,pas,spo2,temp,pr,sg,fx,queim,gcs,avpu,tri,sobr
//! 34,80,16,120,98,36.5,1,0,0,0,15,0,0,0.97
//! ```
//!
//! Column names are not interpreted.

use std::io::Read;
use std::path::Path;

use sar_core::TriageClass;

use crate::{PredictError, PredictResult};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub triage:   Vec<TriageClass>,
    pub survival: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature count per row; zero for an empty dataset.
    pub fn dim(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    pub fn push(&mut self, features: Vec<f64>, triage: TriageClass, survival: f64) {
        self.features.push(features);
        self.triage.push(triage);
        self.survival.push(survival);
    }

    /// Rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        let mut out = Dataset::default();
        for &i in indices {
            out.push(self.features[i].clone(), self.triage[i], self.survival[i]);
        }
        out
    }
}

/// Load a dataset from a CSV file.
pub fn load_dataset(path: &Path) -> PredictResult<Dataset> {
    let file = std::fs::File::open(path)?;
    read_dataset(file)
}

/// Like [`load_dataset`] but accepts any `Read` source.
pub fn read_dataset<R: Read>(reader: R) -> PredictResult<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut out = Dataset::default();

    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let row = line + 1;
        let values = record
            .iter()
            .map(|f| {
                f.trim()
                    .parse::<f64>()
                    .map_err(|_| PredictError::Parse(format!("row {row}: invalid number {f:?}")))
            })
            .collect::<PredictResult<Vec<f64>>>()?;

        if values.len() < 3 {
            return Err(PredictError::Parse(format!(
                "row {row}: need at least one feature plus tri and sobr"
            )));
        }
        let n = values.len() - 2;
        let tri = values[n];
        if tri.fract() != 0.0 || !(0.0..=3.0).contains(&tri) {
            return Err(PredictError::Parse(format!("row {row}: triage class {tri} outside 0..=3")));
        }
        let triage = TriageClass::from_index(tri as u8)?;
        let survival = values[n + 1];

        if !out.is_empty() && n != out.dim() {
            return Err(PredictError::FeatureCount { expected: out.dim(), got: n });
        }
        out.push(values[..n].to_vec(), triage, survival);
    }

    if out.is_empty() {
        return Err(PredictError::EmptyDataset);
    }
    tracing::info!(rows = out.len(), features = out.dim(), "training dataset loaded");
    Ok(out)
}
