//! Unit tests for sar-predict.

use std::io::Cursor;

use sar_core::TriageClass;

use crate::{
    read_dataset, Dataset, KnnClassifier, KnnRegressor, MinMaxScaler, PredictError,
    TriagePredictor, VictimPredictor,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two well-separated groups on a single feature.
fn two_groups() -> Dataset {
    let mut d = Dataset::default();
    for i in 0..10 {
        d.push(vec![i as f64, 0.0], TriageClass::Green, 0.9);
        d.push(vec![100.0 + i as f64, 1.0], TriageClass::Red, 0.2);
    }
    d
}

// ── Scaler ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scaler_tests {
    use super::*;

    #[test]
    fn maps_columns_to_unit_range() {
        let rows = vec![vec![0.0, 10.0], vec![5.0, 20.0], vec![10.0, 30.0]];
        let (s, out) = MinMaxScaler::fit_transform(&rows).unwrap();
        assert_eq!(s.dim(), 2);
        assert_eq!(out[1], vec![0.5, 0.5]);
        assert_eq!(out[2], vec![1.0, 1.0]);
    }

    #[test]
    fn degenerate_column_maps_to_zero() {
        let rows = vec![vec![3.0, 1.0], vec![3.0, 2.0]];
        let s = MinMaxScaler::fit(&rows).unwrap();
        assert_eq!(s.transform(&[3.0, 2.0]).unwrap(), vec![0.0, 1.0]);
        assert_eq!(s.transform(&[99.0, 1.0]).unwrap()[0], 0.0);
    }

    #[test]
    fn rejects_empty_and_ragged_input() {
        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(MinMaxScaler::fit(&empty), Err(PredictError::EmptyDataset)));
        let ragged = vec![vec![1.0], vec![1.0, 2.0]];
        assert!(matches!(MinMaxScaler::fit(&ragged), Err(PredictError::FeatureCount { .. })));
        let s = MinMaxScaler::fit(&[vec![1.0]]).unwrap();
        assert!(s.transform(&[1.0, 2.0]).is_err());
    }
}

// ── KNN ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod knn_tests {
    use super::*;

    #[test]
    fn classifier_majority_vote() {
        let x = vec![vec![0.0], vec![0.1], vec![0.2], vec![1.0]];
        let y = vec![TriageClass::Yellow, TriageClass::Yellow, TriageClass::Black, TriageClass::Black];
        let knn = KnnClassifier::fit(3, x, y).unwrap();
        assert_eq!(knn.predict(&[0.05]), TriageClass::Yellow);
    }

    #[test]
    fn classifier_tie_goes_to_closer_class() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![TriageClass::Black, TriageClass::Green];
        let knn = KnnClassifier::fit(2, x, y).unwrap();
        assert_eq!(knn.predict(&[0.1]), TriageClass::Black);
        assert_eq!(knn.predict(&[0.9]), TriageClass::Green);
    }

    #[test]
    fn classifier_full_tie_goes_to_lower_class() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![TriageClass::Red, TriageClass::Yellow];
        let knn = KnnClassifier::fit(2, x, y).unwrap();
        assert_eq!(knn.predict(&[0.5]), TriageClass::Yellow);
    }

    #[test]
    fn regressor_averages_neighbours() {
        let x = vec![vec![0.0], vec![0.1], vec![5.0]];
        let knn = KnnRegressor::fit(2, x, vec![0.2, 0.4, 1.0]).unwrap();
        assert!((knn.predict(&[0.0]) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn k_larger_than_dataset_uses_all_samples() {
        let knn = KnnRegressor::fit(10, vec![vec![0.0], vec![1.0]], vec![0.0, 1.0]).unwrap();
        assert!((knn.predict(&[0.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_k_is_rejected() {
        assert!(matches!(
            KnnRegressor::fit(0, vec![vec![0.0]], vec![0.0]),
            Err(PredictError::ZeroK)
        ));
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dataset_tests {
    use super::*;
    use crate::load_dataset;

    #[test]
    fn last_two_columns_are_labels() {
        let csv = "a,b,tri,sobr\n1,2,3,0.1\n4,5,0,0.9\n";
        let d = read_dataset(Cursor::new(csv)).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.dim(), 2);
        assert_eq!(d.triage, vec![TriageClass::Black, TriageClass::Green]);
        assert_eq!(d.survival, vec![0.1, 0.9]);
    }

    #[test]
    fn invalid_rows_are_errors() {
        assert!(read_dataset(Cursor::new("a,tri,sobr\n1,7,0.5\n")).is_err());
        assert!(read_dataset(Cursor::new("a,tri,sobr\nx,1,0.5\n")).is_err());
        assert!(read_dataset(Cursor::new("tri,sobr\n1,0.5\n")).is_err());
        assert!(matches!(
            read_dataset(Cursor::new("a,tri,sobr\n")),
            Err(PredictError::EmptyDataset)
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,tri,sobr\n1,1,0.5\n").unwrap();
        assert_eq!(load_dataset(&path).unwrap().len(), 1);
    }
}

// ── Predictor ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod predictor_tests {
    use super::*;

    #[test]
    fn separable_data_scores_perfectly() {
        let p = VictimPredictor::train(&two_groups(), 3, 42).unwrap();
        let m = p.metrics();
        assert_eq!(m.train_rows, 16);
        assert_eq!(m.test_rows, 4);
        assert_eq!(m.tri_accuracy, 1.0);
        assert!(m.sobr_mae < 1e-9);
    }

    #[test]
    fn predicts_group_of_query() {
        let p = VictimPredictor::train(&two_groups(), 3, 42).unwrap();
        assert_eq!(p.feature_count(), 2);
        let near_red = p.predict(&[104.0, 1.0]).unwrap();
        assert_eq!(near_red.triage, TriageClass::Red);
        assert!((near_red.survival - 0.2).abs() < 1e-9);
        assert_eq!(p.predict(&[2.0, 0.0]).unwrap().triage, TriageClass::Green);
    }

    #[test]
    fn survival_is_clamped() {
        let mut d = Dataset::default();
        d.push(vec![0.0], TriageClass::Green, 1.4);
        d.push(vec![1.0], TriageClass::Green, 1.2);
        let p = VictimPredictor::train(&d, 1, 0).unwrap();
        assert_eq!(p.predict(&[0.0]).unwrap().survival, 1.0);
    }

    #[test]
    fn single_row_reuses_train_split() {
        let mut d = Dataset::default();
        d.push(vec![0.0], TriageClass::Yellow, 0.5);
        let p = VictimPredictor::train(&d, 5, 0).unwrap();
        assert_eq!(p.metrics().test_rows, 1);
        assert_eq!(p.metrics().tri_accuracy, 1.0);
    }

    #[test]
    fn training_is_deterministic() {
        let a = VictimPredictor::train(&two_groups(), 3, 7).unwrap().metrics();
        let b = VictimPredictor::train(&two_groups(), 3, 7).unwrap().metrics();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_signal_length_is_an_error() {
        let p = VictimPredictor::train(&two_groups(), 3, 42).unwrap();
        assert!(matches!(p.predict(&[1.0]), Err(PredictError::FeatureCount { expected: 2, got: 1 })));
    }
}
