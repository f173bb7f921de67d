//! Labeled datasets and the row selection used by pairwise evaluation.
//!
//! `LabeledDataset` keeps the feature matrix, the label ("target") vector and
//! the feature names row-aligned. Filtering by a label pair and the seeded
//! train/test split both return new datasets; the input is never mutated.
use std::collections::BTreeMap;
use std::fmt;

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;

/// Two class labels under evaluation, kept in the order the caller gave them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelPair {
    pub first: i32,
    pub second: i32,
}

impl LabelPair {
    pub fn new(first: i32, second: i32) -> Self {
        LabelPair { first, second }
    }

    /// The two labels in ascending order, which is the row/column order of the
    /// pair's confusion matrix.
    pub fn sorted(&self) -> (i32, i32) {
        if self.first <= self.second {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        }
    }

    pub fn contains(&self, label: i32) -> bool {
        label == self.first || label == self.second
    }

    pub fn is_degenerate(&self) -> bool {
        self.first == self.second
    }
}

impl From<(i32, i32)> for LabelPair {
    fn from((first, second): (i32, i32)) -> Self {
        LabelPair::new(first, second)
    }
}

impl fmt::Display for LabelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    pub x: Array2<f32>,
    pub y: Array1<i32>,
    pub feature_names: Vec<String>,
}

/// Training and held-out rows produced by [`LabeledDataset::train_test_split`].
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: LabeledDataset,
    pub test: LabeledDataset,
}

impl LabeledDataset {
    pub fn new(
        x: Array2<f32>,
        y: Array1<i32>,
        feature_names: Vec<String>,
    ) -> Result<Self, EvaluationError> {
        if x.nrows() != y.len() {
            return Err(EvaluationError::LengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if feature_names.len() != x.ncols() {
            return Err(EvaluationError::LengthMismatch {
                rows: x.ncols(),
                labels: feature_names.len(),
            });
        }
        Ok(LabeledDataset {
            x,
            y,
            feature_names,
        })
    }

    /// Build a dataset with generated feature names `f0`, `f1`, ...
    pub fn from_arrays(x: Array2<f32>, y: Array1<i32>) -> Result<Self, EvaluationError> {
        let names = (0..x.ncols()).map(|i| format!("f{}", i)).collect();
        Self::new(x, y, names)
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Distinct labels in ascending order.
    pub fn classes(&self) -> Vec<i32> {
        self.class_counts().into_keys().collect()
    }

    pub fn class_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for &label in self.y.iter() {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    pub fn log_input_data_summary(&self) {
        log::info!(
            "{} rows, {} feature columns, {} classes",
            self.n_samples(),
            self.n_features(),
            self.class_counts().len()
        );
        for (label, count) in self.class_counts() {
            log::debug!("class {}: {} rows", label, count);
        }
    }

    /// Keep the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> LabeledDataset {
        LabeledDataset {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Keep the rows where `mask[i]` is true, preserving row order.
    pub fn filter(&self, mask: &[bool]) -> LabeledDataset {
        let selected_indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| if m { Some(i) } else { None })
            .collect();
        self.select_rows(&selected_indices)
    }

    /// Rows whose label is one of the two labels of `pair`, in original order.
    pub fn filter_by_pair(&self, pair: LabelPair) -> LabeledDataset {
        let mask: Vec<bool> = self.y.iter().map(|&label| pair.contains(label)).collect();
        self.filter(&mask)
    }

    /// Shuffle the rows with a seeded RNG and cut off `ceil(test_fraction * n)`
    /// held-out rows; the remaining rows are the training set.
    ///
    /// The first `n_test` entries of the permutation become the held-out set,
    /// so both parts come out in shuffled order. Either part being empty is an
    /// error.
    pub fn train_test_split(
        &self,
        test_fraction: f64,
        seed: u64,
    ) -> Result<TrainTestSplit, EvaluationError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(EvaluationError::InvalidFraction(test_fraction));
        }

        let n_samples = self.n_samples();
        let n_test = (test_fraction * n_samples as f64).ceil() as usize;
        let n_train = n_samples - n_test;
        if n_test == 0 || n_train == 0 {
            return Err(EvaluationError::EmptySplit {
                rows: n_samples,
                train: n_train,
                test: n_test,
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..n_samples).collect();
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        Ok(TrainTestSplit {
            train: self.select_rows(train_idx),
            test: self.select_rows(test_idx),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy() -> LabeledDataset {
        let x = array![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0], [4.0, 1.0], [5.0, 1.0]];
        let y = array![0, 1, 2, 0, 1, 2];
        LabeledDataset::from_arrays(x, y).unwrap()
    }

    #[test]
    fn new_rejects_label_length_mismatch() {
        let x = Array2::<f32>::zeros((3, 2));
        let y = array![0, 1];
        assert!(matches!(
            LabeledDataset::from_arrays(x, y),
            Err(EvaluationError::LengthMismatch { rows: 3, labels: 2 })
        ));
    }

    #[test]
    fn filter_by_pair_keeps_row_order() {
        let subset = toy().filter_by_pair(LabelPair::new(2, 0));
        assert_eq!(subset.y.to_vec(), vec![0, 2, 0, 2]);
        assert_eq!(subset.x.column(0).to_vec(), vec![0.0, 2.0, 3.0, 5.0]);
        assert_eq!(subset.feature_names, vec!["f0", "f1"]);
    }

    #[test]
    fn label_pair_sorted_and_display() {
        let pair = LabelPair::from((7, 3));
        assert_eq!(pair.sorted(), (3, 7));
        assert_eq!(pair.to_string(), "(7, 3)");
        assert!(LabelPair::new(4, 4).is_degenerate());
    }

    #[test]
    fn split_sizes_follow_ceiling_of_test_fraction() {
        let split = toy().train_test_split(0.33, 42).unwrap();
        // ceil(0.33 * 6) = 2
        assert_eq!(split.test.n_samples(), 2);
        assert_eq!(split.train.n_samples(), 4);
    }

    #[test]
    fn split_rejects_out_of_range_fraction() {
        assert!(matches!(
            toy().train_test_split(1.0, 42),
            Err(EvaluationError::InvalidFraction(_))
        ));
    }

    #[test]
    fn split_of_single_row_is_empty_error() {
        let single = toy().select_rows(&[0]);
        assert!(matches!(
            single.train_test_split(0.33, 42),
            Err(EvaluationError::EmptySplit { rows: 1, train: 0, test: 1 })
        ));
    }
}
