//! Confusion matrix and accuracy over integer class labels.
use std::fmt;

use serde::Serialize;

use crate::error::EvaluationError;

/// Row-major confusion matrix.
///
/// `labels` is ascending: the union of true and predicted labels for
/// [`ConfusionMatrix::from_labels`], the caller's set for
/// [`ConfusionMatrix::with_labels`]. Entry `(i, j)` counts rows whose actual
/// label is `labels[i]` and whose predicted label is `labels[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<i32>,
    counts: Vec<usize>,
}

impl ConfusionMatrix {
    pub fn from_labels(actual: &[i32], predicted: &[i32]) -> Result<Self, EvaluationError> {
        let mut labels: Vec<i32> = actual.iter().chain(predicted).copied().collect();
        labels.sort_unstable();
        labels.dedup();
        Self::with_labels(actual, predicted, &labels)
    }

    /// Matrix over a fixed label set, so its shape does not depend on which
    /// labels happen to occur. Rows whose actual or predicted label is outside
    /// `labels` are not counted.
    pub fn with_labels(
        actual: &[i32],
        predicted: &[i32],
        labels: &[i32],
    ) -> Result<Self, EvaluationError> {
        if actual.len() != predicted.len() {
            return Err(EvaluationError::LengthMismatch {
                rows: actual.len(),
                labels: predicted.len(),
            });
        }

        let mut labels = labels.to_vec();
        labels.sort_unstable();
        labels.dedup();

        let n = labels.len();
        let mut counts = vec![0usize; n * n];
        for (a, p) in actual.iter().zip(predicted) {
            if let (Ok(i), Ok(j)) = (labels.binary_search(a), labels.binary_search(p)) {
                counts[i * n + j] += 1;
            }
        }

        Ok(ConfusionMatrix { labels, counts })
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// `(n_classes, n_classes)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_classes(), self.n_classes())
    }

    /// Count at row `actual` / column `predicted`, both as matrix indices.
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual * self.n_classes() + predicted]
    }

    /// Count of rows truly `actual` predicted as `predicted`, addressed by label.
    /// Zero when either label does not appear in the matrix.
    pub fn count(&self, actual: i32, predicted: i32) -> usize {
        match (
            self.labels.binary_search(&actual),
            self.labels.binary_search(&predicted),
        ) {
            (Ok(i), Ok(j)) => self.get(i, j),
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Sum of the diagonal.
    pub fn correct(&self) -> usize {
        (0..self.n_classes()).map(|i| self.get(i, i)).sum()
    }

    /// Rows truly of `label` that were predicted as any other label.
    pub fn false_detections(&self, label: i32) -> usize {
        match self.labels.binary_search(&label) {
            Ok(i) => (0..self.n_classes())
                .filter(|&j| j != i)
                .map(|j| self.get(i, j))
                .sum(),
            Err(_) => 0,
        }
    }

    pub fn accuracy(&self) -> Result<f64, EvaluationError> {
        let total = self.total();
        if total == 0 {
            return Err(EvaluationError::EmptyInput);
        }
        Ok(self.correct() as f64 / total as f64)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n_classes() {
            let row: Vec<String> = (0..self.n_classes())
                .map(|j| self.get(i, j).to_string())
                .collect();
            writeln!(f, "{:>6} | {}", self.labels[i], row.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_is_indexed_by_sorted_labels() {
        let actual = [2, 0, 2, 2, 0];
        let predicted = [2, 2, 0, 2, 0];
        let cm = ConfusionMatrix::from_labels(&actual, &predicted).unwrap();
        assert_eq!(cm.labels(), &[0, 2]);
        assert_eq!(cm.shape(), (2, 2));
        assert_eq!(cm.get(0, 0), 1);
        assert_eq!(cm.get(0, 1), 1);
        assert_eq!(cm.get(1, 0), 1);
        assert_eq!(cm.get(1, 1), 2);
        assert_eq!(cm.count(2, 0), 1);
        assert_eq!(cm.correct(), 3);
        assert_eq!(cm.total(), 5);
    }

    #[test]
    fn labels_only_predicted_widen_the_matrix() {
        let cm = ConfusionMatrix::from_labels(&[1, 1], &[1, 9]).unwrap();
        assert_eq!(cm.labels(), &[1, 9]);
        assert_eq!(cm.false_detections(1), 1);
        assert_eq!(cm.false_detections(9), 0);
    }

    #[test]
    fn single_class_gives_one_by_one_matrix() {
        let cm = ConfusionMatrix::from_labels(&[4, 4, 4], &[4, 4, 4]).unwrap();
        assert_eq!(cm.shape(), (1, 1));
        assert_eq!(cm.accuracy().unwrap(), 1.0);
    }

    #[test]
    fn fixed_labels_keep_two_by_two_shape() {
        let cm = ConfusionMatrix::with_labels(&[0, 0, 0], &[0, 0, 0], &[1, 0]).unwrap();
        assert_eq!(cm.labels(), &[0, 1]);
        assert_eq!(cm.shape(), (2, 2));
        assert_eq!(cm.get(0, 0), 3);
        assert_eq!(cm.get(1, 1), 0);
        assert_eq!(cm.false_detections(1), 0);
        assert_eq!(cm.accuracy().unwrap(), 1.0);
    }

    #[test]
    fn fixed_labels_skip_rows_outside_the_set() {
        let cm = ConfusionMatrix::with_labels(&[0, 1, 5], &[1, 1, 0], &[0, 1]).unwrap();
        assert_eq!(cm.total(), 2);
        assert_eq!(cm.count(0, 1), 1);
    }

    #[test]
    fn empty_matrix_has_no_accuracy() {
        let cm = ConfusionMatrix::with_labels(&[], &[], &[0, 1]).unwrap();
        assert!(matches!(cm.accuracy(), Err(EvaluationError::EmptyInput)));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        assert!(matches!(
            ConfusionMatrix::from_labels(&[0, 1], &[0]),
            Err(EvaluationError::LengthMismatch { .. })
        ));
    }
}
