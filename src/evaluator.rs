//! Pairwise evaluation of a classifier.
//!
//! For a pair of labels the evaluator keeps the rows of those two classes,
//! splits them with a fixed seed, fits the supplied model on the training
//! part and scores it on the held-out part.
use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{EvaluationConfig, ModelConfig};
use crate::data_handling::{LabelPair, LabeledDataset};
use crate::error::EvaluationError;
use crate::metrics::ConfusionMatrix;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory::build_model;

/// Outcome of evaluating one label pair.
///
/// `false_detect_first` counts held-out rows truly labeled `pair.first` that
/// were predicted as `pair.second`; `false_detect_second` is the opposite
/// direction. Each count is keyed to the label it describes whatever order
/// the pair was given in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub pair: LabelPair,
    pub accuracy: f64,
    pub false_detect_first: usize,
    pub false_detect_second: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub confusion: ConfusionMatrix,
}

impl PairReport {
    /// Miscount for `label`, or `None` if it is not part of the pair.
    pub fn false_detect(&self, label: i32) -> Option<usize> {
        if label == self.pair.first {
            Some(self.false_detect_first)
        } else if label == self.pair.second {
            Some(self.false_detect_second)
        } else {
            None
        }
    }

    pub fn false_detections(&self) -> BTreeMap<i32, usize> {
        BTreeMap::from([
            (self.pair.first, self.false_detect_first),
            (self.pair.second, self.false_detect_second),
        ])
    }

    /// Held-out rows predicted correctly.
    pub fn correct(&self) -> usize {
        self.n_test - self.false_detect_first - self.false_detect_second
    }
}

impl fmt::Display for PairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model: {}, accuracy: {:.4}, False detect {}: {}, False detect {}: {}",
            self.pair,
            self.accuracy,
            self.pair.first,
            self.false_detect_first,
            self.pair.second,
            self.false_detect_second
        )
    }
}

/// Every unordered pair `(a, b)` with `a < b` over the distinct `classes`,
/// in ascending order.
pub fn all_pairs(classes: &[i32]) -> Vec<LabelPair> {
    let mut classes = classes.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let mut pairs = Vec::with_capacity(classes.len() * classes.len().saturating_sub(1) / 2);
    for (i, &a) in classes.iter().enumerate() {
        for &b in &classes[i + 1..] {
            pairs.push(LabelPair::new(a, b));
        }
    }
    pairs
}

pub struct PairwiseEvaluator<'a> {
    dataset: &'a LabeledDataset,
    config: EvaluationConfig,
}

impl<'a> PairwiseEvaluator<'a> {
    pub fn new(dataset: &'a LabeledDataset) -> Self {
        Self::with_config(dataset, EvaluationConfig::default())
    }

    pub fn with_config(dataset: &'a LabeledDataset, config: EvaluationConfig) -> Self {
        PairwiseEvaluator { dataset, config }
    }

    /// Rows of the two classes in `pair`, in dataset order.
    ///
    /// Fails with `InvalidPair` when the pair repeats a label or either label
    /// has no rows in the dataset.
    pub fn filter_by_pair(&self, pair: LabelPair) -> Result<LabeledDataset, EvaluationError> {
        let invalid = EvaluationError::InvalidPair {
            first: pair.first,
            second: pair.second,
        };
        if pair.is_degenerate() {
            return Err(invalid);
        }

        let subset = self.dataset.filter_by_pair(pair);
        let counts = subset.class_counts();
        if !counts.contains_key(&pair.first) || !counts.contains_key(&pair.second) {
            return Err(invalid);
        }
        Ok(subset)
    }

    /// Fit `model` on the training part of `pair`'s rows and score it on the
    /// held-out part.
    ///
    /// The model is consumed: it is fitted to this pair's split and not handed
    /// back. Repeated calls with the same inputs and a fresh model of the same
    /// configuration produce the same report.
    pub fn evaluate<M: ClassifierModel>(
        &self,
        pair: LabelPair,
        mut model: M,
    ) -> Result<PairReport, EvaluationError> {
        let subset = self.filter_by_pair(pair)?;
        let split = subset.train_test_split(self.config.test_fraction, self.config.seed)?;
        let (train, test) = (&split.train, &split.test);
        log::debug!(
            "pair {}: {} rows, {} train / {} held-out",
            pair,
            subset.n_samples(),
            train.n_samples(),
            test.n_samples()
        );

        let name = model.name().to_string();
        let model_error = |source: anyhow::Error| EvaluationError::Model {
            model: name.clone(),
            source,
        };
        model.fit(&train.x, &train.y).map_err(model_error)?;
        let predictions = model.predict(&test.x).map_err(model_error)?;
        if predictions.len() != test.n_samples() {
            return Err(EvaluationError::LengthMismatch {
                rows: test.n_samples(),
                labels: predictions.len(),
            });
        }

        let (low, high) = pair.sorted();
        if let Some(&outside) = predictions.iter().find(|&&p| !pair.contains(p)) {
            let mut found: Vec<i32> = vec![low, high, outside];
            found.sort_unstable();
            return Err(EvaluationError::ShapeMismatch {
                expected: (low, high),
                found,
            });
        }

        let actual = test.y.to_vec();
        let predicted = predictions.to_vec();
        let confusion = ConfusionMatrix::with_labels(&actual, &predicted, &[low, high])?;

        let accuracy = confusion.accuracy()?;
        let false_detect_first = confusion.false_detections(pair.first);
        let false_detect_second = confusion.false_detections(pair.second);

        let report = PairReport {
            pair,
            accuracy,
            false_detect_first,
            false_detect_second,
            n_train: train.n_samples(),
            n_test: test.n_samples(),
            confusion,
        };
        log::info!("{}", report);
        Ok(report)
    }

    /// Build a fresh model from `params` and evaluate it on `pair`.
    pub fn evaluate_with_config(
        &self,
        pair: LabelPair,
        params: &ModelConfig,
    ) -> Result<PairReport, EvaluationError> {
        self.evaluate(pair, build_model(params))
    }

    /// Evaluate several pairs, each with its own freshly built model.
    ///
    /// Pairs run on the rayon pool; reports come back in the order of `pairs`
    /// and match what sequential calls would return. If any pair fails, the
    /// error of the failing pair earliest in `pairs` is returned.
    pub fn evaluate_pairs(
        &self,
        pairs: &[LabelPair],
        params: &ModelConfig,
    ) -> Result<Vec<PairReport>, EvaluationError> {
        log::info!(
            "evaluating {} pairs with {}",
            pairs.len(),
            params.model_type.name()
        );
        let results: Vec<Result<PairReport, EvaluationError>> = pairs
            .par_iter()
            .map(|&pair| self.evaluate_with_config(pair, params))
            .collect();
        results.into_iter().collect()
    }

    /// Evaluate every pair of classes present in the dataset.
    pub fn evaluate_all_pairs(
        &self,
        params: &ModelConfig,
    ) -> Result<Vec<PairReport>, EvaluationError> {
        self.evaluate_pairs(&all_pairs(&self.dataset.classes()), params)
    }
}
