//! K-nearest-neighbours classifier.
//!
//! Stores the training rows and labels each query row by a vote over its `k`
//! closest training rows (Euclidean distance).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::{anyhow, bail};
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

pub struct KNNClassifier {
    x_train: Option<Array2<f32>>,
    y_train: Option<Array1<i32>>,
    params: ModelConfig,
}

impl KNNClassifier {
    pub fn new(params: ModelConfig) -> Self {
        KNNClassifier {
            x_train: None,
            y_train: None,
            params,
        }
    }

    /// Create with `k` neighbours and uniform votes.
    pub fn with_k(k: usize) -> Self {
        Self::new(ModelConfig::new(
            0.0,
            ModelType::KNN {
                n_neighbors: k,
                distance_weighted: false,
            },
        ))
    }

    fn settings(&self) -> anyhow::Result<(usize, bool)> {
        match &self.params.model_type {
            ModelType::KNN {
                n_neighbors,
                distance_weighted,
            } => Ok((*n_neighbors, *distance_weighted)),
            other => bail!("Expected ModelType::KNN params, got {:?}", other),
        }
    }
}

fn squared_distance(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    a.iter().zip(b.iter()).map(|(p, q)| (p - q) * (p - q)).sum()
}

/// Label for one query row. Neighbour ties are broken by training row index and
/// vote ties go to the smaller label, so predictions are deterministic.
fn classify(
    point: ArrayView1<f32>,
    x_train: &Array2<f32>,
    y_train: &Array1<i32>,
    k: usize,
    distance_weighted: bool,
) -> i32 {
    let mut neighbours: Vec<(f32, usize)> = x_train
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| (squared_distance(point, row), i))
        .collect();
    neighbours.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));
    neighbours.truncate(k);

    let mut votes: BTreeMap<i32, f64> = BTreeMap::new();
    for (dist2, i) in neighbours {
        let weight = if distance_weighted {
            1.0 / (f64::from(dist2).sqrt() + 1e-10)
        } else {
            1.0
        };
        *votes.entry(y_train[i]).or_insert(0.0) += weight;
    }

    let mut best = (y_train[0], f64::NEG_INFINITY);
    for (label, weight) in votes {
        if weight > best.1 {
            best = (label, weight);
        }
    }
    best.0
}

impl ClassifierModel for KNNClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>) -> anyhow::Result<()> {
        let (k, _) = self.settings()?;
        if k == 0 {
            bail!("n_neighbors must be at least 1");
        }
        if x.nrows() == 0 {
            bail!("cannot fit k-NN on an empty training set");
        }
        if x.nrows() != y.len() {
            bail!("{} feature rows but {} labels", x.nrows(), y.len());
        }
        if k > x.nrows() {
            log::debug!(
                "n_neighbors={} exceeds {} training rows, voting over all rows",
                k,
                x.nrows()
            );
        }
        self.x_train = Some(x.clone());
        self.y_train = Some(y.clone());
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> anyhow::Result<Array1<i32>> {
        let (k, distance_weighted) = self.settings()?;
        let x_train = self
            .x_train
            .as_ref()
            .ok_or_else(|| anyhow!("k-NN model has not been fitted"))?;
        let y_train = self
            .y_train
            .as_ref()
            .ok_or_else(|| anyhow!("k-NN model has not been fitted"))?;
        if x.ncols() != x_train.ncols() {
            bail!(
                "query rows have {} features, training rows have {}",
                x.ncols(),
                x_train.ncols()
            );
        }

        let predictions: Vec<i32> = (0..x.nrows())
            .into_par_iter()
            .map(|i| classify(x.row(i), x_train, y_train, k, distance_weighted))
            .collect();

        Ok(Array1::from_vec(predictions))
    }

    fn name(&self) -> &str {
        "knn"
    }
}
