#![allow(dead_code)]

use ndarray::{Array1, Array2};
use pairwise_classifiers::LabeledDataset;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 150 rows, 50 each of labels 0, 1 and 2, interleaved.
///
/// Label 0 sits in its own cluster far from the others. Labels 1 and 2 share
/// one feature vector, so no model can tell them apart.
pub fn three_class_dataset() -> LabeledDataset {
    let n = 150;
    let mut features = Vec::with_capacity(n * 4);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let label = (i % 3) as i32;
        let k = (i / 3) as f32;
        let row = match label {
            0 => [0.02 * k, 0.5 + 0.01 * k, 1.0, 0.2],
            _ => [5.0, 5.0, 3.0, 1.0],
        };
        features.extend_from_slice(&row);
        labels.push(label);
    }
    let x = Array2::from_shape_vec((n, 4), features).unwrap();
    let names = ["sepal_length", "sepal_width", "petal_length", "petal_width"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    LabeledDataset::new(x, Array1::from_vec(labels), names).unwrap()
}
