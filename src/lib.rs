//! pairwise-classifiers: train/test evaluation of classifiers on class pairs.
//!
//! Given a labeled dataset and two class labels, the crate isolates the rows of
//! those two classes, splits them with a fixed seed, fits a fresh model and
//! reports accuracy together with the false detections in each direction.
//!
//! Models sit behind the [`models::classifier_trait::ClassifierModel`] trait.
//! GBDT and k-NN are always available; the linfa-backed SVM needs
//! `--features svm`.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod evaluator;
pub mod io;
pub mod metrics;
pub mod models;

pub use data_handling::{LabelPair, LabeledDataset, TrainTestSplit};
pub use error::EvaluationError;
pub use evaluator::{all_pairs, PairReport, PairwiseEvaluator};
