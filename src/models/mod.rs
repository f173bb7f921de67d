pub mod classifier_trait;
pub mod factory;
pub mod gbdt;
pub mod knn;
#[cfg(feature = "svm")]
pub mod svm;
pub mod utils;
