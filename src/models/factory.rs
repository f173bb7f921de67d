use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

/// Build a fresh, unfit boxed classifier model from a `ModelConfig`.
pub fn build_model(params: &ModelConfig) -> Box<dyn ClassifierModel> {
    match params.model_type {
        ModelType::GBDT { .. } => {
            Box::new(crate::models::gbdt::GBDTClassifier::new(params.clone()))
        }

        ModelType::KNN { .. } => Box::new(crate::models::knn::KNNClassifier::new(params.clone())),

        #[cfg(feature = "svm")]
        ModelType::SVM { .. } => Box::new(crate::models::svm::SVMClassifier::new(params.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_model_named_after_config() {
        for name in ["gbdt", "knn"] {
            let params = ModelConfig::new(0.1, name.parse().unwrap());
            assert_eq!(build_model(&params).name(), name);
        }
    }
}
