use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for models in the crate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub learning_rate: f32,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    GBDT {
        max_depth: u32,
        num_boost_round: u32,
        debug: bool,
        training_optimization_level: u8,
        loss_type: String,
    },
    KNN {
        n_neighbors: usize,
        distance_weighted: bool,
    },
    #[cfg(feature = "svm")]
    SVM {
        eps: f64,
        c: (f64, f64),
        kernel: String,
        gaussian_kernel_eps: f64,
        polynomial_kernel_constant: f64,
        polynomial_kernel_degree: f64,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::GBDT {
            max_depth: 6,
            num_boost_round: 50,
            debug: false,
            training_optimization_level: 2,
            loss_type: "LogLikelyhood".to_string(),
        }
    }
}

impl ModelType {
    /// Short lowercase name, matching what `FromStr` accepts.
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::GBDT { .. } => "gbdt",
            ModelType::KNN { .. } => "knn",
            #[cfg(feature = "svm")]
            ModelType::SVM { .. } => "svm",
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gbdt" => Ok(ModelType::default()),
            "knn" => Ok(ModelType::KNN {
                n_neighbors: 5,
                distance_weighted: false,
            }),
            #[cfg(feature = "svm")]
            "svm" => Ok(ModelType::SVM {
                eps: 0.1,
                c: (1.0, 1.0),
                kernel: "gauss".to_string(),
                gaussian_kernel_eps: 10.0,
                polynomial_kernel_constant: 1.0,
                polynomial_kernel_degree: 3.0,
            }),
            _ => Err(format!(
                "Unknown model type: {}. To use svm, please compile with `--features svm`",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}

fn default_test_fraction() -> f64 {
    0.33
}

fn default_seed() -> u64 {
    42
}

/// How the filtered rows of a pair are split into training and held-out rows.
///
/// The seed is fixed so repeated evaluations of the same pair see the same
/// partition.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            seed: default_seed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_type_from_str_is_case_insensitive() {
        let knn: ModelType = "KNN".parse().unwrap();
        assert_eq!(
            knn,
            ModelType::KNN {
                n_neighbors: 5,
                distance_weighted: false
            }
        );
        assert_eq!("gbdt".parse::<ModelType>().unwrap().name(), "gbdt");
    }

    #[test]
    fn model_type_from_str_rejects_unknown() {
        let err = "random_forest".parse::<ModelType>().unwrap_err();
        assert!(err.contains("random_forest"));
    }

    #[test]
    fn evaluation_config_defaults() {
        let cfg = EvaluationConfig::default();
        assert_eq!(cfg.test_fraction, 0.33);
        assert_eq!(cfg.seed, 42);
    }
}
