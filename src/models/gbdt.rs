use anyhow::{anyhow, bail};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::binary_classes;

/// Gradient Boosting Decision Tree (GBDT) binary classifier.
///
/// The lower training label is encoded as -1 and the higher as +1.
pub struct GBDTClassifier {
    model: Option<GBDT>,
    classes: Option<(i32, i32)>,
    params: ModelConfig,
}

impl GBDTClassifier {
    pub fn new(params: ModelConfig) -> Self {
        GBDTClassifier {
            model: None,
            classes: None,
            params,
        }
    }

    /// Score above which a row is assigned the positive (higher) label.
    /// LogLikelyhood predicts a probability, the regression losses a margin.
    fn threshold(&self) -> f32 {
        match &self.params.model_type {
            ModelType::GBDT { loss_type, .. } if loss_type == "LogLikelyhood" => 0.5,
            _ => 0.0,
        }
    }
}

fn to_data_vec(x: &Array2<f32>, labels: Option<&[f32]>) -> DataVec {
    let mut data = DataVec::with_capacity(x.nrows());
    for (i, row) in x.rows().into_iter().enumerate() {
        let label = labels.map_or(0.0, |l| l[i]);
        data.push(Data::new_training_data(row.to_vec(), 1.0, label, None));
    }
    data
}

impl ClassifierModel for GBDTClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>) -> anyhow::Result<()> {
        let (negative, positive) = binary_classes(y)?;

        match &self.params.model_type {
            ModelType::GBDT {
                max_depth,
                num_boost_round,
                debug,
                training_optimization_level,
                loss_type,
            } => {
                if !matches!(loss_type.as_str(), "LogLikelyhood" | "SquaredError" | "LAD") {
                    bail!(
                        "Unsupported GBDT loss: {}. Valid options are: LogLikelyhood, SquaredError, LAD",
                        loss_type
                    );
                }

                let mut config = Config::new();
                config.set_feature_size(x.ncols());
                config.set_shrinkage(self.params.learning_rate);
                config.set_max_depth(*max_depth);
                config.set_iterations(*num_boost_round as usize);
                config.set_debug(*debug);
                config.set_training_optimization_level(*training_optimization_level);
                config.set_loss(loss_type);

                let encoded: Vec<f32> = y
                    .iter()
                    .map(|&label| if label == positive { 1.0 } else { -1.0 })
                    .collect();
                let mut train_x = to_data_vec(x, Some(encoded.as_slice()));

                let mut gbdt = GBDT::new(&config);
                gbdt.fit(&mut train_x);

                self.model = Some(gbdt);
                self.classes = Some((negative, positive));
                Ok(())
            }
            other => bail!("Expected ModelType::GBDT params, got {:?}", other),
        }
    }

    fn predict(&self, x: &Array2<f32>) -> anyhow::Result<Array1<i32>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("GBDT model has not been fitted"))?;
        let (negative, positive) = self
            .classes
            .ok_or_else(|| anyhow!("GBDT model has not been fitted"))?;

        let threshold = self.threshold();
        let scores = model.predict(&to_data_vec(x, None));
        Ok(scores
            .into_iter()
            .map(|s| if s > threshold { positive } else { negative })
            .collect())
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn params() -> ModelConfig {
        ModelConfig {
            learning_rate: 0.1,
            model_type: ModelType::GBDT {
                max_depth: 3,
                num_boost_round: 20,
                debug: false,
                training_optimization_level: 2,
                loss_type: "LogLikelyhood".to_string(),
            },
        }
    }

    #[test]
    fn test_gbdt_classifier_separates_two_labels() {
        // Second feature alone separates label 4 from label 9
        let x = array![
            [0.1, 1.0, 5.0],
            [0.4, -1.0, 5.0],
            [0.6, 1.0, 5.0],
            [0.9, -1.0, 5.0],
            [1.2, 1.0, 5.0],
            [1.5, -1.0, 5.0],
            [1.8, 1.0, 5.0],
            [2.1, -1.0, 5.0],
        ];
        let y = array![9, 4, 9, 4, 9, 4, 9, 4];

        let mut classifier = GBDTClassifier::new(params());
        classifier.fit(&x, &y).unwrap();
        let predictions = classifier.predict(&x).unwrap();

        assert_eq!(predictions, y);
    }

    #[test]
    fn predict_before_fit_fails() {
        let classifier = GBDTClassifier::new(params());
        assert!(classifier.predict(&array![[1.0f32]]).is_err());
    }

    #[test]
    fn fit_rejects_unknown_loss() {
        let mut params = params();
        if let ModelType::GBDT { loss_type, .. } = &mut params.model_type {
            *loss_type = "Hinge".to_string();
        }
        let mut classifier = GBDTClassifier::new(params);
        let err = classifier
            .fit(&array![[0.0f32], [1.0]], &array![0, 1])
            .unwrap_err();
        assert!(err.to_string().contains("Hinge"));
    }
}
