use anyhow::{anyhow, bail, Context};
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::{Svm, SvmParams};
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::binary_classes;

/// Support vector machine over two labels, backed by `linfa-svm`.
///
/// The higher training label is the positive (`true`) class.
pub struct SVMClassifier {
    model: Option<Svm<f64, bool>>,
    classes: Option<(i32, i32)>,
    params: ModelConfig,
}

impl SVMClassifier {
    pub fn new(params: ModelConfig) -> Self {
        SVMClassifier {
            model: None,
            classes: None,
            params,
        }
    }
}

impl ClassifierModel for SVMClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>) -> anyhow::Result<()> {
        let (negative, positive) = binary_classes(y)?;

        let ModelType::SVM {
            eps,
            c,
            kernel,
            gaussian_kernel_eps,
            polynomial_kernel_constant,
            polynomial_kernel_degree,
        } = &self.params.model_type
        else {
            bail!(
                "Expected ModelType::SVM params, got {:?}",
                self.params.model_type
            );
        };

        let (c1, c2) = *c;
        let params: SvmParams<f64, bool> =
            Svm::<f64, bool>::params().eps(*eps).pos_neg_weights(c1, c2);

        let params = match kernel.as_str() {
            "linear" => params.linear_kernel(),
            "gauss" => params.gaussian_kernel(*gaussian_kernel_eps),
            "poly" => {
                params.polynomial_kernel(*polynomial_kernel_constant, *polynomial_kernel_degree)
            }
            _ => bail!(
                "Unsupported kernel type: {}. Valid options are: linear, gauss, poly",
                kernel
            ),
        };

        let targets: Array1<bool> = y.mapv(|label| label == positive);
        let dataset = Dataset::new(x.mapv(f64::from), targets);

        let model = params.fit(&dataset).context("failed to fit SVM")?;
        self.model = Some(model);
        self.classes = Some((negative, positive));
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> anyhow::Result<Array1<i32>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("SVM model has not been fitted"))?;
        let (negative, positive) = self
            .classes
            .ok_or_else(|| anyhow!("SVM model has not been fitted"))?;

        let records = x.mapv(f64::from);
        let predictions: Array1<bool> = model.predict(&records);
        Ok(predictions.mapv(|p| if p { positive } else { negative }))
    }

    fn name(&self) -> &str {
        "svm"
    }
}
