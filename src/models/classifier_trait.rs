use ndarray::{Array1, Array2};

/// Contract the pairwise evaluator drives: learn from labeled rows, then
/// predict a label per row.
///
/// Fitting mutates the model. The evaluator takes models by value, so a
/// fitted instance is never shared between two evaluations.
pub trait ClassifierModel {
    /// Fit the model on feature rows `x` and their class labels `y`.
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>) -> anyhow::Result<()>;

    /// Predict one class label per row of `x`. Fails if called before `fit`.
    fn predict(&self, x: &Array2<f32>) -> anyhow::Result<Array1<i32>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<M: ClassifierModel + ?Sized> ClassifierModel for Box<M> {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>) -> anyhow::Result<()> {
        (**self).fit(x, y)
    }

    fn predict(&self, x: &Array2<f32>) -> anyhow::Result<Array1<i32>> {
        (**self).predict(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
