use thiserror::Error;

/// Failures of a single pairwise evaluation. None of them are retried: the
/// split is deterministic, so the same inputs reproduce the same failure.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("label pair ({first}, {second}) selects fewer than two distinct classes present in the dataset")]
    InvalidPair { first: i32, second: i32 },

    #[error("splitting {rows} rows left {train} training and {test} held-out rows")]
    EmptySplit { rows: usize, train: usize, test: usize },

    #[error("confusion matrix over labels {found:?} is not the 2x2 matrix over {expected:?}")]
    ShapeMismatch { expected: (i32, i32), found: Vec<i32> },

    #[error("{rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("test fraction must lie strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),

    #[error("cannot compute a metric over zero rows")]
    EmptyInput,

    #[error("model `{model}` failed")]
    Model {
        model: String,
        #[source]
        source: anyhow::Error,
    },
}
