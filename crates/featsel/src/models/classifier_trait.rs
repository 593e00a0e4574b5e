use crate::error::Result;
use crate::math::Array2;

/// Contract between the leave-one-out evaluator and a classifier.
///
/// A classifier is retrained once per fold, so `train` replaces whatever was
/// stored before rather than accumulating.
pub trait Classifier {
    /// Replace the training set. Rows of `instances` pair with `labels`.
    fn train(&mut self, instances: Array2<f64>, labels: Vec<i32>) -> Result<()>;

    /// Predict the label of a single instance.
    fn predict(&self, instance: &[f64]) -> Result<i32>;

    /// Drop the training set, returning its buffers so callers can reuse them.
    fn reset(&mut self) -> (Array2<f64>, Vec<i32>);

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
