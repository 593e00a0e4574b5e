//! Subset scoring.
//!
//! The search engine asks a `SubsetEvaluator` for the accuracy of each
//! candidate subset. `LeaveOneOut` is the production scorer: it holds every
//! instance out once, trains the classifier on the rest and counts correct
//! predictions.
use crate::dataset::Dataset;
use crate::error::{Result, SelectionError};
use crate::math::Array2;
use crate::models::{Classifier, NearestNeighborClassifier};
use crate::subset::FeatureSubset;

/// Scores a feature subset against a dataset. Higher is better.
pub trait SubsetEvaluator {
    fn evaluate(&mut self, dataset: &Dataset, subset: &FeatureSubset) -> Result<f64>;
}

/// Leave-one-out cross-validation around an owned classifier.
#[derive(Debug, Clone, Default)]
pub struct LeaveOneOut<C = NearestNeighborClassifier> {
    classifier: C,
}

impl LeaveOneOut<NearestNeighborClassifier> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Classifier> LeaveOneOut<C> {
    pub fn with_classifier(classifier: C) -> Self {
        LeaveOneOut { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Number of held-out instances whose label was predicted correctly.
    pub fn correct_predictions(
        &mut self,
        dataset: &Dataset,
        subset: &FeatureSubset,
    ) -> Result<usize> {
        let n = dataset.n_instances();
        if n < 2 {
            return Err(SelectionError::InsufficientData(n));
        }

        let projected = dataset.project(subset)?;
        let labels = dataset.labels();

        let mut correct = 0;
        let mut train_x = Array2::with_row_capacity(projected.ncols(), n - 1);
        let mut train_y = Vec::with_capacity(n - 1);

        for held_out in 0..n {
            train_x.clear();
            train_y.clear();
            for (idx, row) in projected.rows().enumerate() {
                if idx == held_out {
                    continue;
                }
                train_x
                    .push_row(row)
                    .map_err(|e| SelectionError::invalid(e.to_string()))?;
                train_y.push(labels[idx]);
            }

            self.classifier.train(train_x, train_y)?;
            let prediction = self.classifier.predict(projected.row_slice(held_out));
            (train_x, train_y) = self.classifier.reset();

            if prediction? == labels[held_out] {
                correct += 1;
            }
        }

        Ok(correct)
    }
}

impl<C: Classifier> SubsetEvaluator for LeaveOneOut<C> {
    fn evaluate(&mut self, dataset: &Dataset, subset: &FeatureSubset) -> Result<f64> {
        let correct = self.correct_predictions(dataset, subset)?;
        let accuracy = correct as f64 / dataset.n_instances() as f64;
        log::trace!(
            "{} leave-one-out on {:?}: {}/{} correct",
            self.classifier.name(),
            subset.indices(),
            correct,
            dataset.n_instances()
        );
        Ok(accuracy)
    }
}
