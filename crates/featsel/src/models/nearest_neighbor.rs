use crate::error::{Result, SelectionError};
use crate::math::Array2;
use crate::models::classifier_trait::Classifier;

/// 1-nearest-neighbor classifier under squared Euclidean distance.
///
/// The square root is skipped because only the ordering of distances
/// matters. Ties go to the first training row reaching the minimum.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighborClassifier {
    instances: Array2<f64>,
    labels: Vec<i32>,
}

impl NearestNeighborClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trained(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    /// Index of the nearest training row.
    pub fn nearest(&self, instance: &[f64]) -> Result<usize> {
        if !self.is_trained() {
            return Err(SelectionError::NotTrained);
        }
        if instance.len() != self.instances.ncols() {
            return Err(SelectionError::DimensionMismatch {
                expected: self.instances.ncols(),
                actual: instance.len(),
            });
        }

        let mut best_idx = 0;
        let mut best_distance = f64::INFINITY;
        for (idx, row) in self.instances.rows().enumerate() {
            let distance = squared_euclidean(row, instance);
            // strict: an equal distance later in the scan never wins
            if distance < best_distance {
                best_distance = distance;
                best_idx = idx;
            }
        }
        Ok(best_idx)
    }
}

impl Classifier for NearestNeighborClassifier {
    fn train(&mut self, instances: Array2<f64>, labels: Vec<i32>) -> Result<()> {
        if instances.nrows() != labels.len() {
            return Err(SelectionError::invalid(format!(
                "number of instances ({}) and labels ({}) must match",
                instances.nrows(),
                labels.len()
            )));
        }
        self.instances = instances;
        self.labels = labels;
        Ok(())
    }

    fn predict(&self, instance: &[f64]) -> Result<i32> {
        let idx = self.nearest(instance)?;
        Ok(self.labels[idx])
    }

    fn reset(&mut self) -> (Array2<f64>, Vec<i32>) {
        (
            std::mem::take(&mut self.instances),
            std::mem::take(&mut self.labels),
        )
    }

    fn name(&self) -> &str {
        "1-nearest-neighbor"
    }
}

#[inline]
fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained(rows: Vec<Vec<f64>>, labels: Vec<i32>) -> NearestNeighborClassifier {
        let mut clf = NearestNeighborClassifier::new();
        clf.train(Array2::from_rows(rows).unwrap(), labels).unwrap();
        clf
    }

    #[test]
    fn predicts_label_of_closest_row() {
        let clf = trained(
            vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]],
            vec![1, 2, 3],
        );
        assert_eq!(clf.predict(&[0.9, 1.2]).unwrap(), 2);
        assert_eq!(clf.predict(&[4.0, 4.5]).unwrap(), 3);
        assert_eq!(clf.predict(&[-1.0, 0.2]).unwrap(), 1);
    }

    #[test]
    fn first_row_wins_ties() {
        // both rows are at distance 1 from the query
        let clf = trained(vec![vec![0.0], vec![2.0]], vec![7, 9]);
        assert_eq!(clf.predict(&[1.0]).unwrap(), 7);

        let clf = trained(vec![vec![2.0], vec![0.0]], vec![9, 7]);
        assert_eq!(clf.predict(&[1.0]).unwrap(), 9);
    }

    #[test]
    fn zero_width_instances_pick_first_row() {
        let x = Array2::from_shape_vec((3, 0), vec![]).unwrap();
        let mut clf = NearestNeighborClassifier::new();
        clf.train(x, vec![4, 5, 6]).unwrap();
        assert_eq!(clf.predict(&[]).unwrap(), 4);
    }

    #[test]
    fn untrained_prediction_fails() {
        let clf = NearestNeighborClassifier::new();
        assert_eq!(clf.predict(&[1.0]), Err(SelectionError::NotTrained));
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let clf = trained(vec![vec![0.0, 0.0]], vec![1]);
        assert_eq!(
            clf.predict(&[1.0]),
            Err(SelectionError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn mismatched_training_sizes_are_rejected() {
        let mut clf = NearestNeighborClassifier::new();
        let x = Array2::from_rows(vec![vec![0.0], vec![1.0]]).unwrap();
        let err = clf.train(x, vec![1]).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidInput(_)));
        assert!(!clf.is_trained());
    }

    #[test]
    fn retraining_replaces_previous_data() {
        let mut clf = trained(vec![vec![0.0]], vec![1]);
        clf.train(Array2::from_rows(vec![vec![10.0]]).unwrap(), vec![2])
            .unwrap();
        assert_eq!(clf.n_samples(), 1);
        assert_eq!(clf.predict(&[0.0]).unwrap(), 2);

        let (x, y) = clf.reset();
        assert_eq!(x.nrows(), 1);
        assert_eq!(y, vec![2]);
        assert!(!clf.is_trained());
    }
}
