//! The labeled feature table the search runs over.
//!
//! `Dataset` pairs a row-major feature matrix with one integer class label per
//! row. It only checks structural consistency; the evaluator decides whether
//! there are enough instances to score a subset.
use std::collections::BTreeMap;

use crate::error::{Result, SelectionError};
use crate::math::Array2;
use crate::subset::FeatureSubset;

#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f64>,
    y: Vec<i32>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Vec<i32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(SelectionError::invalid(format!(
                "feature table has {} rows but {} labels were given",
                x.nrows(),
                y.len()
            )));
        }
        Ok(Dataset { x, y })
    }

    /// Build from nested rows, rejecting rows of unequal width.
    pub fn from_rows(rows: Vec<Vec<f64>>, labels: Vec<i32>) -> Result<Self> {
        let x = Array2::from_rows(rows).map_err(|e| SelectionError::invalid(e.to_string()))?;
        Self::new(x, labels)
    }

    pub fn n_instances(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn labels(&self) -> &[i32] {
        &self.y
    }

    pub fn row(&self, idx: usize) -> &[f64] {
        self.x.row_slice(idx)
    }

    /// Copy of the table restricted to the subset's columns (ascending order).
    pub fn project(&self, subset: &FeatureSubset) -> Result<Array2<f64>> {
        subset.check_bounds(self.n_features())?;
        Ok(self.x.select_columns(&subset.indices()))
    }

    /// Number of instances per class label, ordered by label.
    pub fn class_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for &label in &self.y {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    pub fn log_summary(&self) {
        log::info!(
            "Dataset has {} features (not including the class attribute), with {} instances",
            self.n_features(),
            self.n_instances()
        );
        for (label, count) in self.class_counts() {
            log::debug!("class {}: {} instances", label, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_count_must_match_rows() {
        let x = Array2::from_shape_vec((3, 2), vec![0.0; 6]).unwrap();
        let err = Dataset::new(x, vec![1, 2]).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidInput(_)));
    }

    #[test]
    fn ragged_rows_are_invalid_input() {
        let err = Dataset::from_rows(vec![vec![0.0, 1.0], vec![0.5]], vec![1, 2]).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidInput(_)));
    }

    #[test]
    fn project_copies_only_selected_columns() {
        let d = Dataset::from_rows(
            vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]],
            vec![1, 2],
        )
        .unwrap();
        let p = d.project(&FeatureSubset::from([2, 0])).unwrap();
        assert_eq!(p.row_slice(0), &[0.1, 0.3]);
        assert_eq!(p.row_slice(1), &[0.4, 0.6]);
        assert!(d.project(&FeatureSubset::from([3])).is_err());
    }

    #[test]
    fn class_counts_grouped_by_label() {
        let d = Dataset::from_rows(vec![vec![0.0]; 5], vec![2, 1, 2, 2, 1]).unwrap();
        let counts = d.class_counts();
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), Some(&3));
    }
}
