use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectionError};

/// A set of 0-based feature (column) indices.
///
/// Backed by a `BTreeSet`, so iteration is always ascending. That ordering is
/// the canonical form used for projection, candidate scans and display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSubset(BTreeSet<usize>);

impl FeatureSubset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every index in `[0, total)`.
    pub fn full(total: usize) -> Self {
        (0..total).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Ascending indices as a vector, suitable for column projection.
    pub fn indices(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Copy of this subset with `index` added.
    pub fn with(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.insert(index);
        next
    }

    /// Copy of this subset with `index` removed.
    pub fn without(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.remove(&index);
        next
    }

    pub fn max_index(&self) -> Option<usize> {
        self.0.iter().next_back().copied()
    }

    /// Fail unless every index is below `total`.
    pub fn check_bounds(&self, total: usize) -> Result<()> {
        match self.max_index() {
            Some(max) if max >= total => Err(SelectionError::invalid(format!(
                "feature index {} is out of range for {} features",
                max, total
            ))),
            _ => Ok(()),
        }
    }
}

impl FromIterator<usize> for FeatureSubset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        FeatureSubset(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for FeatureSubset {
    fn from(value: [usize; N]) -> Self {
        value.into_iter().collect()
    }
}
