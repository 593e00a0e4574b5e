//! Column-wise min-max normalization.
//!
//! Distances in the nearest-neighbor classifier are only meaningful when
//! every feature lives on the same scale, so raw tables are mapped into
//! `[0, 1]` per column before a search.

use crate::math::Array2;

/// Per-column minimum and maximum learned from a table.
#[derive(Clone, Debug, PartialEq)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl MinMaxScaler {
    /// Map one value of column `col` into `[0, 1]`. Constant columns map to 0.
    #[inline]
    pub fn scale(&self, col: usize, value: f64) -> f64 {
        let range = self.max[col] - self.min[col];
        if range > 0.0 {
            (value - self.min[col]) / range
        } else {
            0.0
        }
    }

    pub fn n_features(&self) -> usize {
        self.min.len()
    }
}

/// Fit a `MinMaxScaler` from an `Array2<f64>` where rows are samples and
/// columns are features. An empty table yields an empty scaler.
pub fn fit_min_max(x: &Array2<f64>) -> MinMaxScaler {
    let ncols = x.ncols();
    let mut min = vec![f64::INFINITY; ncols];
    let mut max = vec![f64::NEG_INFINITY; ncols];

    for row in x.rows() {
        for (c, &v) in row.iter().enumerate() {
            min[c] = min[c].min(v);
            max[c] = max[c].max(v);
        }
    }
    if x.is_empty() {
        min.fill(0.0);
        max.fill(0.0);
    }

    MinMaxScaler { min, max }
}

/// Transform all rows using the provided `MinMaxScaler`.
///
/// Panics if the scaler was fitted on a table of a different width.
pub fn transform_all(x: &Array2<f64>, sc: &MinMaxScaler) -> Array2<f64> {
    assert_eq!(
        x.ncols(),
        sc.n_features(),
        "transform_all: scaler width does not match table"
    );
    let mut out = x.clone();
    let ncols = out.ncols();
    for (i, v) in out.as_mut_slice().iter_mut().enumerate() {
        *v = sc.scale(i % ncols, *v);
    }
    out
}

/// Fit a scaler and return the normalized table in one call.
pub fn normalize_min_max(x: &Array2<f64>) -> Array2<f64> {
    let sc = fit_min_max(x);
    log::debug!("Fitted min-max scaler over {} columns", sc.n_features());
    transform_all(x, &sc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_scaled_independently() {
        let x = Array2::from_rows(vec![
            vec![1.0, 10.0],
            vec![3.0, 20.0],
            vec![2.0, 30.0],
        ])
        .unwrap();
        let n = normalize_min_max(&x);
        assert_eq!(n.column(0), vec![0.0, 1.0, 0.5]);
        assert_eq!(n.column(1), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn constant_columns_become_zero() {
        let x = Array2::from_rows(vec![vec![4.0, 1.0], vec![4.0, 2.0]]).unwrap();
        let n = normalize_min_max(&x);
        assert_eq!(n.column(0), vec![0.0, 0.0]);
        assert_eq!(n.column(1), vec![0.0, 1.0]);
    }

    #[test]
    fn empty_tables_pass_through() {
        let x: Array2<f64> = Array2::from_shape_vec((0, 3), vec![]).unwrap();
        let n = normalize_min_max(&x);
        assert_eq!(n.shape(), (0, 3));
    }
}
