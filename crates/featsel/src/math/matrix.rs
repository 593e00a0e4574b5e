use std::ops::Index;

use thiserror::Error;

/// Row-major dense matrix. Rows are instances, columns are features.
#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(ShapeError::RaggedRow {
                    row: idx,
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// An empty matrix with a fixed row width, ready for `push_row`.
    pub fn with_row_capacity(cols: usize, rows: usize) -> Self {
        Self {
            data: Vec::with_capacity(rows * cols),
            rows: 0,
            cols,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row index out of bounds");
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows in order. Zero-width matrices still yield one empty
    /// slice per row.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |row| self.row_slice(row))
    }

    pub fn column(&self, col: usize) -> Vec<T>
    where
        T: Clone,
    {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)].clone()).collect()
    }

    /// Copy only the listed columns, in the order given.
    pub fn select_columns(&self, columns: &[usize]) -> Array2<T>
    where
        T: Clone,
    {
        assert!(
            columns.iter().all(|&c| c < self.cols),
            "column index out of bounds"
        );
        let mut data = Vec::with_capacity(self.rows * columns.len());
        for row in self.rows() {
            data.extend(columns.iter().map(|&c| row[c].clone()));
        }
        Array2 {
            data,
            rows: self.rows,
            cols: columns.len(),
        }
    }

    pub fn push_row(&mut self, row: &[T]) -> Result<(), ShapeError>
    where
        T: Clone,
    {
        if row.len() != self.cols {
            return Err(ShapeError::RaggedRow {
                row: self.rows,
                expected: self.cols,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.rows = 0;
    }
}

impl<T> Default for Array2<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    BufferLength { rows: usize, cols: usize, len: usize },
    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_shape_vec_rejects_wrong_length() {
        let err = Array2::from_shape_vec((2, 3), vec![1.0; 5]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::BufferLength {
                rows: 2,
                cols: 3,
                len: 5
            }
        );
    }

    #[test]
    fn from_rows_reports_ragged_row() {
        let err = Array2::from_rows(vec![vec![1, 2], vec![3, 4], vec![5]]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::RaggedRow {
                row: 2,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn select_columns_keeps_requested_order() {
        let x = Array2::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let picked = x.select_columns(&[2, 0]);
        assert_eq!(picked.shape(), (2, 2));
        assert_eq!(picked.row_slice(0), &[3, 1]);
        assert_eq!(picked.row_slice(1), &[6, 4]);
    }

    #[test]
    fn zero_width_selection_still_has_rows() {
        let x = Array2::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let none = x.select_columns(&[]);
        assert_eq!(none.shape(), (2, 0));
        assert_eq!(none.rows().count(), 2);
        assert!(none.rows().all(|r| r.is_empty()));
    }

    #[test]
    fn push_row_checks_width() {
        let mut x = Array2::with_row_capacity(2, 4);
        x.push_row(&[1.0, 2.0]).unwrap();
        assert!(x.push_row(&[1.0]).is_err());
        assert_eq!(x.shape(), (1, 2));
        x.clear();
        assert!(x.is_empty());
        assert_eq!(x.ncols(), 2);
    }
}
