//! Matrix types used between pipeline stages.
//!
//! - [`CsrMatrix`] - compressed sparse rows, produced by the TF-IDF vectorizer
//! - [`DenseMatrix`] - row-major `f64` matrix consumed by the classifier
//! - [`IndicatorMatrix`] - row-major binary label matrix

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Compressed sparse row matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Create an empty matrix with `n_cols` columns and no rows.
    pub fn new(n_cols: usize) -> Self {
        CsrMatrix {
            n_cols,
            indptr: vec![0],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append a row given as `(column, value)` pairs sorted by column.
    pub fn push_row(&mut self, entries: &[(usize, f64)]) -> Result<()> {
        for &(col, value) in entries {
            if col >= self.n_cols {
                return Err(ClassifierError::shape(format!(
                    "column {col} out of range for {} columns",
                    self.n_cols
                )));
            }
            self.indices.push(col);
            self.values.push(value);
        }
        self.indptr.push(self.indices.len());
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterate the stored entries of one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.indptr[row];
        let end = self.indptr[row + 1];
        self.indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Convert to a dense matrix.
    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.n_rows(), self.n_cols);
        for row in 0..self.n_rows() {
            for (col, value) in self.row(row) {
                dense.set(row, col, value);
            }
        }
        dense
    }
}

/// Row-major dense matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        DenseMatrix {
            n_rows,
            n_cols,
            data: vec![0.0; n_rows * n_cols],
        }
    }

    /// Build a matrix from rows; every row must have `n_cols` values.
    pub fn from_rows(rows: Vec<Vec<f64>>, n_cols: usize) -> Result<Self> {
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(ClassifierError::shape(format!(
                    "row {i} has {} values, expected {n_cols}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(DenseMatrix {
            n_rows,
            n_cols,
            data,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n_cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.n_cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_rows).map(move |r| self.row(r))
    }

    /// Concatenate `other` to the right of `self`.
    ///
    /// Fails unless both matrices have the same number of rows.
    pub fn hstack(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.n_rows != other.n_rows {
            return Err(ClassifierError::alignment(format!(
                "cannot concatenate blocks with {} and {} rows",
                self.n_rows, other.n_rows
            )));
        }
        let n_cols = self.n_cols + other.n_cols;
        let mut data = Vec::with_capacity(self.n_rows * n_cols);
        for row in 0..self.n_rows {
            data.extend_from_slice(self.row(row));
            data.extend_from_slice(other.row(row));
        }
        Ok(DenseMatrix {
            n_rows: self.n_rows,
            n_cols,
            data,
        })
    }
}

/// Row-major binary matrix; one row per sample, one column per label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<bool>,
}

impl IndicatorMatrix {
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        IndicatorMatrix {
            n_rows,
            n_cols,
            data: vec![false; n_rows * n_cols],
        }
    }

    /// Build from 0/1 rows; any non-zero value counts as active.
    pub fn from_rows(rows: &[Vec<u8>], n_cols: usize) -> Result<Self> {
        let mut matrix = Self::zeros(rows.len(), n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(ClassifierError::shape(format!(
                    "indicator row {i} has {} values, expected {n_cols}",
                    row.len()
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                matrix.set(i, j, value != 0);
            }
        }
        Ok(matrix)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.n_cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row * self.n_cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// Indicator column as +1/-1 targets for a binary linear model.
    pub fn signed_column(&self, col: usize) -> Vec<f64> {
        (0..self.n_rows)
            .map(|row| if self.get(row, col) { 1.0 } else { -1.0 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_to_dense() {
        let mut csr = CsrMatrix::new(3);
        csr.push_row(&[(0, 1.0), (2, 0.5)]).unwrap();
        csr.push_row(&[]).unwrap();
        csr.push_row(&[(1, 2.0)]).unwrap();

        assert_eq!(csr.n_rows(), 3);
        assert_eq!(csr.nnz(), 3);

        let dense = csr.to_dense();
        assert_eq!(dense.shape(), (3, 3));
        assert_eq!(dense.row(0), &[1.0, 0.0, 0.5]);
        assert_eq!(dense.row(1), &[0.0, 0.0, 0.0]);
        assert_eq!(dense.row(2), &[0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_csr_rejects_out_of_range_column() {
        let mut csr = CsrMatrix::new(2);
        assert!(csr.push_row(&[(2, 1.0)]).is_err());
    }

    #[test]
    fn test_dense_hstack() {
        let left = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 2).unwrap();
        let right = DenseMatrix::from_rows(vec![vec![9.0], vec![8.0]], 1).unwrap();

        let combined = left.hstack(&right).unwrap();
        assert_eq!(combined.shape(), (2, 3));
        assert_eq!(combined.row(0), &[1.0, 2.0, 9.0]);
        assert_eq!(combined.row(1), &[3.0, 4.0, 8.0]);
    }

    #[test]
    fn test_dense_hstack_row_mismatch() {
        let left = DenseMatrix::zeros(3, 2);
        let right = DenseMatrix::zeros(2, 1);

        let err = left.hstack(&right).unwrap_err();
        assert!(matches!(err, ClassifierError::Alignment(_)));
    }

    #[test]
    fn test_dense_from_ragged_rows() {
        assert!(DenseMatrix::from_rows(vec![vec![1.0], vec![1.0, 2.0]], 1).is_err());
    }

    #[test]
    fn test_indicator_signed_column() {
        let m = IndicatorMatrix::from_rows(&[vec![1, 0], vec![0, 1], vec![1, 1]], 2).unwrap();
        assert_eq!(m.signed_column(0), vec![1.0, -1.0, 1.0]);
        assert_eq!(m.row(1), &[false, true]);
    }
}
