//! Feature blocks keyed by section.
//!
//! Each block carries the [`SectionKey`] of every row. Two blocks computed
//! independently from the same sections are only concatenated when their keys
//! agree row by row, so a reordering or a dropped row in one derivation path
//! surfaces as an error instead of silently shifting features onto the wrong
//! section.

use crate::corpus::SectionKey;
use crate::error::{ClassifierError, Result};
use crate::ml::matrix::{CsrMatrix, DenseMatrix};

#[derive(Clone, Debug, PartialEq)]
pub struct KeyedFeatures {
    keys: Vec<SectionKey>,
    columns: Vec<String>,
    matrix: DenseMatrix,
}

impl KeyedFeatures {
    pub fn new(keys: Vec<SectionKey>, columns: Vec<String>, matrix: DenseMatrix) -> Result<Self> {
        if keys.len() != matrix.n_rows() {
            return Err(ClassifierError::shape(format!(
                "{} row keys for a matrix with {} rows",
                keys.len(),
                matrix.n_rows()
            )));
        }
        if columns.len() != matrix.n_cols() {
            return Err(ClassifierError::shape(format!(
                "{} column names for a matrix with {} columns",
                columns.len(),
                matrix.n_cols()
            )));
        }
        Ok(KeyedFeatures {
            keys,
            columns,
            matrix,
        })
    }

    /// Densify a sparse block.
    pub fn from_csr(keys: Vec<SectionKey>, columns: Vec<String>, csr: &CsrMatrix) -> Result<Self> {
        Self::new(keys, columns, csr.to_dense())
    }

    pub fn keys(&self) -> &[SectionKey] {
        &self.keys
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    pub fn n_rows(&self) -> usize {
        self.matrix.n_rows()
    }

    pub fn n_cols(&self) -> usize {
        self.matrix.n_cols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Column-wise concatenation, `self` on the left.
    ///
    /// Fails with [`ClassifierError::Alignment`] when the blocks differ in row
    /// count or in the key of any row.
    pub fn hstack(&self, other: &KeyedFeatures) -> Result<KeyedFeatures> {
        if self.n_rows() != other.n_rows() {
            return Err(ClassifierError::alignment(format!(
                "feature blocks have {} and {} rows",
                self.n_rows(),
                other.n_rows()
            )));
        }
        if let Some(row) = self.keys.iter().zip(&other.keys).position(|(a, b)| a != b) {
            return Err(ClassifierError::alignment(format!(
                "row {row} is section {} in one block and {} in the other",
                self.keys[row], other.keys[row]
            )));
        }

        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());

        Ok(KeyedFeatures {
            keys: self.keys.clone(),
            columns,
            matrix: self.matrix.hstack(&other.matrix)?,
        })
    }
}
