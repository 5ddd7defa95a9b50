//! Sparse term-document count matrix.
//!
//! Rows are documents, columns are vocabulary positions, and entry (i, j) is
//! the (possibly fractional) count of term j in document i. Storage is CSR so
//! that one document's non-zero terms are contiguous.

use nb_common::{Error, Result};
use sprs::{CsMat, CsVecView, TriMat};

/// Immutable, validated term-document matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TermDocumentMatrix {
    inner: CsMat<f64>,
}

impl TermDocumentMatrix {
    /// Wrap an existing sparse matrix. CSC input is converted to CSR.
    ///
    /// Fails if any stored entry is negative or not finite.
    pub fn from_csr(matrix: CsMat<f64>) -> Result<Self> {
        let inner = if matrix.is_csr() {
            matrix
        } else {
            matrix.to_csr()
        };
        check_entries(inner.data())?;
        Ok(TermDocumentMatrix { inner })
    }

    /// Build from (row, column, count) triplets. Repeated positions are summed.
    pub fn from_triplets(shape: (usize, usize), triplets: &[(usize, usize, f64)]) -> Result<Self> {
        let (rows, cols) = shape;
        let mut tri = TriMat::new((rows, cols));
        for &(row, col, value) in triplets {
            if row >= rows || col >= cols {
                return Err(Error::InvalidInput(format!(
                    "entry ({}, {}) is outside a {}x{} matrix",
                    row, col, rows, cols
                )));
            }
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "entry ({}, {}) has invalid count {}",
                    row, col, value
                )));
            }
            tri.add_triplet(row, col, value);
        }
        let inner: CsMat<f64> = tri.to_csr();
        // Summed duplicates can overflow.
        check_entries(inner.data())?;
        Ok(TermDocumentMatrix { inner })
    }

    /// Build from dense rows of equal length. Zero entries are not stored.
    pub fn from_dense(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut triplets = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::DimensionMismatch {
                    what: "dense row length",
                    expected: cols,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if value != 0.0 {
                    triplets.push((i, j, value));
                }
            }
        }
        Self::from_triplets((rows.len(), cols), &triplets)
    }

    /// Number of documents.
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    /// Vocabulary size.
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// Sparse view of document `i`, or None when out of range.
    pub fn row(&self, i: usize) -> Option<CsVecView<'_, f64>> {
        self.inner.outer_view(i)
    }

    /// Column-wise sum of the selected rows.
    ///
    /// Indices must be in range; callers validate them against `rows()`.
    pub fn sum_rows(&self, indices: &[usize]) -> Vec<f64> {
        let mut totals = vec![0.0; self.cols()];
        for &i in indices {
            if let Some(row) = self.row(i) {
                for (term, &count) in row.iter() {
                    totals[term] += count;
                }
            }
        }
        totals
    }

    /// Borrow the underlying CSR matrix.
    pub fn as_csr(&self) -> &CsMat<f64> {
        &self.inner
    }
}

fn check_entries(data: &[f64]) -> Result<()> {
    if let Some(bad) = data.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(Error::InvalidInput(format!(
            "term counts must be finite and non-negative, found {}",
            bad
        )));
    }
    Ok(())
}
