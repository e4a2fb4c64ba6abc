//! The COO triple stream (§3: Data Model — entities).
//!
//! `CooMatrix` borrows its three parallel arrays rather than owning them:
//! the engine never needs to copy the caller's sparse matrix, only read it.

use crate::error::SpmvError;

/// A read-only view over a sparse matrix in coordinate (COO) form.
///
/// Invariant (enforced by [`CooMatrix::try_new`]): `row_idx` is
/// non-decreasing, `col_idx[k] < col_dim` for all `k`, and `row_idx[k] <
/// row_dim` for all `k`. Rows may be empty.
#[derive(Debug, Clone, Copy)]
pub struct CooMatrix<'a, T> {
    row_idx: &'a [usize],
    col_idx: &'a [usize],
    values: &'a [T],
    row_dim: usize,
    col_dim: usize,
}

impl<'a, T> CooMatrix<'a, T> {
    /// Validate and wrap the three COO arrays.
    ///
    /// Checks every invariant from §3 up front — row monotonicity, row and
    /// column bounds — so that a malformed matrix is rejected before any
    /// worker is dispatched, never mid-reduction (§7).
    pub fn try_new(
        row_idx: &'a [usize],
        col_idx: &'a [usize],
        values: &'a [T],
        row_dim: usize,
        col_dim: usize,
    ) -> Result<Self, SpmvError> {
        if row_idx.len() != col_idx.len() || row_idx.len() != values.len() {
            return Err(SpmvError::LengthMismatch {
                row_idx: row_idx.len(),
                col_idx: col_idx.len(),
                values: values.len(),
            });
        }
        for (k, &r) in row_idx.iter().enumerate() {
            if r >= row_dim {
                return Err(SpmvError::RowOutOfRange {
                    at: k,
                    row: r,
                    row_dim,
                });
            }
            if k > 0 && r < row_idx[k - 1] {
                return Err(SpmvError::RowNotMonotonic {
                    at: k,
                    prev: k - 1,
                    got: r,
                    prev_val: row_idx[k - 1],
                });
            }
        }
        for (k, &c) in col_idx.iter().enumerate() {
            if c >= col_dim {
                return Err(SpmvError::ColOutOfRange {
                    at: k,
                    col: c,
                    col_dim,
                });
            }
        }
        Ok(Self {
            row_idx,
            col_idx,
            values,
            row_dim,
            col_dim,
        })
    }

    /// Number of nonzeros, `N`.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.row_idx.len()
    }

    /// Declared number of rows.
    #[inline]
    pub fn row_dim(&self) -> usize {
        self.row_dim
    }

    /// Declared number of columns.
    #[inline]
    pub fn col_dim(&self) -> usize {
        self.col_dim
    }

    /// The non-decreasing row index array.
    #[inline]
    pub fn row_idx(&self) -> &'a [usize] {
        self.row_idx
    }

    /// The column index array (one entry per nonzero).
    #[inline]
    pub fn col_idx(&self) -> &'a [usize] {
        self.col_idx
    }

    /// The nonzero values, parallel to `row_idx` / `col_idx`.
    #[inline]
    pub fn values(&self) -> &'a [T] {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_matrix() {
        let m = CooMatrix::try_new(&[0usize, 0, 1, 2], &[0usize, 1, 2, 0], &[2.0, 3.0, 4.0, 5.0], 3, 3);
        assert!(m.is_ok());
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = CooMatrix::try_new(&[0usize], &[0usize, 1], &[1.0, 2.0], 2, 2).unwrap_err();
        assert!(matches!(err, SpmvError::LengthMismatch { .. }));
    }

    #[test]
    fn rejects_non_monotonic_rows() {
        let err =
            CooMatrix::try_new(&[1usize, 0], &[0usize, 0], &[1.0, 2.0], 2, 2).unwrap_err();
        assert!(matches!(err, SpmvError::RowNotMonotonic { .. }));
    }

    #[test]
    fn rejects_row_out_of_range() {
        let err = CooMatrix::try_new(&[2usize], &[0usize], &[1.0], 2, 2).unwrap_err();
        assert!(matches!(err, SpmvError::RowOutOfRange { .. }));
    }

    #[test]
    fn rejects_col_out_of_range() {
        let err = CooMatrix::try_new(&[0usize], &[2usize], &[1.0], 2, 2).unwrap_err();
        assert!(matches!(err, SpmvError::ColOutOfRange { .. }));
    }

    #[test]
    fn accepts_empty_matrix() {
        let m = CooMatrix::<f64>::try_new(&[], &[], &[], 3, 3).unwrap();
        assert_eq!(m.nnz(), 0);
    }
}
