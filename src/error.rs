//! Validation & configuration errors surfaced before any worker is launched.
//!
//! The core has a small, static failure surface (see crate root docs): bad
//! shapes are rejected up front, never mid-reduction. There is no
//! `ResourceExhausted` / `DeviceFailure` pair here — on a CPU thread pool
//! allocation failure already aborts via the global allocator, and there is
//! no separate device to fail asynchronously, so those kinds have no
//! Rust-native counterpart (see DESIGN.md).

/// Failures surfaced by [`crate::coo::CooMatrix::try_new`] and
/// [`crate::orchestrator::spmv`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpmvError {
    /// `row_idx`, `col_idx`, and `values` must have identical length.
    #[error(
        "COO arrays have mismatched lengths: row_idx={row_idx}, col_idx={col_idx}, values={values}"
    )]
    LengthMismatch {
        row_idx: usize,
        col_idx: usize,
        values: usize,
    },

    /// `row_idx` is required to be non-decreasing.
    #[error("row_idx is not non-decreasing at index {at} (row_idx[{at}]={got} < row_idx[{prev}]={prev_val})")]
    RowNotMonotonic {
        at: usize,
        prev: usize,
        got: usize,
        prev_val: usize,
    },

    /// A row index exceeds the declared `row_dim`.
    #[error("row_idx[{at}]={row} is out of range for row_dim={row_dim}")]
    RowOutOfRange {
        at: usize,
        row: usize,
        row_dim: usize,
    },

    /// A column index exceeds the declared `col_dim`.
    #[error("col_idx[{at}]={col} is out of range for col_dim={col_dim}")]
    ColOutOfRange {
        at: usize,
        col: usize,
        col_dim: usize,
    },

    /// The dense vector `x` must have exactly `col_dim` entries.
    #[error("x has length {got}, expected col_dim={expected}")]
    VectorLengthMismatch { expected: usize, got: usize },

    /// A tunable in [`crate::config::EngineConfig`] was zero where it must be positive.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
