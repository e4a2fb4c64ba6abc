//! MergePathSearch (C1) — pure split-point search over the conceptual merge
//! path of `seg_end` against the value-index identity stream.
//!
//! The merge path is the staircase through the `(row_dim + 1) x (N + 1)`
//! grid formed by merging `seg_end[]` (segment end-offsets, non-decreasing)
//! with `val_idx[] = 0, 1, 2, ...` in sorted order, ties going to the
//! segment side. A diagonal at distance `d` is the anti-diagonal `a + b =
//! d`; [`search`] returns the unique split `(a_off, b_off)` on that
//! diagonal.
//!
//! This is the textbook merge-path binary search (as used by
//! segmented-reduce / SpMV kernels built on a merge-path decomposition):
//! no allocation, `O(log min(row_dim, n))`.

/// Find the split point `(row_off, val_off)` on diagonal `diag`.
///
/// `seg_end(r)` must return the segment end-offset for row `r` — the index
/// of the first value belonging to a row greater than `r` — for any `r` in
/// `[0, row_dim)`. It is queried only for `r` strictly less than
/// `row_dim`, so implementations need not handle `r == row_dim`.
///
/// Ties go to the segment side: when `seg_end(r) == val_off`, the search
/// resolves in favor of closing row `r` rather than consuming the value at
/// `val_off`. This is what lets an empty row emit a tail flag without
/// consuming a value, and must be preserved verbatim (see DESIGN.md).
///
/// # Panics
/// Never panics for `diag <= row_dim + n`; behavior for larger `diag` is
/// unspecified (callers are expected to only search within `[0, row_dim +
/// n]`).
#[inline]
pub fn search(diag: usize, row_dim: usize, n: usize, seg_end: impl Fn(usize) -> usize) -> (usize, usize) {
    let mut lo = diag.saturating_sub(n);
    let mut hi = diag.min(row_dim);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        // mid < hi <= diag, so diag - mid >= 1 and this subtraction never
        // underflows.
        let j = diag - mid - 1;
        if seg_end(mid) <= j {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    (lo, diag - lo)
}

/// Build a `seg_end` oracle over a non-decreasing `row_idx` slice: the
/// upper-bound rank of row `r`, i.e. the count of entries with
/// `row_idx[k] <= r`.
///
/// This is the concrete instantiation [`crate::tile_reducer`] uses —
/// `row_idx` is never materialized as a separate `seg_end[]` array (per
/// the data model's "derived view, not materialized" note); each probe is
/// an `O(log n)` binary search over the COO row array itself.
#[inline]
pub fn seg_end_oracle(row_idx: &[usize]) -> impl Fn(usize) -> usize + '_ {
    move |r: usize| row_idx.partition_point(|&x| x <= r)
}
