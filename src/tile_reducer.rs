//! TileReducer (C2) — per-worker walk over an assigned merge-path region.
//!
//! Each worker owns a half-open diagonal range `[d_start, d_end)`. It walks
//! that range tile by tile (`tile_items` path steps at a time), folding
//! each tile through the [`crate::reduce_by_key`] inclusive scan seeded
//! with its own running prefix, and writes every tail-flagged pair
//! straight into its disjoint slice of the result vector.
//!
//! On the source accelerator this walk is `T` lanes in lockstep, each
//! publishing its tile-local end coordinates so its neighbor can read its
//! start. On a CPU worker there is exactly one lane: that publish/read
//! step has no observable effect on a sequential walk and collapses to
//! the ordinary tile loop below (see DESIGN.md).

use std::ops::Mul;

use crate::coo::CooMatrix;
use crate::merge_path;
use crate::reduce::Reduce;
use crate::reduce_by_key::{self, Partial};

/// Walk the diagonal range `[d_start, d_end)` and write every row this
/// worker finalizes into `result_slice`.
///
/// `result_slice` must be exactly `result[row_offset..row_offset +
/// result_slice.len()]` of the full output vector — the caller
/// ([`crate::orchestrator`]) hands out disjoint slices computed from the
/// same merge-path search used here, so two workers never alias the same
/// element.
///
/// Returns `(first, last)`: `first` is the partial for the first row this
/// worker touched (identity if that row's tail never appeared in-region),
/// `last` is the still-open running partial at the end of the region.
pub fn run_worker<T: Reduce + Mul<Output = T>>(
    matrix: &CooMatrix<T>,
    x: &[T],
    d_start: usize,
    d_end: usize,
    row_offset: usize,
    tile_items: usize,
    result_slice: &mut [T],
) -> (Partial<T>, Partial<T>) {
    let row_idx = matrix.row_idx();
    let col_idx = matrix.col_idx();
    let values = matrix.values();
    let row_dim = matrix.row_dim();
    let n = row_idx.len();
    let seg_end = merge_path::seg_end_oracle(row_idx);

    let (row_start, val_start) = merge_path::search(d_start, row_dim, n, &seg_end);
    let (row_end, val_end) = merge_path::search(d_end, row_dim, n, &seg_end);

    tracing::trace!(
        row_start,
        val_start,
        row_end,
        val_end,
        "tile_reducer worker region"
    );

    let mut row_cursor = row_start;
    let mut val_cursor = val_start;
    let mut running: Partial<T> = (row_start, T::identity());
    let mut first: Partial<T> = (row_start, T::identity());
    let mut first_latched = false;

    while row_cursor < row_end || val_cursor < val_end {
        let mut tile_pairs: Vec<Partial<T>> = Vec::with_capacity(tile_items);
        let mut tile_tail: Vec<bool> = Vec::with_capacity(tile_items);

        for _ in 0..tile_items {
            if row_cursor < row_end && seg_end(row_cursor) <= val_cursor {
                tile_pairs.push((row_cursor, T::identity()));
                tile_tail.push(true);
                row_cursor += 1;
            } else if val_cursor < val_end {
                let contribution = values[val_cursor] * x[col_idx[val_cursor]];
                tile_pairs.push((row_cursor, contribution));
                tile_tail.push(false);
                val_cursor += 1;
            } else {
                break;
            }
        }

        if tile_pairs.is_empty() {
            break;
        }

        running = reduce_by_key::inclusive_scan_by_key(&mut tile_pairs, running);

        for (i, &is_tail) in tile_tail.iter().enumerate() {
            if !is_tail {
                continue;
            }
            let (row, value) = tile_pairs[i];
            result_slice[row - row_offset] = value;
            if row == row_start && !first_latched {
                first = (row, value);
                first_latched = true;
            }
        }
    }

    (first, running)
}
