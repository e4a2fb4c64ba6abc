//! Orchestrator (C5) — sizes the worker grid, computes merge-path endpoints
//! per worker, dispatches [`crate::tile_reducer`] across a `rayon` scope,
//! then runs [`crate::boundary_fixup`] over the collected boundary
//! partials.
//!
//! This is the single public entry point the crate exposes for running a
//! reduction; everything upstream (`merge_path`, `tile_reducer`,
//! `reduce_by_key`, `boundary_fixup`) is a pure building block this module
//! wires together.

use std::ops::Mul;

use crate::config::EngineConfig;
use crate::coo::CooMatrix;
use crate::error::SpmvError;
use crate::merge_path;
use crate::reduce::Reduce;
use crate::reduce_by_key::Partial;
use crate::{boundary_fixup, tile_reducer};

/// Compute `y = A · x` for the COO matrix `matrix`, using the tiling and
/// worker-count tunables in `cfg`.
///
/// `x` must have exactly `matrix.col_dim()` entries. Returns a freshly
/// allocated `y` of length `matrix.row_dim()`, with `y[r] == identity` for
/// any row with no nonzeros (§3, §7).
///
/// Validates `cfg` and `x`'s length up front (§7: "surfaced to caller
/// before launch; core does not validate mid-execution") — no worker is
/// dispatched until both checks pass.
pub fn spmv<T: Reduce + Mul<Output = T>>(
    matrix: &CooMatrix<T>,
    x: &[T],
    cfg: &EngineConfig,
) -> Result<Vec<T>, SpmvError> {
    cfg.validate()?;
    if x.len() != matrix.col_dim() {
        return Err(SpmvError::VectorLengthMismatch {
            expected: matrix.col_dim(),
            got: x.len(),
        });
    }

    let _span = tracing::debug_span!(
        "spmv",
        row_dim = matrix.row_dim(),
        n = matrix.nnz(),
        col_dim = matrix.col_dim()
    )
    .entered();

    let mut result = vec![T::identity(); matrix.row_dim()];
    for _ in 0..cfg.iterations {
        run_once(matrix, x, cfg, &mut result);
    }
    Ok(result)
}

/// A single reduction pass, writing into `result` (already sized and
/// reusable across `cfg.iterations` repeats — §6: "iterations ... is
/// honored by re-running the reduction ... and returning the last
/// result").
fn run_once<T: Reduce + Mul<Output = T>>(
    matrix: &CooMatrix<T>,
    x: &[T],
    cfg: &EngineConfig,
    result: &mut [T],
) {
    let row_dim = matrix.row_dim();
    let n = matrix.nnz();
    let path_len = row_dim + n;

    if path_len == 0 {
        tracing::trace!("spmv: empty path, short-circuiting to all-identity");
        result.iter_mut().for_each(|v| *v = T::identity());
        return;
    }

    let w = worker_count(cfg, path_len);
    run_with_workers(matrix, x, cfg, w, result);
}

/// Same as [`run_once`] but with an explicit worker count, bypassing
/// `rayon::current_num_threads()`. Split out so partitioning-equivalence
/// behavior (spec.md §8 property 3) is testable independent of the host's
/// reported parallelism.
fn run_with_workers<T: Reduce + Mul<Output = T>>(
    matrix: &CooMatrix<T>,
    x: &[T],
    cfg: &EngineConfig,
    w: usize,
    result: &mut [T],
) {
    let row_dim = matrix.row_dim();
    let n = matrix.nnz();
    let path_len = row_dim + n;
    let w = w.clamp(1, path_len.max(1));
    tracing::trace!(workers = w, path_len, "spmv: dispatching workers");

    result.iter_mut().for_each(|v| *v = T::identity());

    if w == 1 {
        let tile_items = cfg.tile_items();
        let (first, last) =
            tile_reducer::run_worker(matrix, x, 0, path_len, 0, tile_items, result);
        // No boundary fixup: the single worker's still-open running
        // partial at end-of-region is the whole matrix's last row and
        // must be scattered directly (spec.md §9's symmetric handling
        // when W == 1).
        let _ = first;
        result[last.0] = last.1;
        return;
    }

    let diagonals = worker_diagonals(w, path_len);
    let seg_end = merge_path::seg_end_oracle(matrix.row_idx());
    let row_starts: Vec<usize> = diagonals
        .iter()
        .map(|&d| merge_path::search(d, row_dim, n, &seg_end).0)
        .collect();

    let mut partials: Vec<Partial<T>> = vec![(0, T::identity()); 2 * w];

    {
        let tile_items = cfg.tile_items();
        let result_ref = &mut *result;
        let partials_ref = &mut partials;
        rayon::scope(|scope| {
            let mut rest_result: &mut [T] = result_ref;
            let mut rest_partials: &mut [Partial<T>] = partials_ref;
            for worker in 0..w {
                let d_start = diagonals[worker];
                let d_end = diagonals[worker + 1];
                let row_offset = row_starts[worker];
                let row_end_offset = row_starts[worker + 1];
                let slice_len = row_end_offset - row_offset;

                let (my_result, remaining_result) = rest_result.split_at_mut(slice_len);
                rest_result = remaining_result;
                let (my_partials, remaining_partials) = rest_partials.split_at_mut(2);
                rest_partials = remaining_partials;

                scope.spawn(move |_| {
                    let (first, last) = tile_reducer::run_worker(
                        matrix,
                        x,
                        d_start,
                        d_end,
                        row_offset,
                        tile_items,
                        my_result,
                    );
                    my_partials[0] = first;
                    my_partials[1] = last;
                });
            }
        });
    }

    boundary_fixup::fixup(&partials, result, cfg.fixup_tile_items());
}

/// Number of independent workers `W`, clamped to `[1, path_len]` so every
/// worker is guaranteed a non-empty-or-negative diagonal range by
/// construction as long as `path_len > 0`.
///
/// `W` is sized from the backend's reported parallelism
/// (`rayon::current_num_threads`) times `over_subscription_factor`
/// (§4.5); `workers_per_group` does *not* feed into `W` — it shapes
/// `tile_items()`, the per-worker tile width each dispatched worker
/// consumes in its own sequential walk (§4.2's `T`), a distinct knob from
/// the grid size.
fn worker_count(cfg: &EngineConfig, path_len: usize) -> usize {
    let available = rayon::current_num_threads();
    let requested = available.saturating_mul(cfg.over_subscription_factor);
    requested.clamp(1, path_len.max(1)).min(path_len)
}

/// Per-worker diagonal endpoints `D_0, D_1, ..., D_w`, `D_i = floor(i *
/// path_len / w)` (§4.5), forming a disjoint cover `[D_0, D_w) = [0,
/// path_len)`.
fn worker_diagonals(w: usize, path_len: usize) -> Vec<usize> {
    (0..=w).map(|i| i * path_len / w).collect()
}
