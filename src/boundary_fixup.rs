//! BoundaryFixup (C4) — single-pass reconciliation of rows that straddle
//! worker regions.
//!
//! Runs once, after every [`crate::tile_reducer`] worker has finished,
//! over the `2*W`-length `first[0], last[0], first[1], last[1], ...`
//! sequence. Because workers are assigned contiguous, increasing
//! merge-path ranges, this sequence is already non-decreasing by row id
//! (§3 invariant); fixup never needs to sort it.
//!
//! Implemented with the same [`crate::reduce_by_key::exclusive_scan_by_key`]
//! primitive C2 uses in its inclusive form, processed in `fixup_tile_items`
//! chunks so a completed run's total becomes available as soon as its
//! head is seen, without materializing the whole partials array through a
//! single monolithic scan — tile boundaries carry the running prefix
//! exactly as C2's do.

use crate::reduce::Reduce;
use crate::reduce_by_key::{exclusive_scan_by_key, Partial};

/// Reconcile `block_partials` (length `2*W`, `W >= 1`) against `result`.
///
/// For every row whose run of consecutive same-row partials ends strictly
/// before the final element, writes that run's total to `result[row]`.
/// The very last partial's running total is always written, unconditionally,
/// once the whole sequence has been folded.
///
/// `tile_items` must be positive; it only affects how the scan batches
/// internally, never the result.
pub fn fixup<T: Reduce>(block_partials: &[Partial<T>], result: &mut [T], tile_items: usize) {
    let Some(&(first_row, _)) = block_partials.first() else {
        return;
    };

    let tile_items = tile_items.max(1);
    let mut running: Partial<T> = (first_row, T::identity());
    let mut prev_row: Option<usize> = None;
    let mut closed_runs = 0usize;

    for tile in block_partials.chunks(tile_items) {
        let (exclusive, new_running) = exclusive_scan_by_key(tile, running);
        for (i, &(row, _)) in tile.iter().enumerate() {
            let is_head = matches!(prev_row, Some(p) if p != row);
            if is_head {
                let (prev_row_id, prev_total) = exclusive[i];
                result[prev_row_id] = prev_total;
                closed_runs += 1;
            }
            prev_row = Some(row);
        }
        running = new_running;
    }

    tracing::debug!(closed_runs, "boundary_fixup resolved straddling rows");
    result[running.0] = running.1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_straddling_row_is_summed() {
        // row 0 straddles workers 0 and 1; row 1 is entirely worker 1's.
        let partials: Vec<Partial<f64>> = vec![(0, 1.0), (0, 2.0), (0, 3.0), (1, 10.0)];
        let mut result = vec![0.0; 2];
        fixup(&partials, &mut result, 1024);
        assert_eq!(result, vec![6.0, 10.0]);
    }

    #[test]
    fn two_straddles_in_sequence() {
        let partials: Vec<Partial<f64>> =
            vec![(0, 1.0), (0, 2.0), (0, 3.0), (1, 5.0), (1, 7.0), (1, 11.0)];
        let mut result = vec![0.0; 2];
        fixup(&partials, &mut result, 1024);
        assert_eq!(result, vec![6.0, 23.0]);
    }

    #[test]
    fn small_tile_items_matches_monolithic_scan() {
        let partials: Vec<Partial<f64>> =
            vec![(0, 1.0), (0, 2.0), (0, 3.0), (1, 5.0), (1, 7.0), (1, 11.0)];
        let mut big = vec![0.0; 2];
        fixup(&partials, &mut big, 1024);
        let mut small = vec![0.0; 2];
        fixup(&partials, &mut small, 1);
        assert_eq!(big, small);
    }

    #[test]
    fn single_worker_scatters_last_partial_unconditionally() {
        // W == 1: first == last (no straddle possible with one worker).
        let partials: Vec<Partial<f64>> = vec![(2, 0.0), (2, 9.0)];
        let mut result = vec![-1.0; 3];
        fixup(&partials, &mut result, 1024);
        assert_eq!(result[2], 9.0);
        assert_eq!(result[0], -1.0);
        assert_eq!(result[1], -1.0);
    }

    #[test]
    fn empty_partials_is_a_no_op() {
        let partials: Vec<Partial<f64>> = vec![];
        let mut result = vec![7.0; 2];
        fixup(&partials, &mut result, 1024);
        assert_eq!(result, vec![7.0, 7.0]);
    }
}
