//! ReduceByKey scan primitive (C3) — the cooperative inclusive/exclusive
//! scan over `(row_id, value)` pairs shared by [`crate::tile_reducer`] (C2,
//! inclusive) and [`crate::boundary_fixup`] (C4, exclusive).
//!
//! The combine operator is a pure function parameter, never owned state
//! (per DESIGN NOTES / REDESIGN FLAGS: no cyclic reference between the
//! primitive and its operator). The running prefix crossing tile
//! boundaries is likewise an explicit value threaded in and out, never a
//! hidden field on a scan object — the "stateful prefix callback" pattern
//! from the source becomes an ordinary argument/return pair here.

use crate::reduce::Reduce;

/// A `(row_id, value)` partial: "rows earlier than `row_id` are finalized;
/// `row_id` accumulates `value` so far."
pub type Partial<T> = (usize, T);

/// `ReduceByKey` combine: equal keys reduce their values (left-to-right,
/// `a` then `b`); differing keys keep the right-hand key and value,
/// discarding the left accumulation. Associative given an associative
/// `T::combine`.
#[inline]
pub fn combine<T: Reduce>(a: Partial<T>, b: Partial<T>) -> Partial<T> {
    if a.0 == b.0 {
        (b.0, a.1.combine(b.1))
    } else {
        b
    }
}

/// Inclusive left scan over `pairs`, seeded with `prefix`, carried across
/// tiles by a worker's running partial. After the call, `pairs[i]` holds
/// the running reduction for its row among all pairs at or before `i`
/// sharing that row (strict segmented behavior). Returns the new running
/// prefix — the scan's last output pair.
///
/// Used by C2 with `prefix = P_w`, the worker's running partial entering
/// the tile.
pub fn inclusive_scan_by_key<T: Reduce>(pairs: &mut [Partial<T>], prefix: Partial<T>) -> Partial<T> {
    let mut run = prefix;
    for p in pairs.iter_mut() {
        run = combine(run, *p);
        *p = run;
    }
    run
}

/// Exclusive left scan over `pairs`, seeded with `prefix`. Returns, for
/// each input pair, the running reduction *before* that pair was folded
/// in, plus the final running prefix (equivalent to one more step of
/// [`inclusive_scan_by_key`] but not written into the output).
///
/// Used by C4: at a run's head, the exclusive value is exactly the total
/// of the *previous*, now-closed, run (see [`crate::boundary_fixup`]).
pub fn exclusive_scan_by_key<T: Reduce>(
    pairs: &[Partial<T>],
    prefix: Partial<T>,
) -> (Vec<Partial<T>>, Partial<T>) {
    let mut out = Vec::with_capacity(pairs.len());
    let mut run = prefix;
    for &p in pairs {
        out.push(run);
        run = combine(run, p);
    }
    (out, run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_scan_accumulates_within_a_run() {
        let mut pairs: Vec<Partial<f64>> = vec![(0, 1.0), (0, 2.0), (0, 3.0)];
        let last = inclusive_scan_by_key(&mut pairs, (0, 0.0));
        assert_eq!(pairs, vec![(0, 1.0), (0, 3.0), (0, 6.0)]);
        assert_eq!(last, (0, 6.0));
    }

    #[test]
    fn inclusive_scan_resets_on_key_change() {
        let mut pairs: Vec<Partial<f64>> = vec![(0, 1.0), (1, 10.0), (1, 20.0), (2, 100.0)];
        let last = inclusive_scan_by_key(&mut pairs, (0, 0.0));
        assert_eq!(pairs, vec![(0, 1.0), (1, 10.0), (1, 30.0), (2, 100.0)]);
        assert_eq!(last, (2, 100.0));
    }

    #[test]
    fn inclusive_scan_carries_a_nonzero_prefix() {
        let mut pairs: Vec<Partial<f64>> = vec![(5, 1.0), (5, 2.0), (6, 100.0)];
        // Prefix carries row 5's partial in from a previous tile.
        let last = inclusive_scan_by_key(&mut pairs, (5, 10.0));
        assert_eq!(pairs, vec![(5, 11.0), (5, 13.0), (6, 100.0)]);
        assert_eq!(last, (6, 100.0));
    }

    #[test]
    fn exclusive_scan_value_at_a_head_is_the_closed_run_total() {
        let pairs: Vec<Partial<f64>> =
            vec![(0, 1.0), (0, 2.0), (0, 3.0), (1, 5.0), (1, 7.0)];
        let (exclusive, last) = exclusive_scan_by_key(&pairs, (0, 0.0));
        // Position 3 is the head of row 1's run; its exclusive value is
        // row 0's completed total.
        assert_eq!(exclusive[3], (0, 6.0));
        assert_eq!(last, (1, 12.0));
    }

    #[test]
    fn exclusive_scan_length_matches_input() {
        let pairs: Vec<Partial<f64>> = vec![(0, 1.0), (1, 2.0)];
        let (exclusive, _) = exclusive_scan_by_key(&pairs, (0, 0.0));
        assert_eq!(exclusive.len(), pairs.len());
    }
}
