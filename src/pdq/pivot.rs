//! Pivot selection by median-of-three.
//!
//! Three candidates are sampled at the quartile positions of the range and
//! sorted with a 3-compare network; for larger ranges each candidate is
//! first replaced by the median of itself and its two neighbors (a
//! median-of-medians over nine samples). Counting the swaps the networks
//! perform doubles as a cheap sortedness probe: zero swaps means the range
//! samples as sorted, while many swaps mean it samples as reverse sorted,
//! in which case reversing the range up front turns the expensive case
//! into the cheap one.

use std::mem;

use crate::interface::sortable::Sortable;

/// Ranges at least this long get the nine-sample median of medians.
const SHORTEST_MEDIAN_OF_MEDIANS: usize = 50;

/// Swap-count threshold above which the range is taken as reverse sorted.
const MAX_SWAPS: usize = 12;

/// Chooses a pivot index for `[x, y)` and reports whether the range
/// sampled as likely sorted.
///
/// When the sample networks swap `MAX_SWAPS` times or more, the whole
/// range is reversed in place and the mirrored median index is returned
/// with `likely_sorted = true`.
pub(crate) fn choose_pivot<S: Sortable + ?Sized>(
    data: &mut S,
    x: usize,
    y: usize,
) -> (usize, bool) {
    let len = y - x;

    let mut a = x + len / 4 * 1;
    let mut b = x + len / 4 * 2;
    let mut c = x + len / 4 * 3;

    let mut swaps = 0;

    if len >= 8 {
        let data = &*data;

        // Orders two candidate indices by the elements they point at.
        let mut sort2 = |a: &mut usize, b: &mut usize| {
            if data.less(*b, *a) {
                mem::swap(a, b);
                swaps += 1;
            }
        };

        // After this network `b` holds the index of the median element.
        let mut sort3 = |a: &mut usize, b: &mut usize, c: &mut usize| {
            sort2(a, b);
            sort2(b, c);
            sort2(a, b);
        };

        if len >= SHORTEST_MEDIAN_OF_MEDIANS {
            // Replace a candidate with the median of it and its neighbors.
            let mut sort_adjacent = |a: &mut usize| {
                let mut below = *a - 1;
                let mut above = *a + 1;
                sort3(&mut below, a, &mut above);
            };

            sort_adjacent(&mut a);
            sort_adjacent(&mut b);
            sort_adjacent(&mut c);
        }

        sort3(&mut a, &mut b, &mut c);
    }

    if swaps < MAX_SWAPS {
        (b, swaps == 0)
    } else {
        reverse_range(data, x, y);
        (x + (len - 1 - (b - x)), true)
    }
}

/// Reverses the elements of `[a, b)` in place.
pub(crate) fn reverse_range<S: Sortable + ?Sized>(data: &mut S, a: usize, b: usize) {
    let mut i = a;
    let mut j = b - 1;
    while i < j {
        data.swap(i, j);
        i += 1;
        j -= 1;
    }
}
