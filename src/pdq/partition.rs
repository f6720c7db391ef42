//! Partitioning: branch-free block scheme and the equal-key variant.
//!
//! The block partitioner is a Hoare-style two-sided scan that buffers the
//! indices of misplaced elements in two fixed-size arrays and exchanges
//! them in batches through the capability's cyclic swap, keeping the
//! comparison loops free of data-dependent branches.

use std::cmp;

use crate::interface::sortable::Sortable;

/// Number of misplaced-element indices buffered per side. Two buffers of
/// this size fit comfortably in L1 while leaving the scan loops enough
/// work to run branch-free.
const BLOCK: usize = 128;

/// Partitions `[a, b)` around the element at `pivot`.
///
/// Returns `(mid, was_partitioned)`: the pivot's final index, and whether
/// the range was already partitioned with respect to it. Afterward every
/// element of `[a, mid)` is less than the pivot and every element of
/// `(mid, b)` is greater or equal.
pub(crate) fn partition<S: Sortable + ?Sized>(
    data: &mut S,
    a: usize,
    b: usize,
    pivot: usize,
) -> (usize, bool) {
    // Park the pivot at the front so the scans cover `[a+1, b)`.
    data.swap(a, pivot);
    let pivot = a;

    let mut l = a + 1;
    let mut r = b;

    // Skip elements that are already on the correct side.
    while l < r && data.less(l, pivot) {
        l += 1;
    }
    while l < r && !data.less(r - 1, pivot) {
        r -= 1;
    }

    // If the cursors met, nothing was out of place.
    let was_partitioned = l >= r;

    let mid = l - 1 + partition_in_blocks(data, l, r, pivot);

    // Park the pivot between the two halves.
    data.swap(a, mid);
    (mid, was_partitioned)
}

/// Block phase of [`partition`] over `[a, b)` with the pivot element
/// sitting at `pivot`, outside the scanned range.
///
/// Returns the number of elements of the range that are less than the
/// pivot. The scan records up to `BLOCK` misplaced indices per side with a
/// conditional increment (no branch on the comparison result), exchanges
/// the paired batches with one cyclic swap, and on the terminal iteration
/// shrinks the block sizes so the two scans meet exactly.
fn partition_in_blocks<S: Sortable + ?Sized>(
    data: &mut S,
    a: usize,
    b: usize,
    pivot: usize,
) -> usize {
    let mut l = a;
    let mut block_l = BLOCK;
    let mut start_l = 0;
    let mut end_l = 0;
    let mut offsets_l = [0usize; BLOCK];

    let mut r = b;
    let mut block_r = BLOCK;
    let mut start_r = 0;
    let mut end_r = 0;
    let mut offsets_r = [0usize; BLOCK];

    loop {
        let is_done = r - l <= 2 * BLOCK;

        if is_done {
            // Split what remains between the two sides, accounting for a
            // buffer that still holds unpaired offsets from a full block.
            let mut rem = r - l;
            if start_l < end_l || start_r < end_r {
                rem -= BLOCK;
            }

            if start_l < end_l {
                block_r = rem;
            } else if start_r < end_r {
                block_l = rem;
            } else {
                block_l = rem / 2;
                block_r = rem - block_l;
            }

            debug_assert!(block_l <= BLOCK && block_r <= BLOCK);
            debug_assert!(r - l == block_l + block_r);
        }

        if start_l == end_l {
            start_l = 0;
            end_l = 0;
            for i in 0..block_l {
                offsets_l[end_l] = l + i;
                if !data.less(l + i, pivot) {
                    end_l += 1;
                }
            }
        }

        if start_r == end_r {
            start_r = 0;
            end_r = 0;
            for i in 0..block_r {
                offsets_r[end_r] = r - i - 1;
                if data.less(r - i - 1, pivot) {
                    end_r += 1;
                }
            }
        }

        let count = cmp::min(end_l - start_l, end_r - start_r);
        if count > 0 {
            data.cyclic_swaps(
                &offsets_l[start_l..start_l + count],
                &offsets_r[start_r..start_r + count],
            );
            start_l += count;
            start_r += count;
        }

        if start_l == end_l {
            l += block_l;
        }
        if start_r == end_r {
            r -= block_r;
        }

        if is_done {
            break;
        }
    }

    if start_l < end_l {
        // Leftover indices on the left point at elements that belong on
        // the right; move them just below `r`.
        debug_assert!(r - l == block_l);
        while start_l < end_l {
            end_l -= 1;
            data.swap(offsets_l[end_l], r - 1);
            r -= 1;
        }
        r - a
    } else if start_r < end_r {
        debug_assert!(r - l == block_r);
        while start_r < end_r {
            end_r -= 1;
            data.swap(l, offsets_r[end_r]);
            l += 1;
        }
        l - a
    } else {
        l - a
    }
}

/// Partitions `[a, b)` into elements equal to the pivot followed by
/// elements strictly greater, assuming no element of the range is less.
///
/// Returns the start of the strictly-greater tail. The driver calls this
/// when the chosen pivot compares equal to the range's predecessor, which
/// means the range opens with a plateau of keys equal to the pivot.
pub(crate) fn partition_equal<S: Sortable + ?Sized>(
    data: &mut S,
    a: usize,
    b: usize,
    pivot: usize,
) -> usize {
    data.swap(a, pivot);
    let pivot = a;

    let mut l = a + 1;
    let mut r = b;
    loop {
        while l < r && !data.less(pivot, l) {
            l += 1;
        }
        while l < r && data.less(pivot, r - 1) {
            r -= 1;
        }
        if l >= r {
            break;
        }

        r -= 1;
        data.swap(l, r);
        l += 1;
    }

    l
}
