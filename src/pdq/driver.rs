//! Introspective recursion driver.
//!
//! The driver walks the current range, routing short ranges to insertion
//! sort, exhausted-budget ranges to heapsort, and everything else through
//! a partition step. It recurses into the shorter side of each split and
//! iterates on the longer side, which caps the stack depth at O(lg n).

use std::cmp;

use crate::interface::sortable::Sortable;

use super::heap::heap_sort;
use super::insertion::{insertion_sort, partial_insertion_sort};
use super::partition::{partition, partition_equal};
use super::pattern::break_patterns;
use super::pivot::choose_pivot;

/// Ranges of at most this many elements are insertion-sorted outright.
const MAX_INSERTION: usize = 20;

/// Sorts `data` in place.
///
/// The sort is unstable (equal elements may be reordered) and allocates
/// nothing beyond two small fixed-size index buffers on the stack.
///
/// # Complexity
/// - Time: O(n lg n) worst case, O(n k) for n elements with k distinct
///   keys, O(n) on already sorted or reverse sorted input
/// - Space: O(lg n) recursion
///
/// # Example
/// ```
/// use pdqsort::sort;
///
/// let mut data = vec![3, 1, 4, 1, 5, 9, 2, 6];
/// sort(&mut data[..]);
/// assert_eq!(data, vec![1, 1, 2, 3, 4, 5, 6, 9]);
/// ```
pub fn sort<S: Sortable + ?Sized>(data: &mut S) {
    let n = data.len();
    if n == 0 {
        return;
    }

    // Recursion budget on the scale of lg n; once a range exhausts it,
    // heapsort finishes that range in guaranteed O(n lg n).
    let limit = usize::BITS - n.leading_zeros();
    recurse(data, 0, n, None, limit);
}

/// Sorts `[a, b)`, assuming every element left of `a` is less than or
/// equal to every element of the range.
///
/// `pred` is the index of one such element when one exists; comparing it
/// against the chosen pivot detects plateaus of equal keys. `limit` is the
/// remaining count of unbalanced partitions tolerated before falling back
/// to heapsort.
fn recurse<S: Sortable + ?Sized>(
    data: &mut S,
    mut a: usize,
    mut b: usize,
    mut pred: Option<usize>,
    mut limit: u32,
) {
    debug_assert!(pred.map_or(true, |p| p < a));

    // Observations of the previous partition on this range.
    let mut was_balanced = true;
    let mut was_partitioned = true;

    loop {
        let len = b - a;

        if len <= MAX_INSERTION {
            insertion_sort(data, a, b);
            return;
        }

        if limit == 0 {
            heap_sort(data, a, b);
            return;
        }

        // The last partition was lopsided; the input may be adversarial.
        // Scramble a few elements and spend one unit of budget.
        if !was_balanced {
            break_patterns(data, a, b);
            limit -= 1;
        }

        let (pivot, likely_sorted) = choose_pivot(data, a, b);

        // A balanced, clean-partitioning range that also samples as sorted
        // is probably sorted except for a few stragglers; try to repair it
        // without partitioning.
        if was_balanced && was_partitioned && likely_sorted {
            if partial_insertion_sort(data, a, b) {
                return;
            }
        }

        // A pivot that does not exceed its predecessor is equal to it, so
        // the range begins with a plateau of equal keys. Skip over it in
        // one pass instead of recursing.
        if let Some(p) = pred {
            if !data.less(p, pivot) {
                let mid = partition_equal(data, a, b, pivot);
                a = mid;
                continue;
            }
        }

        let (mid, was_p) = partition(data, a, b, pivot);
        was_balanced = cmp::min(mid - a, len - (mid - a)) >= len / 8;
        was_partitioned = was_p;

        // Recurse into the shorter side, iterate on the longer one. The
        // pivot at `mid` is final; when the loop continues to the right of
        // it, the pivot becomes the new predecessor.
        let left_len = mid - a;
        let right_len = len - left_len - 1;
        if left_len < right_len {
            recurse(data, a, mid, pred, limit);
            a = mid + 1;
            pred = Some(mid);
        } else {
            recurse(data, mid + 1, b, Some(mid), limit);
            b = mid;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::interface::sortable::is_sorted;

    const TRIGGER_MAX_INSERTION: [i64; 13] =
        [74, 59, 238, -784, 9845, 959, 905, 0, 0, 42, 7586, -5467984, 7586];

    const LESS_THAN_ONE_BLOCK: [i64; 23] = [
        74, 59, 238, -784, 9845, 959, 905, 0, 0, 42, 7586, -5467984, 7586, 19, 13, 27, 103, 42,
        23, 29, 31, 51, 10,
    ];

    fn seeded(n: usize, modulus: i64, seed: u64) -> Vec<i64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(-modulus..modulus)).collect()
    }

    fn check_against_reference(mut data: Vec<i64>) {
        let mut expected = data.clone();
        expected.sort_unstable();
        sort(&mut data[..]);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_sort_empty() {
        let mut data: Vec<i64> = vec![];
        sort(&mut data[..]);
        assert!(data.is_empty());
    }

    #[test]
    fn test_sort_single() {
        let mut data = vec![42i64];
        sort(&mut data[..]);
        assert_eq!(data, vec![42]);
    }

    #[test]
    fn test_sort_insertion_route() {
        // 13 elements, below the insertion cutoff.
        check_against_reference(TRIGGER_MAX_INSERTION.to_vec());
    }

    #[test]
    fn test_sort_less_than_one_block() {
        check_against_reference(LESS_THAN_ONE_BLOCK.to_vec());
    }

    #[test]
    fn test_sort_just_over_one_block() {
        check_against_reference(seeded(149, 100_000, 1));
    }

    #[test]
    fn test_sort_multiple_blocks() {
        check_against_reference(seeded(2000, 100_000, 2));
    }

    #[test]
    fn test_sort_already_sorted() {
        let mut data: Vec<i64> = (0..1000).collect();
        sort(&mut data[..]);
        assert_eq!(data, (0..1000).collect::<Vec<i64>>());
    }

    #[test]
    fn test_sort_reverse_sorted() {
        let mut data: Vec<i64> = (0..1000).rev().collect();
        sort(&mut data[..]);
        assert_eq!(data, (0..1000).collect::<Vec<i64>>());
    }

    #[test]
    fn test_sort_all_equal() {
        let mut data = vec![7i64; 500];
        sort(&mut data[..]);
        assert_eq!(data, vec![7i64; 500]);
    }

    #[test]
    fn test_sort_sawtooth() {
        let data: Vec<i64> = (0..1500).map(|i| i % 7).collect();
        check_against_reference(data);
    }

    #[test]
    fn test_sort_organ_pipe() {
        let data: Vec<i64> = (0..750).chain((0..750).rev()).collect();
        check_against_reference(data);
    }

    #[test]
    fn test_sort_mostly_sorted() {
        let mut data: Vec<i64> = (0..1000).collect();
        data.swap(10, 900);
        data.swap(123, 456);
        check_against_reference(data);
    }

    #[test]
    fn test_sort_idempotent() {
        let mut data = seeded(500, 1000, 3);
        sort(&mut data[..]);
        let once = data.clone();
        sort(&mut data[..]);
        assert_eq!(data, once);
    }

    #[test]
    fn test_sort_matches_reference_across_lengths() {
        let mut rng = StdRng::seed_from_u64(4);
        for len in (2..25).chain(120..130).chain(500..510) {
            for &modulus in &[5i64, 10, 100, 1000] {
                for _ in 0..10 {
                    let data: Vec<i64> = (0..len).map(|_| rng.gen_range(0..modulus)).collect();
                    check_against_reference(data);
                }
            }
        }
    }

    #[test]
    fn test_sort_large_few_uniques() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut data: Vec<i64> = (0..1_000_000).map(|_| rng.gen_range(0..100)).collect();
        assert!(!is_sorted(&data[..]));
        sort(&mut data[..]);
        assert!(is_sorted(&data[..]));
    }

    #[test]
    fn test_sort_minimal_adapter() {
        // An adapter that leans on every provided default.
        struct Desc<'a>(&'a mut [i64]);

        impl Sortable for Desc<'_> {
            fn len(&self) -> usize {
                self.0.len()
            }
            fn less(&self, i: usize, j: usize) -> bool {
                self.0[i] > self.0[j]
            }
            fn swap(&mut self, i: usize, j: usize) {
                self.0.swap(i, j)
            }
        }

        let mut data = seeded(800, 500, 6);
        let mut expected = data.clone();
        expected.sort_unstable_by(|x, y| y.cmp(x));
        sort(&mut Desc(&mut data));
        assert_eq!(data, expected);
    }
}
