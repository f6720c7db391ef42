//! Pattern breaker.
//!
//! A partition that comes out badly lopsided suggests the input was
//! constructed against the pivot strategy. Swapping three elements around
//! the middle of the range with randomly chosen partners destroys such
//! patterns; the randomness only needs to be cheap and uniform, not
//! strong.

use rand::Rng;

use crate::interface::sortable::Sortable;

/// Randomly swaps three elements near the middle of `[a, b)` with
/// elements drawn from the whole range. No-op for ranges shorter than 8.
pub(crate) fn break_patterns<S: Sortable + ?Sized>(data: &mut S, a: usize, b: usize) {
    let len = b - a;
    if len >= 8 {
        let mut rng = rand::thread_rng();

        // Masking by the next power of two keeps the draw cheap; the
        // fold-back below corrects draws that land past the range.
        let modulus = len.next_power_of_two();
        let pos = a + len / 4 * 2;

        for i in 0..3 {
            let draw: usize = rng.gen();

            let mut other = draw & (modulus - 1);
            if other >= len {
                other -= len;
            }
            other += a;

            data.swap(pos - 1 + i, other);
        }
    }
}
