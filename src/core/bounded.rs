//! Unbiased Bounded Integers
//!
//! Reduces a generator's native unsigned output to `[0, n)` without modulo
//! bias. Powers of two are masked directly; everything else goes through
//! rejection sampling against a threshold in the native signed range:
//!
//! ```text
//! max = (2^(W-1) - 1) - (2^(W-1) mod n)
//! draw v until v <= max, then v mod n
//! ```
//!
//! `W` is 64 for every family. PCG-32 uses `W = 32` on its native output
//! while `n <= 2^31` and falls back to its joined 64-bit output above that.

/// Draw a uniform integer in `[0, n)` from a `width`-bit source.
///
/// `draw` yields the generator's native output widened to `u64`; it is
/// called once for powers of two and at least once otherwise.
///
/// Callers keep `n <= 2^(width-1)`; every positive `i64` fits a 64-bit source.
///
/// # Panics
///
/// Panics if `n <= 0`.
#[inline]
pub fn bounded_int<F>(name: &str, width: u32, n: i64, mut draw: F) -> i64
where
    F: FnMut() -> u64,
{
    if n <= 0 {
        panic!("{}: argument to int is <= 0", name);
    }
    let n = n as u64;
    debug_assert!(n <= 1u64 << (width - 1), "{}: n too wide for a {}-bit source", name, width);

    if n & (n - 1) == 0 {
        return (draw() & (n - 1)) as i64;
    }

    let max = rejection_threshold(width, n);
    let mut v = draw();
    while v > max {
        v = draw();
    }
    (v % n) as i64
}

/// Rejection threshold for a `width`-bit source and non-power-of-two `n`.
#[inline]
pub fn rejection_threshold(width: u32, n: u64) -> u64 {
    let half = 1u64 << (width - 1);
    (half - 1) - (half % n)
}

// =============================================================================
// TESTS
// =============================================================================
