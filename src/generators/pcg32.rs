//! PCG-32 (XSH-RR)
//!
//! 64-bit LCG core, 32-bit output. The output permutation runs on the
//! pre-advance state: xorshift the high bits down, then rotate right by
//! the top five bits.
//!
//! ## State Image (16 bytes)
//!
//! ```text
//! [ state: u64 LE ][ inc: u64 LE ]
//! ```

use serde::{Deserialize, Serialize};

use super::Generator;
use crate::core::bounded::bounded_int;
use crate::core::seed::{resolve_seed, ClockSeed, SeedSource};
use crate::core::state::{check_len, decode_words, encode_words, StateError};

/// LCG multiplier.
const MULTIPLIER: u64 = 6364136223846793005;

/// Largest bound served from a single 32-bit draw.
const NATIVE_BOUND: i64 = 1 << 31;

/// PCG-32 generator.
///
/// # Example
///
/// ```
/// use prng_suite::Pcg32;
///
/// let mut rng = Pcg32::new(42);
/// assert_eq!(rng.next(), 1085446021); // Always the same!
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Create a generator from `seed` (zero means "use the clock").
    pub fn new(seed: u64) -> Self {
        let mut rng = Self::from_state(0, 1);
        rng.seed(seed);
        rng
    }

    /// Create a generator seeded from the wall clock.
    pub fn from_clock() -> Self {
        Self::new(ClockSeed.next_seed())
    }

    /// Rebuild from raw `(state, inc)` words without seeding.
    pub const fn from_state(state: u64, inc: u64) -> Self {
        Self { state, inc }
    }

    /// Current `(state, inc)` words.
    pub fn state(&self) -> (u64, u64) {
        (self.state, self.inc)
    }

    /// Advance the LCG and return the permuted 32-bit output.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    pub fn next(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(MULTIPLIER).wrapping_add(self.inc);

        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Generator for Pcg32 {
    const NAME: &'static str = "pcg32";
    const STATE_LEN: usize = 16;

    fn seed(&mut self, seed: u64) {
        let seed = resolve_seed(seed);
        self.state = 0;
        self.inc = (seed << 1) | 1;
        self.next();
        self.state = self.state.wrapping_add(seed);
        self.next();
    }

    /// Two draws: the first fills the low word, the second the high word.
    #[inline]
    fn uint64(&mut self) -> u64 {
        let low = u64::from(self.next());
        let high = u64::from(self.next());
        (high << 32) | low
    }

    #[inline]
    fn uint32(&mut self) -> u32 {
        self.next()
    }

    #[inline]
    fn float64(&mut self) -> f64 {
        f64::from(self.next()) / (1u64 << 32) as f64
    }

    #[inline]
    fn float32(&mut self) -> f32 {
        (self.next() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform integer in `[0, n)`.
    ///
    /// Bounds up to 2^31 reduce single 32-bit draws against the 31-bit
    /// threshold; wider bounds reduce the two-draw [`Generator::uint64`].
    ///
    /// # Panics
    ///
    /// Panics if `n <= 0`.
    fn int(&mut self, n: i64) -> i64 {
        if n > NATIVE_BOUND {
            return bounded_int(Self::NAME, 64, n, || self.uint64());
        }
        bounded_int(Self::NAME, 32, n, || u64::from(self.next()))
    }

    fn marshal(&self) -> Vec<u8> {
        encode_words(&[self.state, self.inc])
    }

    fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError> {
        check_len(Self::NAME, Self::STATE_LEN, data)?;
        let [state, inc] = decode_words::<2>(data);
        self.state = state;
        self.inc = inc;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        // These values must never change!
        let mut rng = Pcg32::new(42);
        assert_eq!(rng.next(), 1085446021);
        assert_eq!(rng.next(), 176895750);
        assert_eq!(rng.next(), 789123591);
    }

    #[test]
    fn test_seeded_state() {
        let rng = Pcg32::new(42);
        assert_eq!(rng.state(), (15035305259031992232, 85));
    }

    #[test]
    fn test_known_bounded_values() {
        let mut rng = Pcg32::new(42);
        let draws: Vec<i64> = (0..8).map(|_| rng.int(10)).collect();
        assert_eq!(draws, vec![1, 0, 1, 5, 5, 5, 6, 9]);
    }

    #[test]
    fn test_uint64_joins_two_draws() {
        let mut rng = Pcg32::new(42);
        assert_eq!(rng.uint64(), (176895750u64 << 32) | 1085446021);
        assert_eq!(rng.next(), 789123591);
    }

    #[test]
    fn test_float64_divides_by_2_32() {
        let mut rng = Pcg32::new(42);
        assert_eq!(rng.float64(), 1085446021.0 / 4294967296.0);
    }

    #[test]
    fn test_float_ranges() {
        let mut rng = Pcg32::new(1234);
        for _ in 0..10_000 {
            let f = rng.float64();
            assert!((0.0..1.0).contains(&f));
            let g = rng.float32();
            assert!((0.0..1.0).contains(&g));
        }
    }

    #[test]
    fn test_signed_outputs_non_negative() {
        let mut rng = Pcg32::new(5);
        for _ in 0..1000 {
            assert!(rng.int32() >= 0);
            assert!(rng.int64() >= 0);
        }
    }

    #[test]
    fn test_marshal_layout() {
        let rng = Pcg32::from_state(0x0102_0304_0506_0708, 0x11);
        let buf = rng.marshal();
        assert_eq!(buf.len(), Pcg32::STATE_LEN);
        assert_eq!(&buf[..8], &0x0102_0304_0506_0708u64.to_le_bytes());
        assert_eq!(&buf[8..], &0x11u64.to_le_bytes());
    }

    #[test]
    fn test_round_trip_continues_sequence() {
        let mut rng = Pcg32::new(77);
        for _ in 0..13 {
            rng.next();
        }
        let image = rng.marshal();

        let mut restored = Pcg32::new(1);
        restored.unmarshal(&image).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next(), restored.next());
        }
    }

    #[test]
    fn test_invalid_length_leaves_state() {
        let mut rng = Pcg32::new(9);
        let before = rng.marshal();

        for len in [0, 8, 15, 17, 32] {
            let err = rng.unmarshal(&vec![0xAB; len]).unwrap_err();
            assert_eq!(
                err,
                StateError::InvalidLength { generator: "pcg32", expected: 16, actual: len }
            );
            assert_eq!(rng.marshal(), before);
        }
    }

    #[test]
    fn test_zero_seed_uses_clock() {
        let rng = Pcg32::new(0);
        let (_, inc) = rng.state();
        assert_eq!(inc & 1, 1);
        assert_ne!(inc, 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut rng = Pcg32::new(31);
        rng.next();
        let json = serde_json::to_string(&rng).unwrap();
        let back: Pcg32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rng);
    }

    #[test]
    #[should_panic(expected = "pcg32: argument to int is <= 0")]
    fn test_int_zero_panics() {
        Pcg32::new(1).int(0);
    }

    #[test]
    fn test_wide_bounds_use_joined_output() {
        // 2^32 is a power of two: mask of the two-draw word.
        let mut a = Pcg32::new(1);
        let mut b = a.clone();
        assert_eq!(a.int(1i64 << 32), (b.uint64() & u64::from(u32::MAX)) as i64);

        let mut rng = Pcg32::new(1);
        for n in [(1i64 << 31) + 1, 3_000_000_000, i64::from(u32::MAX), i64::MAX] {
            let v = rng.int(n);
            assert!((0..n).contains(&v), "int({}) = {}", n, v);
        }
    }

    proptest! {
        #[test]
        fn prop_deterministic(seed in 1u64..) {
            let mut a = Pcg32::new(seed);
            let mut b = Pcg32::new(seed);
            for _ in 0..32 {
                prop_assert_eq!(a.next(), b.next());
            }
        }

        #[test]
        fn prop_increment_is_odd(seed in 1u64..) {
            let (_, inc) = Pcg32::new(seed).state();
            prop_assert_eq!(inc & 1, 1);
            prop_assert_eq!(inc, (seed << 1) | 1);
        }

        #[test]
        fn prop_power_of_two_is_mask(seed in 1u64.., k in 0u32..=31) {
            let n = 1i64 << k;
            let mut a = Pcg32::new(seed);
            let mut b = a.clone();
            prop_assert_eq!(a.int(n), i64::from(b.next()) & (n - 1));
        }

        #[test]
        fn prop_wide_int_in_range(seed in 1u64.., n in ((1i64 << 31) + 1)..=(1i64 << 62)) {
            let mut rng = Pcg32::new(seed);
            let v = rng.int(n);
            prop_assert!((0..n).contains(&v));
        }

        #[test]
        fn prop_int_in_range(seed in 1u64.., n in 1i64..=(1i64 << 31)) {
            let mut rng = Pcg32::new(seed);
            let v = rng.int(n);
            prop_assert!((0..n).contains(&v));
        }
    }
}
