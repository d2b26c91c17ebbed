//! Xoshiro256**
//!
//! Four-word xor/shift/rotate generator. The recurrence is linear over
//! GF(2), so advancing by 2^128 or 2^192 steps is a polynomial evaluation
//! in the transition matrix: walk the 256 bits of a fixed jump polynomial,
//! fold the current state into an accumulator wherever a bit is set, and
//! step once per bit either way.
//!
//! Seeding expands the 64-bit seed through four SplitMix64 draws;
//! [`Xoshiro256StarStar::new`] then discards ten outputs.
//!
//! ## State Image (32 bytes)
//!
//! ```text
//! [ s0 ][ s1 ][ s2 ][ s3 ]   (u64 LE each)
//! ```

use serde::{Deserialize, Serialize};

use super::splitmix64::splitmix64;
use super::{Generator, Jump, WARM_UP_ROUNDS};
use crate::core::bounded::bounded_int;
use crate::core::seed::{resolve_seed, ClockSeed, SeedSource};
use crate::core::state::{check_len, decode_words, encode_words, StateError};

/// Jump polynomial for 2^128 steps.
const JUMP: [u64; 4] = [
    0x180ec6d33cfd0aba,
    0xd5a61266f0c9392c,
    0xa9582618e03fc9aa,
    0x39abdc4529b1661c,
];

/// Jump polynomial for 2^192 steps.
const LONG_JUMP: [u64; 4] = [
    0x76e15d3efefdcbbf,
    0xc5004e441c522fb3,
    0x77710069854ee241,
    0x39109bb02acbe635,
];

/// Xoshiro256** generator.
///
/// # Example
///
/// ```
/// use prng_suite::{Generator, Jump, Xoshiro256StarStar};
///
/// let mut base = Xoshiro256StarStar::new(42);
/// let mut stream = base.clone();
/// stream.jump(); // 2^128 draws ahead of `base`
/// assert_ne!(base.uint64(), stream.uint64());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xoshiro256StarStar {
    state: [u64; 4],
}

impl Xoshiro256StarStar {
    /// Seed (zero means "use the clock") and run the warm-up.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self::from_state([0; 4]);
        rng.seed(seed);
        for _ in 0..WARM_UP_ROUNDS {
            rng.uint64();
        }
        rng
    }

    /// Create a warmed-up generator seeded from the wall clock.
    pub fn from_clock() -> Self {
        Self::new(ClockSeed.next_seed())
    }

    /// Rebuild from raw state words without seeding or warm-up.
    pub const fn from_state(state: [u64; 4]) -> Self {
        Self { state }
    }

    /// Current state words.
    pub fn state(&self) -> [u64; 4] {
        self.state
    }

    /// Run the jump polynomial `poly` against the current state.
    fn apply_jump(&mut self, poly: &[u64; 4]) {
        let mut acc = [0u64; 4];
        for &word in poly {
            for bit in 0..64 {
                if word & (1u64 << bit) != 0 {
                    for (a, s) in acc.iter_mut().zip(self.state.iter()) {
                        *a ^= *s;
                    }
                }
                self.uint64();
            }
        }
        self.state = acc;
    }
}

impl Generator for Xoshiro256StarStar {
    const NAME: &'static str = "xoshiro256starstar";
    const STATE_LEN: usize = 32;

    fn seed(&mut self, seed: u64) {
        let mut acc = resolve_seed(seed);
        for word in self.state.iter_mut() {
            *word = splitmix64(&mut acc);
        }
    }

    #[inline]
    fn uint64(&mut self) -> u64 {
        let s = &mut self.state;
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;

        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(45);

        result
    }

    fn int(&mut self, n: i64) -> i64 {
        bounded_int(Self::NAME, 64, n, || self.uint64())
    }

    fn marshal(&self) -> Vec<u8> {
        encode_words(&self.state)
    }

    fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError> {
        check_len(Self::NAME, Self::STATE_LEN, data)?;
        self.state = decode_words::<4>(data);
        Ok(())
    }
}

impl Jump for Xoshiro256StarStar {
    fn jump(&mut self) {
        tracing::trace!(generator = Self::NAME, "jump 2^128");
        self.apply_jump(&JUMP);
    }

    fn long_jump(&mut self) {
        tracing::trace!(generator = Self::NAME, "jump 2^192");
        self.apply_jump(&LONG_JUMP);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn xor_states(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
        [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
    }

    #[test]
    fn test_reference_vector() {
        // Reference xoshiro256** output for state {1, 2, 3, 4}.
        let mut rng = Xoshiro256StarStar::from_state([1, 2, 3, 4]);
        assert_eq!(rng.uint64(), 11520);
        assert_eq!(rng.uint64(), 0);
        assert_eq!(rng.uint64(), 1509978240);
        assert_eq!(rng.uint64(), 1215971899390074240);
    }

    #[test]
    fn test_seed_uses_splitmix64() {
        let mut rng = Xoshiro256StarStar::from_state([0; 4]);
        rng.seed(42);
        assert_eq!(
            rng.state(),
            [
                13679457532755275413,
                2949826092126892291,
                5139283748462763858,
                6349198060258255764
            ]
        );
    }

    #[test]
    fn test_known_values_after_warm_up() {
        let mut rng = Xoshiro256StarStar::new(42);
        assert_eq!(rng.uint64(), 12589033428110817649);
        assert_eq!(rng.uint64(), 5362058279183681893);
        assert_eq!(rng.uint64(), 14776290213336893110);
    }

    #[test]
    fn test_new_discards_ten_outputs() {
        let mut raw = Xoshiro256StarStar::from_state([0; 4]);
        raw.seed(42);
        for _ in 0..WARM_UP_ROUNDS {
            raw.uint64();
        }
        assert_eq!(raw, Xoshiro256StarStar::new(42));
    }

    #[test]
    fn test_jump_known_values() {
        let mut rng = Xoshiro256StarStar::new(42);
        rng.jump();
        assert_eq!(rng.uint64(), 10214096832459272891);
        assert_eq!(rng.uint64(), 3817095900452140333);
    }

    #[test]
    fn test_long_jump_known_values() {
        let mut rng = Xoshiro256StarStar::new(42);
        rng.long_jump();
        assert_eq!(rng.uint64(), 12665801238041601809);
        assert_eq!(rng.uint64(), 3046466222165492812);
    }

    #[test]
    fn test_jump_and_long_jump_differ() {
        let mut a = Xoshiro256StarStar::new(7);
        let mut b = a.clone();
        a.jump();
        b.long_jump();
        assert_ne!(a.state(), b.state());
    }

    #[test]
    fn test_invalid_length_leaves_state() {
        let mut rng = Xoshiro256StarStar::new(3);
        let before = rng.state();
        let err = rng.unmarshal(&[0u8; 31]).unwrap_err();
        assert_eq!(err.to_string(), "xoshiro256starstar: invalid state length (expected 32 bytes, got 31)");
        assert_eq!(rng.state(), before);
    }

    #[test]
    #[should_panic(expected = "xoshiro256starstar: argument to int is <= 0")]
    fn test_int_zero_panics() {
        Xoshiro256StarStar::new(1).int(0);
    }

    proptest! {
        #[test]
        fn prop_round_trip(seed in 1u64.., skip in 0usize..32) {
            let mut rng = Xoshiro256StarStar::new(seed);
            for _ in 0..skip {
                rng.uint64();
            }
            let mut restored = Xoshiro256StarStar::from_state([0; 4]);
            restored.unmarshal(&rng.marshal()).unwrap();
            for _ in 0..16 {
                prop_assert_eq!(rng.uint64(), restored.uint64());
            }
        }

        /// Jumping is a power of the transition matrix, so it commutes
        /// with a single step.
        #[test]
        fn prop_jump_commutes_with_step(state: [u64; 4]) {
            prop_assume!(state != [0; 4]);
            let mut stepped_first = Xoshiro256StarStar::from_state(state);
            stepped_first.uint64();
            stepped_first.jump();

            let mut jumped_first = Xoshiro256StarStar::from_state(state);
            jumped_first.jump();
            jumped_first.uint64();

            prop_assert_eq!(stepped_first.state(), jumped_first.state());
        }

        /// Jumping is linear over GF(2): J(a ^ b) = J(a) ^ J(b).
        #[test]
        fn prop_jump_is_linear(a: [u64; 4], b: [u64; 4]) {
            let mut ja = Xoshiro256StarStar::from_state(a);
            let mut jb = Xoshiro256StarStar::from_state(b);
            let mut jab = Xoshiro256StarStar::from_state(xor_states(a, b));
            ja.long_jump();
            jb.long_jump();
            jab.long_jump();
            prop_assert_eq!(jab.state(), xor_states(ja.state(), jb.state()));
        }

        #[test]
        fn prop_power_of_two_is_mask(seed in 1u64.., k in 0u32..63) {
            let n = 1i64 << k;
            let mut a = Xoshiro256StarStar::new(seed);
            let mut b = a.clone();
            prop_assert_eq!(a.int(n), (b.uint64() & (n as u64 - 1)) as i64);
        }
    }
}
