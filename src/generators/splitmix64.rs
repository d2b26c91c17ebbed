//! SplitMix64
//!
//! Weyl-sequence counter plus a two-round avalanche mix. Used standalone
//! and as the seed expander for Xoshiro256**.
//!
//! ## State Image (8 bytes)
//!
//! ```text
//! [ state: u64 LE ]
//! ```

use serde::{Deserialize, Serialize};

use super::Generator;
use crate::core::bounded::bounded_int;
use crate::core::seed::{ClockSeed, SeedSource};
use crate::core::state::{check_len, decode_words, encode_words, StateError};

/// Weyl increment (golden ratio).
const GAMMA: u64 = 0x9e3779b97f4a7c15;

/// SplitMix64 generator.
///
/// Unlike the other families a zero seed is taken literally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a generator whose state is exactly `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Create a generator seeded from the wall clock.
    pub fn from_clock() -> Self {
        Self::new(ClockSeed.next_seed())
    }

    /// Current state word.
    pub fn state(&self) -> u64 {
        self.state
    }
}

/// One SplitMix64 step over an external accumulator.
///
/// Advances `state` by the Weyl increment and returns the mixed output.
#[inline]
pub fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(GAMMA);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

impl Generator for SplitMix64 {
    const NAME: &'static str = "splitmix64";
    const STATE_LEN: usize = 8;

    fn seed(&mut self, seed: u64) {
        self.state = seed;
    }

    #[inline]
    fn uint64(&mut self) -> u64 {
        splitmix64(&mut self.state)
    }

    fn int(&mut self, n: i64) -> i64 {
        bounded_int(Self::NAME, 64, n, || splitmix64(&mut self.state))
    }

    fn marshal(&self) -> Vec<u8> {
        encode_words(&[self.state])
    }

    fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError> {
        check_len(Self::NAME, Self::STATE_LEN, data)?;
        let [state] = decode_words::<1>(data);
        self.state = state;
        Ok(())
    }
}

/// A SplitMix64 stream doubles as a deterministic seed source.
impl SeedSource for SplitMix64 {
    fn next_seed(&mut self) -> u64 {
        self.uint64()
    }
}

// =============================================================================
// TESTS
// =============================================================================
