//! PCG-64 (XSL-RR over a 128-bit LCG)
//!
//! State and increment are 128-bit values held as `(low, high)` word pairs
//! and stepped with the two-word helpers in [`crate::core::uint128`].
//!
//! Seeding differs from PCG-32 on purpose: the increment is `seed | 1`
//! (not `(seed << 1) | 1`), and the second seeding step adds the increment
//! rather than the raw seed. Known-answer vectors depend on both.
//!
//! ## State Image (32 bytes)
//!
//! ```text
//! [ state.low ][ state.high ][ inc.low ][ inc.high ]   (u64 LE each)
//! ```

use serde::{Deserialize, Serialize};

use super::Generator;
use crate::core::bounded::bounded_int;
use crate::core::seed::{resolve_seed, ClockSeed, SeedSource};
use crate::core::state::{check_len, decode_words, encode_words, StateError};
use crate::core::uint128::{add128, mul128, Uint128};

/// 128-bit LCG multiplier.
const MULTIPLIER: Uint128 = Uint128::new(0x5851f42d4c957f2d, 0x14057b7ef767814f);

/// PCG-64 generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pcg64 {
    state: Uint128,
    inc: Uint128,
}

impl Pcg64 {
    /// Create a generator from `seed` (zero means "use the clock").
    pub fn new(seed: u64) -> Self {
        let mut rng = Self::from_state(Uint128::ZERO, Uint128::from_low(1));
        rng.seed(seed);
        rng
    }

    /// Create a generator seeded from the wall clock.
    pub fn from_clock() -> Self {
        Self::new(ClockSeed.next_seed())
    }

    /// Rebuild from raw state and increment without seeding.
    pub const fn from_state(state: Uint128, inc: Uint128) -> Self {
        Self { state, inc }
    }

    /// Current `(state, inc)`.
    pub fn state(&self) -> (Uint128, Uint128) {
        (self.state, self.inc)
    }

    /// Advance the LCG and return the permuted 64-bit output.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    pub fn next(&mut self) -> u64 {
        let old = self.state;
        self.state = add128(mul128(old, MULTIPLIER), self.inc);

        let xorshifted = (old.high ^ old.low).rotate_right(29);
        let rot = (old.high >> 58) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Generator for Pcg64 {
    const NAME: &'static str = "pcg64";
    const STATE_LEN: usize = 32;

    fn seed(&mut self, seed: u64) {
        let seed = resolve_seed(seed);
        self.state = Uint128::ZERO;
        self.inc = Uint128::from_low(seed | 1);
        self.next();
        self.state = add128(self.state, self.inc);
        self.next();
    }

    #[inline]
    fn uint64(&mut self) -> u64 {
        self.next()
    }

    fn int(&mut self, n: i64) -> i64 {
        bounded_int(Self::NAME, 64, n, || self.next())
    }

    fn marshal(&self) -> Vec<u8> {
        encode_words(&[self.state.low, self.state.high, self.inc.low, self.inc.high])
    }

    fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError> {
        check_len(Self::NAME, Self::STATE_LEN, data)?;
        let [state_low, state_high, inc_low, inc_high] = decode_words::<4>(data);
        self.state = Uint128::new(state_low, state_high);
        self.inc = Uint128::new(inc_low, inc_high);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
