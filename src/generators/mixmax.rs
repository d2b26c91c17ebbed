//! MIXMAX
//!
//! Large-state generator: a 240-word vector is pushed through a lagged
//! masked sum, and the resulting vector is handed out as a batch of 240
//! outputs before the next pass.
//!
//! ```text
//! iterate:   for i in 0..240
//!                t    = s[(i + 1) % 240]
//!                s[i] = (s[i] + t) & MOD     (+1 if the result fell below t)
//!            counter = 240
//!
//! uint64:    counter -= 1; return s[counter]   (drains s[239] .. s[0])
//! ```
//!
//! Every word stays within `[0, MOD]`: seeds above `MOD` are masked, and
//! images holding a larger word are rejected.
//!
//! ## State Image (1928 bytes)
//!
//! ```text
//! [ s[0] ] ... [ s[239] ][ counter ]   (u64 LE each)
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::{Generator, WARM_UP_ROUNDS};
use crate::core::bounded::bounded_int;
use crate::core::seed::{resolve_seed, ClockSeed, SeedSource};
use crate::core::state::{check_len, decode_words, encode_words, StateError};

/// Number of state words.
pub const N: usize = 240;

/// Word mask, 2^61 - 2.
pub const MOD: u64 = (1u64 << 61) - 2;

/// Scale for the top 53 bits of a 61-bit word.
const TWO_M53: f64 = 1.0 / (1u64 << 53) as f64;

/// Multiplier used to fill the initial vector.
const SEED_MULTIPLIER: u64 = 6364136223846793005;

/// MIXMAX generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mixmax {
    state: [u64; N],
    /// Unconsumed words remaining in `state`, drained from the top.
    counter: usize,
}

impl Mixmax {
    /// Seed (zero means "use the clock") and run the warm-up.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self::empty();
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

    /// All-zero state with an empty buffer; only useful as an unmarshal target.
    pub const fn empty() -> Self {
        Self {
            state: [0; N],
            counter: 0,
        }
    }

    /// Current state vector.
    pub fn state(&self) -> &[u64; N] {
        &self.state
    }

    /// Words still buffered.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Apply one pass of the lagged sum and refill the buffer.
    fn iterate(&mut self) {
        for i in 0..N {
            let t = self.state[(i + 1) % N];
            let mut v = self.state[i].wrapping_add(t) & MOD;
            if v < t {
                v += 1;
            }
            self.state[i] = v;
        }
        self.counter = N;
    }
}

impl Generator for Mixmax {
    const NAME: &'static str = "mixmax";
    const STATE_LEN: usize = N * 8 + 8;

    fn seed(&mut self, seed: u64) {
        // MOD's low bit is clear, so only out-of-range seeds are masked.
        let seed = resolve_seed(seed);
        self.state[0] = if seed > MOD { seed & MOD } else { seed };
        for i in 1..N {
            self.state[i] = self.state[i - 1]
                .wrapping_mul(SEED_MULTIPLIER)
                .wrapping_add(1)
                & MOD;
        }
        self.counter = 0;
    }

    #[inline]
    fn uint64(&mut self) -> u64 {
        if self.counter == 0 {
            self.iterate();
        }
        self.counter -= 1;
        self.state[self.counter]
    }

    /// Bits 29..61 of the next word.
    #[inline]
    fn uint32(&mut self) -> u32 {
        (self.uint64() >> 29) as u32
    }

    /// `word / 2^61`, truncated to 53 bits so the top of the word domain
    /// cannot round up to 1.0.
    #[inline]
    fn float64(&mut self) -> f64 {
        (self.uint64() >> 8) as f64 * TWO_M53
    }

    #[inline]
    fn float32(&mut self) -> f32 {
        (self.uint64() >> 37) as f32 / (1u32 << 24) as f32
    }

    fn int(&mut self, n: i64) -> i64 {
        bounded_int(Self::NAME, 64, n, || self.uint64())
    }

    fn marshal(&self) -> Vec<u8> {
        let mut buf = encode_words(&self.state);
        buf.extend_from_slice(&(self.counter as u64).to_le_bytes());
        buf
    }

    fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError> {
        check_len(Self::NAME, Self::STATE_LEN, data)?;
        let words = decode_words::<{ N + 1 }>(data);

        let counter = words[N];
        if counter > N as u64 {
            tracing::warn!(generator = Self::NAME, counter, "rejected state image");
            return Err(StateError::InvalidCursor {
                generator: Self::NAME,
                counter,
                limit: N,
            });
        }

        if let Some((index, &value)) = words[..N].iter().enumerate().find(|&(_, &w)| w > MOD) {
            tracing::warn!(generator = Self::NAME, index, value, "rejected state image");
            return Err(StateError::InvalidWord {
                generator: Self::NAME,
                index,
                value,
            });
        }

        self.state.copy_from_slice(&words[..N]);
        self.counter = counter as usize;
        Ok(())
    }
}

// Serialized through the binary image so restores are validated.
impl Serialize for Mixmax {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.marshal())
    }
}

impl<'de> Deserialize<'de> for Mixmax {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        let mut rng = Self::empty();
        rng.unmarshal(&bytes).map_err(de::Error::custom)?;
        Ok(rng)
    }
}

// =============================================================================
// TESTS
// =============================================================================
