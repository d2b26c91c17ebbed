//! Generator Families
//!
//! Five independent generators behind one capability contract:
//!
//! ```text
//! ┌──────────────────┬────────┬──────────┬──────────────────────────┐
//! │  Family          │ Output │ Image    │ Extras                   │
//! ├──────────────────┼────────┼──────────┼──────────────────────────┤
//! │  PCG-32          │ 32 bit │   16 B   │                          │
//! │  PCG-64          │ 64 bit │   32 B   │ 128-bit LCG              │
//! │  SplitMix64      │ 64 bit │    8 B   │ seed expansion           │
//! │  Xoshiro256**    │ 64 bit │   32 B   │ jump / long jump         │
//! │  MIXMAX          │ 61 bit │ 1928 B   │ 240-word buffered output │
//! └──────────────────┴────────┴──────────┴──────────────────────────┘
//! ```
//!
//! Every extraction both advances and reads the state. None of these are
//! suitable where unpredictability matters.

pub mod any;
pub mod mixmax;
pub mod pcg32;
pub mod pcg64;
pub mod splitmix64;
pub mod xoshiro256ss;

pub use any::{AnyGenerator, GeneratorConfig, GeneratorKind};
pub use mixmax::Mixmax;
pub use pcg32::Pcg32;
pub use pcg64::Pcg64;
pub use splitmix64::SplitMix64;
pub use xoshiro256ss::Xoshiro256StarStar;

use crate::core::seed::{ClockSeed, SeedSource};
use crate::core::state::StateError;

/// Outputs discarded by `new` for families that need a warm-up.
pub const WARM_UP_ROUNDS: usize = 10;

/// Shared capability set of every generator family.
pub trait Generator {
    /// Family name used in logs and error messages.
    const NAME: &'static str;

    /// Exact length of the binary state image in bytes.
    const STATE_LEN: usize;

    /// Re-initialize the state from `seed`.
    fn seed(&mut self, seed: u64);

    /// Next 64-bit output.
    fn uint64(&mut self) -> u64;

    /// Next 32-bit output.
    #[inline]
    fn uint32(&mut self) -> u32 {
        (self.uint64() >> 32) as u32
    }

    /// Next non-negative 63-bit integer.
    #[inline]
    fn int64(&mut self) -> i64 {
        (self.uint64() >> 1) as i64
    }

    /// Next non-negative 31-bit integer.
    #[inline]
    fn int32(&mut self) -> i32 {
        (self.uint32() >> 1) as i32
    }

    /// Uniform float in `[0, 1)` with 53 bits of precision.
    #[inline]
    fn float64(&mut self) -> f64 {
        (self.uint64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in `[0, 1)` with 24 bits of precision.
    #[inline]
    fn float32(&mut self) -> f32 {
        (self.uint32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform integer in `[0, n)`.
    ///
    /// # Panics
    ///
    /// Panics if `n <= 0`.
    fn int(&mut self, n: i64) -> i64;

    /// Snapshot the full state as a fixed-size little-endian image.
    fn marshal(&self) -> Vec<u8>;

    /// Restore a snapshot. On error the current state is left untouched.
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError>;

    /// Reseed from the wall clock.
    fn reset(&mut self) {
        self.reset_from(&mut ClockSeed);
    }

    /// Reseed from an arbitrary seed source.
    fn reset_from<S: SeedSource + ?Sized>(&mut self, source: &mut S) {
        let seed = source.next_seed();
        tracing::debug!(generator = Self::NAME, seed, "reset");
        self.seed(seed);
    }
}

/// Jump-ahead for generators with a linear recurrence.
pub trait Jump {
    /// Advance the state by 2^128 steps.
    fn jump(&mut self);

    /// Advance the state by 2^192 steps.
    fn long_jump(&mut self);
}

/// Bridge a family into `rand_core`.
///
/// A zero seed keeps its clock-seed meaning here too.
macro_rules! impl_rand_core {
    ($($ty:ty),* $(,)?) => {$(
        impl rand_core::RngCore for $ty {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                Generator::uint32(self)
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                Generator::uint64(self)
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                rand_core::impls::fill_bytes_via_next(self, dest)
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }

        impl rand_core::SeedableRng for $ty {
            type Seed = [u8; 8];

            fn from_seed(seed: Self::Seed) -> Self {
                <$ty>::new(u64::from_le_bytes(seed))
            }

            fn seed_from_u64(state: u64) -> Self {
                <$ty>::new(state)
            }
        }
    )*};
}

impl_rand_core!(Pcg32, Pcg64, SplitMix64, Xoshiro256StarStar, Mixmax);

// =============================================================================
// TESTS
// =============================================================================
