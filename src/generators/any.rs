//! Runtime-Selected Generators
//!
//! [`GeneratorConfig`] names a family, an optional seed and an optional
//! warm-up, and builds an [`AnyGenerator`]: one enum that carries any of
//! the five families and forwards the whole capability contract.
//!
//! ```json
//! { "kind": "xoshiro256starstar", "seed": 42 }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Generator, Jump, Mixmax, Pcg32, Pcg64, SplitMix64, Xoshiro256StarStar, WARM_UP_ROUNDS};
use crate::core::seed::{ClockSeed, SeedSource};
use crate::core::state::StateError;
use crate::core::uint128::Uint128;

/// Generator family selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratorKind {
    /// PCG-32.
    #[serde(rename = "pcg32")]
    Pcg32,
    /// PCG-64.
    #[serde(rename = "pcg64")]
    Pcg64,
    /// SplitMix64.
    #[serde(rename = "splitmix64")]
    SplitMix64,
    /// Xoshiro256**.
    #[default]
    #[serde(rename = "xoshiro256starstar")]
    Xoshiro256StarStar,
    /// MIXMAX.
    #[serde(rename = "mixmax")]
    Mixmax,
}

impl GeneratorKind {
    /// Every family, in declaration order.
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::Pcg32,
        GeneratorKind::Pcg64,
        GeneratorKind::SplitMix64,
        GeneratorKind::Xoshiro256StarStar,
        GeneratorKind::Mixmax,
    ];

    /// Family name (matches the serde name).
    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Pcg32 => Pcg32::NAME,
            GeneratorKind::Pcg64 => Pcg64::NAME,
            GeneratorKind::SplitMix64 => SplitMix64::NAME,
            GeneratorKind::Xoshiro256StarStar => Xoshiro256StarStar::NAME,
            GeneratorKind::Mixmax => Mixmax::NAME,
        }
    }

    /// Binary state image length.
    pub fn state_len(self) -> usize {
        match self {
            GeneratorKind::Pcg32 => Pcg32::STATE_LEN,
            GeneratorKind::Pcg64 => Pcg64::STATE_LEN,
            GeneratorKind::SplitMix64 => SplitMix64::STATE_LEN,
            GeneratorKind::Xoshiro256StarStar => Xoshiro256StarStar::STATE_LEN,
            GeneratorKind::Mixmax => Mixmax::STATE_LEN,
        }
    }

    /// Outputs discarded after seeding unless the config overrides it.
    pub fn default_warm_up(self) -> usize {
        match self {
            GeneratorKind::Xoshiro256StarStar | GeneratorKind::Mixmax => WARM_UP_ROUNDS,
            _ => 0,
        }
    }

    /// Whether the family supports jump-ahead.
    pub fn supports_jump(self) -> bool {
        matches!(self, GeneratorKind::Xoshiro256StarStar)
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized family name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown generator: {0}")]
pub struct UnknownGenerator(pub String);

impl FromStr for GeneratorKind {
    type Err = UnknownGenerator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownGenerator(s.to_string()))
    }
}

/// How to build a generator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Family.
    pub kind: GeneratorKind,
    /// Seed; `None` draws one from the seed source at build time.
    pub seed: Option<u64>,
    /// Outputs to discard after seeding; `None` uses the family default.
    pub warm_up: Option<usize>,
}

impl GeneratorConfig {
    /// Config for `kind` with a clock seed and the default warm-up.
    pub fn new(kind: GeneratorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Pin the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the warm-up length.
    pub fn with_warm_up(mut self, rounds: usize) -> Self {
        self.warm_up = Some(rounds);
        self
    }

    /// Build, drawing a missing seed from the wall clock.
    pub fn build(&self) -> AnyGenerator {
        self.build_with(&mut ClockSeed)
    }

    /// Build, drawing a missing seed from `source`.
    pub fn build_with<S: SeedSource + ?Sized>(&self, source: &mut S) -> AnyGenerator {
        let seed = self.seed.unwrap_or_else(|| source.next_seed());
        let warm_up = self.warm_up.unwrap_or_else(|| self.kind.default_warm_up());
        tracing::debug!(generator = %self.kind, seed, warm_up, "building generator");

        let mut rng = AnyGenerator::seeded(self.kind, seed);
        for _ in 0..warm_up {
            rng.uint64();
        }
        rng
    }
}

/// Any of the five families behind one type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyGenerator {
    /// PCG-32.
    Pcg32(Pcg32),
    /// PCG-64.
    Pcg64(Pcg64),
    /// SplitMix64.
    SplitMix64(SplitMix64),
    /// Xoshiro256**.
    Xoshiro256StarStar(Xoshiro256StarStar),
    /// MIXMAX.
    Mixmax(Mixmax),
}

macro_rules! dispatch {
    ($self:expr, $rng:ident => $body:expr) => {
        match $self {
            AnyGenerator::Pcg32($rng) => $body,
            AnyGenerator::Pcg64($rng) => $body,
            AnyGenerator::SplitMix64($rng) => $body,
            AnyGenerator::Xoshiro256StarStar($rng) => $body,
            AnyGenerator::Mixmax($rng) => $body,
        }
    };
}

impl AnyGenerator {
    /// Seed a fresh generator of `kind` without any warm-up.
    pub fn seeded(kind: GeneratorKind, seed: u64) -> Self {
        let mut rng = Self::blank(kind);
        rng.seed(seed);
        rng
    }

    /// Restore a generator of `kind` from its binary state image.
    pub fn from_image(kind: GeneratorKind, data: &[u8]) -> Result<Self, StateError> {
        let mut rng = Self::blank(kind);
        rng.unmarshal(data)?;
        Ok(rng)
    }

    fn blank(kind: GeneratorKind) -> Self {
        match kind {
            GeneratorKind::Pcg32 => AnyGenerator::Pcg32(Pcg32::from_state(0, 1)),
            GeneratorKind::Pcg64 => {
                AnyGenerator::Pcg64(Pcg64::from_state(Uint128::ZERO, Uint128::from_low(1)))
            }
            GeneratorKind::SplitMix64 => AnyGenerator::SplitMix64(SplitMix64::new(0)),
            GeneratorKind::Xoshiro256StarStar => {
                AnyGenerator::Xoshiro256StarStar(Xoshiro256StarStar::from_state([0; 4]))
            }
            GeneratorKind::Mixmax => AnyGenerator::Mixmax(Mixmax::empty()),
        }
    }

    /// Family of the wrapped generator.
    pub fn kind(&self) -> GeneratorKind {
        match self {
            AnyGenerator::Pcg32(_) => GeneratorKind::Pcg32,
            AnyGenerator::Pcg64(_) => GeneratorKind::Pcg64,
            AnyGenerator::SplitMix64(_) => GeneratorKind::SplitMix64,
            AnyGenerator::Xoshiro256StarStar(_) => GeneratorKind::Xoshiro256StarStar,
            AnyGenerator::Mixmax(_) => GeneratorKind::Mixmax,
        }
    }

    /// See [`Generator::seed`].
    pub fn seed(&mut self, seed: u64) {
        dispatch!(self, rng => rng.seed(seed))
    }

    /// See [`Generator::uint64`].
    pub fn uint64(&mut self) -> u64 {
        dispatch!(self, rng => rng.uint64())
    }

    /// See [`Generator::uint32`].
    pub fn uint32(&mut self) -> u32 {
        dispatch!(self, rng => rng.uint32())
    }

    /// See [`Generator::int64`].
    pub fn int64(&mut self) -> i64 {
        dispatch!(self, rng => rng.int64())
    }

    /// See [`Generator::int32`].
    pub fn int32(&mut self) -> i32 {
        dispatch!(self, rng => rng.int32())
    }

    /// See [`Generator::float64`].
    pub fn float64(&mut self) -> f64 {
        dispatch!(self, rng => rng.float64())
    }

    /// See [`Generator::float32`].
    pub fn float32(&mut self) -> f32 {
        dispatch!(self, rng => rng.float32())
    }

    /// See [`Generator::int`].
    pub fn int(&mut self, n: i64) -> i64 {
        dispatch!(self, rng => rng.int(n))
    }

    /// See [`Generator::marshal`].
    pub fn marshal(&self) -> Vec<u8> {
        dispatch!(self, rng => rng.marshal())
    }

    /// See [`Generator::unmarshal`].
    pub fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError> {
        dispatch!(self, rng => rng.unmarshal(data))
    }

    /// See [`Generator::reset`].
    pub fn reset(&mut self) {
        dispatch!(self, rng => rng.reset())
    }

    /// See [`Generator::reset_from`].
    pub fn reset_from<S: SeedSource + ?Sized>(&mut self, source: &mut S) {
        dispatch!(self, rng => rng.reset_from(source))
    }

    /// Jump 2^128 steps ahead; returns `false` if the family cannot jump.
    pub fn jump(&mut self) -> bool {
        match self {
            AnyGenerator::Xoshiro256StarStar(rng) => {
                rng.jump();
                true
            }
            _ => false,
        }
    }

    /// Jump 2^192 steps ahead; returns `false` if the family cannot jump.
    pub fn long_jump(&mut self) -> bool {
        match self {
            AnyGenerator::Xoshiro256StarStar(rng) => {
                rng.long_jump();
                true
            }
            _ => false,
        }
    }

    /// Serialize (family tag included) with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from [`AnyGenerator::to_bytes`] output.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

impl From<Pcg32> for AnyGenerator {
    fn from(rng: Pcg32) -> Self {
        AnyGenerator::Pcg32(rng)
    }
}

impl From<Pcg64> for AnyGenerator {
    fn from(rng: Pcg64) -> Self {
        AnyGenerator::Pcg64(rng)
    }
}

impl From<SplitMix64> for AnyGenerator {
    fn from(rng: SplitMix64) -> Self {
        AnyGenerator::SplitMix64(rng)
    }
}

impl From<Xoshiro256StarStar> for AnyGenerator {
    fn from(rng: Xoshiro256StarStar) -> Self {
        AnyGenerator::Xoshiro256StarStar(rng)
    }
}

impl From<Mixmax> for AnyGenerator {
    fn from(rng: Mixmax) -> Self {
        AnyGenerator::Mixmax(rng)
    }
}

impl rand_core::RngCore for AnyGenerator {
    fn next_u32(&mut self) -> u32 {
        self.uint32()
    }

    fn next_u64(&mut self) -> u64 {
        self.uint64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
