//! Seed Sources
//!
//! Generators only ever consume a `u64`. Where that value comes from is a
//! caller decision expressed through [`SeedSource`]:
//!
//! - [`ClockSeed`] - wall-clock nanoseconds (the zero-seed fallback)
//! - [`FixedSeed`] - a constant, for tests and replays
//! - [`SplitMix64`](crate::SplitMix64) - a deterministic stream of seeds
//! - [`derive_seed`] - stable seeds from labelled byte strings

use chrono::Utc;
use sha2::{Digest, Sha256};

/// Domain separator prepended by [`derive_seed`].
const SEED_DOMAIN: &[u8] = b"PRNG_SUITE_SEED_V1";

/// Anything that can hand out 64-bit seeds.
pub trait SeedSource {
    /// Produce the next seed.
    fn next_seed(&mut self) -> u64;
}

/// Seeds from the current wall-clock time in nanoseconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockSeed;

impl SeedSource for ClockSeed {
    fn next_seed(&mut self) -> u64 {
        let now = Utc::now();
        // Out of range only past the year 2262; fall back to microseconds.
        now.timestamp_nanos_opt()
            .map(|nanos| nanos as u64)
            .unwrap_or_else(|| now.timestamp_micros() as u64)
    }
}

/// Always returns the wrapped value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedSeed(pub u64);

impl SeedSource for FixedSeed {
    fn next_seed(&mut self) -> u64 {
        self.0
    }
}

impl<S: SeedSource + ?Sized> SeedSource for &mut S {
    fn next_seed(&mut self) -> u64 {
        (**self).next_seed()
    }
}

/// Map the zero seed to a clock reading; pass anything else through.
#[inline]
pub fn resolve_seed(seed: u64) -> u64 {
    if seed == 0 {
        let seed = ClockSeed.next_seed();
        tracing::debug!(seed, "zero seed replaced by clock seed");
        seed
    } else {
        seed
    }
}

/// Derive a stable seed from a domain label and a list of parts.
///
/// Each part is length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
/// The first 8 bytes of the SHA-256 digest are read little-endian.
pub fn derive_seed<P: AsRef<[u8]>>(domain: &[u8], parts: &[P]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(SEED_DOMAIN);
    hasher.update((domain.len() as u64).to_le_bytes());
    hasher.update(domain);

    for part in parts {
        let part = part.as_ref();
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(bytes)
}

// =============================================================================
// TESTS
// =============================================================================
