//! # PRNG Suite
//!
//! Deterministic, serializable pseudo-random number generators for
//! simulation, procedural generation and sampling.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        PRNG SUITE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Shared primitives                        │
//! │  ├── uint128.rs   - Two-word 128-bit arithmetic              │
//! │  ├── bounded.rs   - Unbiased integers in [0, n)              │
//! │  ├── state.rs     - Binary state images + StateError         │
//! │  └── seed.rs      - Clock / fixed / derived seed sources     │
//! │                                                              │
//! │  generators/      - Generator families                       │
//! │  ├── pcg32.rs     - PCG-32 (64-bit LCG, 32-bit output)       │
//! │  ├── pcg64.rs     - PCG-64 (128-bit LCG)                     │
//! │  ├── splitmix64.rs- SplitMix64                               │
//! │  ├── xoshiro256ss.rs - Xoshiro256** with jump-ahead          │
//! │  ├── mixmax.rs    - MIXMAX (240-word buffered)               │
//! │  └── any.rs       - Runtime selection + config               │
//! │                                                              │
//! │  concurrent/      - Mutex-guarded sharing                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! For any non-zero seed, every family produces the same sequence on
//! every platform. A zero seed asks for a wall-clock seed instead
//! (SplitMix64 excepted, which takes zero literally).
//!
//! Every generator snapshots to a fixed-length little-endian image with
//! [`Generator::marshal`] and resumes bit-for-bit after
//! [`Generator::unmarshal`].
//!
//! None of these generators are cryptographically secure.
//!
//! ```
//! use prng_suite::{Generator, Xoshiro256StarStar};
//!
//! let mut rng = Xoshiro256StarStar::new(42);
//! let roll = rng.int(6) + 1;
//! assert!((1..=6).contains(&roll));
//!
//! let image = rng.marshal();
//! let mut copy = Xoshiro256StarStar::new(1);
//! copy.unmarshal(&image).unwrap();
//! assert_eq!(rng.uint64(), copy.uint64());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod concurrent;
pub mod core;
pub mod generators;

// Re-export commonly used types
pub use concurrent::Locked;
pub use crate::core::seed::{derive_seed, ClockSeed, FixedSeed, SeedSource};
pub use crate::core::state::StateError;
pub use crate::core::uint128::Uint128;
pub use generators::{
    AnyGenerator, Generator, GeneratorConfig, GeneratorKind, Jump, Mixmax, Pcg32, Pcg64,
    SplitMix64, Xoshiro256StarStar, WARM_UP_ROUNDS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
