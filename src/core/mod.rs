//! Core primitives shared by every generator family.
//!
//! Nothing in this module draws random numbers itself; it holds the
//! arithmetic, codecs and seed plumbing the families are built from.

pub mod bounded;
pub mod seed;
pub mod state;
pub mod uint128;

// Re-export core types
pub use bounded::bounded_int;
pub use seed::{derive_seed, resolve_seed, ClockSeed, FixedSeed, SeedSource};
pub use state::StateError;
pub use uint128::Uint128;
