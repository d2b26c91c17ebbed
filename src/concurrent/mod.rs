//! Shared-access wrappers.
//!
//! Generators themselves are plain single-owner state machines; this
//! module adds the locking layer for callers that must share one.

pub mod locked;

pub use locked::Locked;
