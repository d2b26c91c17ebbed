//! Mutex-Guarded Generators
//!
//! [`Locked`] wraps any [`Generator`] so it can be shared by reference
//! across threads. Each call holds the lock for exactly its own duration;
//! the guard drops on every exit path, error returns included.
//!
//! For throughput prefer one generator per thread (split with
//! [`Jump`] or distinct seeds) over sharing a `Locked`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::seed::SeedSource;
use crate::core::state::StateError;
use crate::generators::{Generator, Jump};

/// Exclusive-access wrapper around a generator.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use prng_suite::{Locked, SplitMix64};
///
/// let shared = Arc::new(Locked::new(SplitMix64::new(42)));
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let rng = Arc::clone(&shared);
///         thread::spawn(move || rng.uint64())
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// ```
#[derive(Debug)]
pub struct Locked<G> {
    inner: Mutex<G>,
}

impl<G: Generator> Locked<G> {
    /// Wrap `rng`.
    pub fn new(rng: G) -> Self {
        Self {
            inner: Mutex::new(rng),
        }
    }

    /// Every operation is atomic on the state, so a panic in another
    /// holder never leaves it half-written; recover the guard.
    fn lock(&self) -> MutexGuard<'_, G> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Generator::seed`].
    pub fn seed(&self, seed: u64) {
        self.lock().seed(seed)
    }

    /// See [`Generator::uint64`].
    pub fn uint64(&self) -> u64 {
        self.lock().uint64()
    }

    /// See [`Generator::uint32`].
    pub fn uint32(&self) -> u32 {
        self.lock().uint32()
    }

    /// See [`Generator::int64`].
    pub fn int64(&self) -> i64 {
        self.lock().int64()
    }

    /// See [`Generator::int32`].
    pub fn int32(&self) -> i32 {
        self.lock().int32()
    }

    /// See [`Generator::float64`].
    pub fn float64(&self) -> f64 {
        self.lock().float64()
    }

    /// See [`Generator::float32`].
    pub fn float32(&self) -> f32 {
        self.lock().float32()
    }

    /// See [`Generator::int`]. The argument is checked before locking.
    ///
    /// # Panics
    ///
    /// Panics if `n <= 0`.
    pub fn int(&self, n: i64) -> i64 {
        if n <= 0 {
            panic!("{}: argument to int is <= 0", G::NAME);
        }
        self.lock().int(n)
    }

    /// See [`Generator::marshal`].
    pub fn marshal(&self) -> Vec<u8> {
        self.lock().marshal()
    }

    /// See [`Generator::unmarshal`].
    pub fn unmarshal(&self, data: &[u8]) -> Result<(), StateError> {
        self.lock().unmarshal(data)
    }

    /// See [`Generator::reset`].
    pub fn reset(&self) {
        self.lock().reset()
    }

    /// See [`Generator::reset_from`].
    pub fn reset_from<S: SeedSource + ?Sized>(&self, source: &mut S) {
        self.lock().reset_from(source)
    }

    /// Run `f` with the generator held for the whole closure.
    pub fn with<R>(&self, f: impl FnOnce(&mut G) -> R) -> R {
        f(&mut self.lock())
    }

    /// Unwrap the generator.
    pub fn into_inner(self) -> G {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G: Generator + Jump> Locked<G> {
    /// See [`Jump::jump`].
    pub fn jump(&self) {
        self.lock().jump()
    }

    /// See [`Jump::long_jump`].
    pub fn long_jump(&self) {
        self.lock().long_jump()
    }
}

impl<G: Generator> From<G> for Locked<G> {
    fn from(rng: G) -> Self {
        Self::new(rng)
    }
}

// =============================================================================
// TESTS
// =============================================================================
