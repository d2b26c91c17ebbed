//! Two-Word 128-bit Arithmetic
//!
//! PCG-64 keeps its state and increment as `(low, high)` pairs of 64-bit
//! words so the binary state image is a plain sequence of little-endian
//! words. All arithmetic wraps modulo 2^128.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  value = high * 2^64 + low                   │
//! │                                              │
//! │  a * b mod 2^128                             │
//! │    = a0*b0                    (full 128 bit) │
//! │    + (a0*b1 + a1*b0) << 64    (low 64 bits)  │
//! │    + a1*b1 << 128             (discarded)    │
//! └──────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Unsigned 128-bit integer stored as two 64-bit words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uint128 {
    /// Low 64 bits.
    pub low: u64,
    /// High 64 bits.
    pub high: u64,
}

impl Uint128 {
    /// Zero.
    pub const ZERO: Self = Self::new(0, 0);

    /// Build from explicit words.
    #[inline]
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// Build from a single 64-bit word (high word zero).
    #[inline]
    pub const fn from_low(low: u64) -> Self {
        Self { low, high: 0 }
    }

    /// Add with carry propagation, wrapping modulo 2^128.
    #[inline]
    pub fn wrapping_add(self, rhs: Self) -> Self {
        let low = self.low.wrapping_add(rhs.low);
        let mut high = self.high.wrapping_add(rhs.high);
        if low < self.low {
            high = high.wrapping_add(1);
        }
        Self { low, high }
    }

    /// Multiply, keeping the low 128 bits of the product.
    ///
    /// The cross term is recovered Karatsuba-style from one extra product:
    /// `(a0 + a1)(b0 + b1) - a0*b0 - a1*b1 = a0*b1 + a1*b0`, which holds
    /// modulo 2^64 even when the sums wrap. Only its low word survives the
    /// shift into the high half, so the identity is exactly what we need.
    #[inline]
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let (a0, a1) = (self.low, self.high);
        let (b0, b1) = (rhs.low, rhs.high);

        let (z0_low, z0_high) = widening_mul(a0, b0);
        if a1 == 0 && b1 == 0 {
            return Self::new(z0_low, z0_high);
        }

        let z2 = a1.wrapping_mul(b1);
        let z1 = a0
            .wrapping_add(a1)
            .wrapping_mul(b0.wrapping_add(b1))
            .wrapping_sub(z0_low)
            .wrapping_sub(z2);

        Self::new(z0_low, z0_high.wrapping_add(z1))
    }

    /// Convert to the native 128-bit type.
    #[inline]
    pub const fn to_u128(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }
}

/// Full 64x64 -> 128 multiply, returned as `(low, high)`.
#[inline]
fn widening_mul(a: u64, b: u64) -> (u64, u64) {
    let product = u128::from(a) * u128::from(b);
    (product as u64, (product >> 64) as u64)
}

/// Free-function form of [`Uint128::wrapping_add`].
#[inline]
pub fn add128(a: Uint128, b: Uint128) -> Uint128 {
    a.wrapping_add(b)
}

/// Free-function form of [`Uint128::wrapping_mul`].
#[inline]
pub fn mul128(a: Uint128, b: Uint128) -> Uint128 {
    a.wrapping_mul(b)
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self::new(value as u64, (value >> 64) as u64)
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        value.to_u128()
    }
}

impl From<u64> for Uint128 {
    fn from(value: u64) -> Self {
        Self::from_low(value)
    }
}

impl Add for Uint128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Mul for Uint128 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u128())
    }
}

impl fmt::LowerHex for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_u128(), f)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_carries_into_high_word() {
        let a = Uint128::new(u64::MAX, 0);
        let b = Uint128::new(1, 0);
        assert_eq!(a + b, Uint128::new(0, 1));
    }

    #[test]
    fn test_add_wraps_at_2_128() {
        let max = Uint128::new(u64::MAX, u64::MAX);
        assert_eq!(max + Uint128::from_low(1), Uint128::ZERO);
    }

    #[test]
    fn test_mul_small_operands_keep_high_bits() {
        // Both high words zero: the product still needs its high half.
        let a = Uint128::from_low(u64::MAX);
        let product = a * a;
        assert_eq!(product.to_u128(), u128::from(u64::MAX) * u128::from(u64::MAX));
        assert_eq!(product.high, u64::MAX - 1);
        assert_eq!(product.low, 1);
    }

    #[test]
    fn test_mul_pcg_multiplier() {
        let mult = Uint128::new(0x5851f42d4c957f2d, 0x14057b7ef767814f);
        let state = Uint128::new(0xdead_beef, 0x1234_5678_9abc_def0);
        let expected = state.to_u128().wrapping_mul(mult.to_u128());
        assert_eq!((state * mult).to_u128(), expected);
    }

    #[test]
    fn test_conversions() {
        let v: u128 = 0x0123_4567_89ab_cdef_fedc_ba98_7654_3210;
        let w = Uint128::from(v);
        assert_eq!(w.low, 0xfedc_ba98_7654_3210);
        assert_eq!(w.high, 0x0123_4567_89ab_cdef);
        assert_eq!(u128::from(w), v);
        assert_eq!(format!("{:x}", w), format!("{:x}", v));
    }

    proptest! {
        #[test]
        fn prop_add_matches_native(a: u128, b: u128) {
            let sum = add128(Uint128::from(a), Uint128::from(b));
            prop_assert_eq!(sum.to_u128(), a.wrapping_add(b));
        }

        #[test]
        fn prop_mul_matches_native(a: u128, b: u128) {
            let product = mul128(Uint128::from(a), Uint128::from(b));
            prop_assert_eq!(product.to_u128(), a.wrapping_mul(b));
        }

        #[test]
        fn prop_mul_64bit_operands_match_native(a: u64, b: u64) {
            let product = Uint128::from_low(a) * Uint128::from_low(b);
            prop_assert_eq!(product.to_u128(), u128::from(a) * u128::from(b));
        }
    }
}
