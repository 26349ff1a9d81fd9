//! BigInt - Fixed-width sign-magnitude arbitrary-precision integer.
//!
//! ============================================================================
//! REPRESENTATION
//! ============================================================================
//!
//! A `BigInt` stores its magnitude as `LIMBS` little-endian `u64` words and
//! its sign separately (sign-magnitude, not two's complement). This mirrors
//! the representation most beginning compiler/interpreter projects reach for
//! when they need integers wider than a machine word but don't want to pull
//! in an arbitrary-length allocation: capacity is fixed, so arithmetic is a
//! simple fixed-length loop with carry/borrow propagation, and overflow past
//! the last limb is a detectable condition rather than silent wraparound.
//!
//! `LIMBS = 6` gives roughly `6 * 64 * log10(2) ≈ 115` decimal digits of
//! range, comfortably covering the "≥100 decimal digits" requirement.
//!
//! ```text
//! magnitude: [w0, w1, w2, w3, w4, w5]   (little-endian: w0 is least significant)
//! sign:      Positive | Negative
//! ```
//!
//! INVARIANTS
//! ----------
//! 1. A zero magnitude always carries `Sign::Positive` after normalization.
//! 2. Every operation preserves the fixed limb width; nothing reallocates.
//! 3. Magnitude overflow out of the top limb is reported, never wrapped.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

/// Number of 64-bit limbs backing a [`BigInt`]; ~115 decimal digits of range.
pub const LIMBS: usize = 6;

/// Errors produced while constructing or converting a [`BigInt`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BigIntError {
    /// A decimal string contained a byte other than an optional leading
    /// sign followed by one or more ASCII digits.
    #[error("invalid integer literal: {input:?}")]
    InvalidLiteral {
        /// The offending input, verbatim.
        input: String,
    },

    /// The magnitude did not fit in [`LIMBS`] limbs.
    #[error("integer literal overflows {LIMBS} limbs", LIMBS = LIMBS)]
    Overflow,
}

/// Sign of a [`BigInt`]. Zero is canonically [`Sign::Positive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn flip(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// A fixed-width signed multiprecision integer in sign-magnitude form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigInt {
    magnitude: [u64; LIMBS],
    sign: Sign,
}

impl BigInt {
    /// The canonical zero value.
    pub fn zero() -> Self {
        Self {
            magnitude: [0; LIMBS],
            sign: Sign::Positive,
        }
    }

    /// Builds a `BigInt` from a native `i64`.
    pub fn from_i64(value: i64) -> Self {
        let mut out = Self::zero();
        if value == 0 {
            return out;
        }
        // i64::MIN has no positive counterpart in i64, so widen via i128
        // before taking the absolute value.
        let (sign, magnitude) = if value < 0 {
            (Sign::Negative, (-(value as i128)) as u128)
        } else {
            (Sign::Positive, value as u128)
        };
        out.magnitude[0] = magnitude as u64;
        out.magnitude[1] = (magnitude >> 64) as u64;
        out.sign = sign;
        out.normalize();
        out
    }

    /// Attempts to narrow this value to an `i64`, failing if the magnitude
    /// does not fit.
    pub fn to_i64(&self) -> Option<i64> {
        for limb in &self.magnitude[2..] {
            if *limb != 0 {
                return None;
            }
        }
        let magnitude = (self.magnitude[1] as u128) << 64 | self.magnitude[0] as u128;
        match self.sign {
            Sign::Positive => {
                if magnitude > i64::MAX as u128 {
                    None
                } else {
                    Some(magnitude as i64)
                }
            }
            Sign::Negative => {
                if magnitude > i64::MAX as u128 + 1 {
                    None
                } else {
                    Some((magnitude as i128).wrapping_neg() as i64)
                }
            }
        }
    }

    /// Is this value the canonical zero?
    pub fn is_zero(&self) -> bool {
        self.magnitude.iter().all(|&limb| limb == 0)
    }

    /// Is this value negative? Zero is never negative.
    pub fn is_negative(&self) -> bool {
        matches!(self.sign, Sign::Negative) && !self.is_zero()
    }

    /// Returns the negation of this value. Negating zero yields zero.
    pub fn negate(&self) -> Self {
        let mut out = *self;
        out.sign = out.sign.flip();
        out.normalize();
        out
    }

    /// Parses a decimal string: optional leading `+`/`-`, then one or more
    /// ASCII decimal digits. Any other byte, or an empty digit run, fails
    /// with [`BigIntError::InvalidLiteral`]; a magnitude too wide for
    /// [`LIMBS`] limbs fails with [`BigIntError::Overflow`].
    pub fn from_decimal_str(input: &str) -> Result<Self, BigIntError> {
        let bytes = input.as_bytes();
        let (sign, digits) = match bytes.first() {
            Some(b'+') => (Sign::Positive, &bytes[1..]),
            Some(b'-') => (Sign::Negative, &bytes[1..]),
            _ => (Sign::Positive, bytes),
        };

        if digits.is_empty() {
            return Err(BigIntError::InvalidLiteral {
                input: input.to_string(),
            });
        }

        let mut out = Self::zero();
        for &byte in digits {
            if !byte.is_ascii_digit() {
                return Err(BigIntError::InvalidLiteral {
                    input: input.to_string(),
                });
            }
            let digit = (byte - b'0') as u64;
            out = out.mul_small(10).ok_or(BigIntError::Overflow)?;
            out = out
                .checked_add_small(digit)
                .ok_or(BigIntError::Overflow)?;
        }
        out.sign = sign;
        out.normalize();
        Ok(out)
    }

    /// Produces the shortest decimal representation: no redundant leading
    /// zeros, `"0"` for zero, and a leading `-` for negative values.
    pub fn to_decimal_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let mut digits = Vec::new();
        let mut remainder = self.magnitude;
        loop {
            let mut carry: u64 = 0;
            for limb in remainder.iter_mut().rev() {
                let cur = ((carry as u128) << 64) | *limb as u128;
                *limb = (cur / 10) as u64;
                carry = (cur % 10) as u64;
            }
            digits.push(b'0' + carry as u8);
            if remainder.iter().all(|&limb| limb == 0) {
                break;
            }
        }

        let mut out = String::with_capacity(digits.len() + 1);
        if self.is_negative() {
            out.push('-');
        }
        out.extend(digits.iter().rev().map(|&b| b as char));
        out
    }

    /// Compares magnitudes only, independent of sign: `-1`, `0`, or `+1`.
    pub fn absolute_compare(a: &BigInt, b: &BigInt) -> Ordering {
        for i in (0..LIMBS).rev() {
            match a.magnitude[i].cmp(&b.magnitude[i]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Magnitude addition with carry propagation through every limb;
    /// returns `None` on overflow out of the top limb.
    pub fn absolute_add(a: &BigInt, b: &BigInt) -> Option<[u64; LIMBS]> {
        let mut result = [0u64; LIMBS];
        let mut carry: u128 = 0;
        for i in 0..LIMBS {
            let sum = a.magnitude[i] as u128 + b.magnitude[i] as u128 + carry;
            result[i] = sum as u64;
            carry = sum >> 64;
        }
        if carry != 0 {
            None
        } else {
            Some(result)
        }
    }

    /// Magnitude subtraction with borrow; precondition `|a| >= |b|`.
    pub fn absolute_sub(a: &BigInt, b: &BigInt) -> [u64; LIMBS] {
        debug_assert_ne!(Self::absolute_compare(a, b), Ordering::Less);
        let mut result = [0u64; LIMBS];
        let mut borrow: i128 = 0;
        for i in 0..LIMBS {
            let diff = a.magnitude[i] as i128 - b.magnitude[i] as i128 - borrow;
            if diff < 0 {
                result[i] = (diff + (1i128 << 64)) as u64;
                borrow = 1;
            } else {
                result[i] = diff as u64;
                borrow = 0;
            }
        }
        result
    }

    /// Signed addition. Same-signed operands add magnitudes and keep the
    /// shared sign; differently-signed operands subtract the smaller
    /// magnitude from the larger and take the larger's sign.
    pub fn signed_add(a: &BigInt, b: &BigInt) -> Result<BigInt, BigIntError> {
        let mut out = if a.sign == b.sign {
            let magnitude = Self::absolute_add(a, b).ok_or(BigIntError::Overflow)?;
            BigInt {
                magnitude,
                sign: a.sign,
            }
        } else {
            match Self::absolute_compare(a, b) {
                Ordering::Less => BigInt {
                    magnitude: Self::absolute_sub(b, a),
                    sign: b.sign,
                },
                _ => BigInt {
                    magnitude: Self::absolute_sub(a, b),
                    sign: a.sign,
                },
            }
        };
        out.normalize();
        Ok(out)
    }

    /// `a - b`, defined as `a + (-b)`.
    pub fn signed_sub(a: &BigInt, b: &BigInt) -> Result<BigInt, BigIntError> {
        Self::signed_add(a, &b.negate())
    }

    /// Forces the sign to `Positive` whenever the magnitude is zero.
    fn normalize(&mut self) {
        if self.is_zero() {
            self.sign = Sign::Positive;
        }
    }

    fn mul_small(&self, factor: u64) -> Option<Self> {
        let mut result = [0u64; LIMBS];
        let mut carry: u128 = 0;
        for i in 0..LIMBS {
            let product = self.magnitude[i] as u128 * factor as u128 + carry;
            result[i] = product as u64;
            carry = product >> 64;
        }
        if carry != 0 {
            return None;
        }
        Some(BigInt {
            magnitude: result,
            sign: self.sign,
        })
    }

    fn checked_add_small(&self, addend: u64) -> Option<Self> {
        let mut result = self.magnitude;
        let mut carry = addend as u128;
        for limb in result.iter_mut() {
            if carry == 0 {
                break;
            }
            let sum = *limb as u128 + carry;
            *limb = sum as u64;
            carry = sum >> 64;
        }
        if carry != 0 {
            return None;
        }
        Some(BigInt {
            magnitude: result,
            sign: self.sign,
        })
    }
}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (Sign::Positive, Sign::Positive) => Self::absolute_compare(self, other),
            (Sign::Negative, Sign::Negative) => Self::absolute_compare(other, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_positive() {
        let z = BigInt::zero();
        assert!(!z.is_negative());
        assert_eq!(z.to_decimal_string(), "0");
    }

    #[test]
    fn round_trip_simple() {
        for s in ["0", "7", "-7", "123456789012345678901234567890"] {
            let n = BigInt::from_decimal_str(s).unwrap();
            assert_eq!(n.to_decimal_string(), s);
        }
    }

    #[test]
    fn leading_zeros_and_plus_canonicalize() {
        let a = BigInt::from_decimal_str("000123").unwrap();
        let b = BigInt::from_decimal_str("+123").unwrap();
        let c = BigInt::from_decimal_str("123").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.to_decimal_string(), "123");
    }

    #[test]
    fn invalid_literal_rejected() {
        assert!(matches!(
            BigInt::from_decimal_str("12a"),
            Err(BigIntError::InvalidLiteral { .. })
        ));
        assert!(matches!(
            BigInt::from_decimal_str(""),
            Err(BigIntError::InvalidLiteral { .. })
        ));
        assert!(matches!(
            BigInt::from_decimal_str("-"),
            Err(BigIntError::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn overflow_detected() {
        let too_big = "9".repeat(200);
        assert!(matches!(
            BigInt::from_decimal_str(&too_big),
            Err(BigIntError::Overflow)
        ));
    }

    #[test]
    fn signed_add_of_negation_is_zero() {
        let a = BigInt::from_decimal_str("98765").unwrap();
        let sum = BigInt::signed_add(&a, &a.negate()).unwrap();
        assert!(sum.is_zero());
        assert!(!sum.is_negative());
    }

    #[test]
    fn signed_sub_matches_add_of_negation() {
        let a = BigInt::from_decimal_str("42").unwrap();
        let b = BigInt::from_decimal_str("-17").unwrap();
        assert_eq!(
            BigInt::signed_sub(&a, &b).unwrap(),
            BigInt::signed_add(&a, &b.negate()).unwrap()
        );
    }

    #[test]
    fn absolute_compare_is_antisymmetric() {
        let a = BigInt::from_decimal_str("100").unwrap();
        let b = BigInt::from_decimal_str("-200").unwrap();
        let forward = BigInt::absolute_compare(&a, &b);
        let backward = BigInt::absolute_compare(&b, &a);
        assert_eq!(forward.reverse(), backward);
    }

    #[test]
    fn eighty_digit_round_trip() {
        let digits = "13".repeat(40);
        let n = BigInt::from_decimal_str(&digits).unwrap();
        assert_eq!(n.to_decimal_string(), digits);
    }

    #[test]
    fn native_round_trip() {
        for v in [0i64, 1, -1, i64::MAX, i64::MIN, 123456789] {
            let n = BigInt::from_i64(v);
            assert_eq!(n.to_i64(), Some(v));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_decimal() -> impl Strategy<Value = String> {
        (proptest::option::of(prop_oneof![Just('+'), Just('-')]), "[0-9]{1,30}").prop_map(
            |(sign, digits)| match sign {
                Some(s) => format!("{s}{digits}"),
                None => digits,
            },
        )
    }

    proptest! {
        #[test]
        fn decimal_round_trip(s in arb_decimal()) {
            let n = BigInt::from_decimal_str(&s).unwrap();
            let back = BigInt::from_decimal_str(&n.to_decimal_string()).unwrap();
            prop_assert_eq!(n, back);
        }

        #[test]
        fn signed_sub_is_add_of_negation(a in arb_decimal(), b in arb_decimal()) {
            let a = BigInt::from_decimal_str(&a).unwrap();
            let b = BigInt::from_decimal_str(&b).unwrap();
            prop_assert_eq!(
                BigInt::signed_sub(&a, &b).unwrap(),
                BigInt::signed_add(&a, &b.negate()).unwrap()
            );
        }
    }
}
