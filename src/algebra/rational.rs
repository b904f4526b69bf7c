//! Exact rational coefficients.
//!
//! Every operation is checked and reports overflow instead of wrapping, so a
//! hostile input can only ever produce an [`EngineError`].

use super::EngineError;
use std::cmp::Ordering;
use std::fmt;

/// Greatest common divisor using the Euclidean algorithm
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// An exact rational number.
///
/// Invariant: `den > 0` and `gcd(|num|, den) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i128,
    den: i128,
}

impl Rational {
    pub const ZERO: Rational = Rational { num: 0, den: 1 };
    pub const ONE: Rational = Rational { num: 1, den: 1 };

    pub const fn integer(n: i128) -> Self {
        Self { num: n, den: 1 }
    }

    /// Create a rational, reducing it to lowest terms.
    pub fn new(num: i128, den: i128) -> Result<Self, EngineError> {
        if den == 0 {
            return Err(EngineError::DivisionByZero);
        }
        let (num, den) = if den < 0 {
            (
                num.checked_neg().ok_or(EngineError::NumericOverflow)?,
                den.checked_neg().ok_or(EngineError::NumericOverflow)?,
            )
        } else {
            (num, den)
        };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs());
        // g divides den, and den fits in i128, so g does too
        let g = g as i128;
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    /// Parse an unsigned decimal literal such as `12`, `0.5` or `3.`.
    pub fn from_decimal(literal: &str) -> Result<Self, EngineError> {
        let (whole, frac) = literal.split_once('.').unwrap_or((literal, ""));
        let digits = format!("{whole}{frac}");
        let num = digits
            .parse::<i128>()
            .map_err(|_| EngineError::NumericOverflow)?;
        let den = 10i128
            .checked_pow(frac.len() as u32)
            .ok_or(EngineError::NumericOverflow)?;
        Self::new(num, den)
    }

    pub fn numer(&self) -> i128 {
        self.num
    }

    pub fn denom(&self) -> i128 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    /// Sign of the value: `Less` for negative, `Equal` for zero, `Greater` for
    /// positive.
    pub fn sign(&self) -> Ordering {
        self.num.cmp(&0)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, EngineError> {
        let num = self
            .num
            .checked_mul(rhs.den)
            .and_then(|a| rhs.num.checked_mul(self.den).and_then(|b| a.checked_add(b)))
            .ok_or(EngineError::NumericOverflow)?;
        let den = self
            .den
            .checked_mul(rhs.den)
            .ok_or(EngineError::NumericOverflow)?;
        Self::new(num, den)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, EngineError> {
        self.checked_add(rhs.checked_neg()?)
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self, EngineError> {
        // Cross-reduce first to keep intermediates small
        let g1 = gcd(self.num.unsigned_abs(), rhs.den.unsigned_abs()).max(1) as i128;
        let g2 = gcd(rhs.num.unsigned_abs(), self.den.unsigned_abs()).max(1) as i128;
        let num = (self.num / g1)
            .checked_mul(rhs.num / g2)
            .ok_or(EngineError::NumericOverflow)?;
        let den = (self.den / g2)
            .checked_mul(rhs.den / g1)
            .ok_or(EngineError::NumericOverflow)?;
        Self::new(num, den)
    }

    pub fn checked_div(self, rhs: Self) -> Result<Self, EngineError> {
        self.checked_mul(rhs.recip()?)
    }

    pub fn checked_neg(self) -> Result<Self, EngineError> {
        Ok(Self {
            num: self.num.checked_neg().ok_or(EngineError::NumericOverflow)?,
            den: self.den,
        })
    }

    pub fn recip(self) -> Result<Self, EngineError> {
        Self::new(self.den, self.num)
    }

    pub fn abs(self) -> Result<Self, EngineError> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Raise to an integer power; negative exponents take the reciprocal.
    pub fn checked_pow(self, exp: i64) -> Result<Self, EngineError> {
        let base = if exp < 0 { self.recip()? } else { self };
        let exp = u32::try_from(exp.unsigned_abs()).map_err(|_| EngineError::NumericOverflow)?;
        let num = base
            .num
            .checked_pow(exp)
            .ok_or(EngineError::NumericOverflow)?;
        let den = base
            .den
            .checked_pow(exp)
            .ok_or(EngineError::NumericOverflow)?;
        Self::new(num, den)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
