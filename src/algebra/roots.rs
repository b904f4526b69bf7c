//! Exact roots of quadratics, rendered with radicals and the imaginary unit.

use super::{EngineError, Rational};
use std::fmt;

// Trial division budget when pulling square factors out of a radicand.
const MAX_TRIAL_DIVISOR: u128 = 1_000_000;

/// A number of the form `rational ± coeff*sqrt(radicand)[*I]`.
///
/// `coeff` is non-negative; `negative` selects the minus branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surd {
    pub rational: Rational,
    pub coeff: Rational,
    pub radicand: u128,
    pub imaginary: bool,
    pub negative: bool,
}

impl Surd {
    fn rational_only(value: Rational) -> Self {
        Self {
            rational: value,
            coeff: Rational::ZERO,
            radicand: 1,
            imaginary: false,
            negative: false,
        }
    }

    fn radical_part(&self) -> String {
        let mut factors = Vec::new();
        if self.coeff.numer() != 1 {
            factors.push(self.coeff.numer().to_string());
        }
        if self.radicand != 1 {
            factors.push(format!("sqrt({})", self.radicand));
        }
        if self.imaginary {
            factors.push("I".to_string());
        }
        let mut out = if factors.is_empty() {
            "1".to_string()
        } else {
            factors.join("*")
        };
        if self.coeff.denom() != 1 {
            out.push_str(&format!("/{}", self.coeff.denom()));
        }
        out
    }
}

impl fmt::Display for Surd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeff.is_zero() {
            return write!(f, "{}", self.rational);
        }
        let sign = if self.negative { "-" } else { "+" };
        if self.rational.is_zero() {
            let lead = if self.negative { "-" } else { "" };
            write!(f, "{lead}{}", self.radical_part())
        } else {
            write!(f, "{} {sign} {}", self.rational, self.radical_part())
        }
    }
}

fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = (n as f64).sqrt() as u128;
    // Correct floating point error in either direction
    while x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).is_some_and(|sq| sq <= n) {
        x += 1;
    }
    x
}

/// Split `n` into `k² · m`, pulling out as much of the square part as the
/// trial-division budget allows.
fn extract_square(n: u128) -> (u128, u128) {
    let mut outside = 1u128;
    let mut inside = n;
    let mut d = 2u128;
    while d <= MAX_TRIAL_DIVISOR && d * d <= inside {
        let square = d * d;
        while inside % square == 0 {
            inside /= square;
            outside *= d;
        }
        d += if d == 2 { 1 } else { 2 };
    }
    let root = isqrt(inside);
    if root * root == inside {
        outside *= root;
        inside = 1;
    }
    (outside, inside)
}

/// Roots of `a*x² + b*x + c` with `a != 0`.
///
/// Returns one root when the discriminant is zero and two otherwise, the
/// minus branch first. Real roots therefore come out in ascending order.
pub fn quadratic_roots(a: Rational, b: Rational, c: Rational) -> Result<Vec<Surd>, EngineError> {
    if a.is_zero() {
        return Err(EngineError::DivisionByZero);
    }
    let two_a = Rational::integer(2).checked_mul(a)?;
    let discriminant = b
        .checked_mul(b)?
        .checked_sub(Rational::integer(4).checked_mul(a)?.checked_mul(c)?)?;
    let vertex = b.checked_neg()?.checked_div(two_a)?;

    if discriminant.is_zero() {
        return Ok(vec![Surd::rational_only(vertex)]);
    }

    // sqrt(p/q) = sqrt(p*q)/q
    let p = discriminant.numer().unsigned_abs();
    let q = discriminant.denom().unsigned_abs();
    let radicand = p.checked_mul(q).ok_or(EngineError::NumericOverflow)?;
    let (outside, inside) = extract_square(radicand);

    let outside = i128::try_from(outside).map_err(|_| EngineError::NumericOverflow)?;
    let q = i128::try_from(q).map_err(|_| EngineError::NumericOverflow)?;
    let coeff = Rational::new(outside, q)?.checked_div(two_a.abs()?)?;
    let imaginary = discriminant.is_negative();

    if inside == 1 && !imaginary {
        return Ok(vec![
            Surd::rational_only(vertex.checked_sub(coeff)?),
            Surd::rational_only(vertex.checked_add(coeff)?),
        ]);
    }

    let branch = |negative| Surd {
        rational: vertex,
        coeff,
        radicand: inside,
        imaginary,
        negative,
    };
    Ok(vec![branch(true), branch(false)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots(a: i128, b: i128, c: i128) -> Vec<String> {
        quadratic_roots(Rational::integer(a), Rational::integer(b), Rational::integer(c))
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn rational_roots_are_ascending() {
        assert_eq!(roots(1, -5, 6), vec!["2", "3"]);
        assert_eq!(roots(-1, 5, -6), vec!["2", "3"]);
    }

    #[test]
    fn repeated_root_is_reported_once() {
        assert_eq!(roots(1, -4, 4), vec!["2"]);
    }

    #[test]
    fn irrational_roots_use_simplified_radicals() {
        assert_eq!(roots(1, 0, -2), vec!["-sqrt(2)", "sqrt(2)"]);
        assert_eq!(roots(1, 0, -8), vec!["-2*sqrt(2)", "2*sqrt(2)"]);
        assert_eq!(roots(1, 1, -1), vec!["-1/2 - sqrt(5)/2", "-1/2 + sqrt(5)/2"]);
    }

    #[test]
    fn complex_roots_use_imaginary_unit() {
        assert_eq!(roots(1, 2, 5), vec!["-1 - 2*I", "-1 + 2*I"]);
        assert_eq!(roots(1, 0, 1), vec!["-I", "I"]);
        assert_eq!(roots(1, 1, 1), vec!["-1/2 - sqrt(3)*I/2", "-1/2 + sqrt(3)*I/2"]);
    }

    #[test]
    fn square_extraction() {
        assert_eq!(extract_square(72), (6, 2));
        assert_eq!(extract_square(49), (7, 1));
        assert_eq!(extract_square(1), (1, 1));
    }
}
