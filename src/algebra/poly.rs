//! Multivariate polynomials with exact rational coefficients.

use super::expr::{ProductOp, SumOp};
use super::{EngineError, EngineLimits, Expr, Rational};
use std::cmp::{Ordering, Reverse};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Variables with their (positive) exponents. The empty monomial is the
/// constant term.
pub type Monomial = BTreeMap<String, u32>;

/// A polynomial in canonical form: no zero coefficients are stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Poly {
    terms: BTreeMap<Monomial, Rational>,
}

fn monomial_degree(monomial: &Monomial) -> u32 {
    monomial.values().sum()
}

impl Poly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: Rational) -> Self {
        let mut poly = Self::zero();
        poly.add_term(Monomial::new(), value);
        poly
    }

    pub fn variable(name: impl Into<String>) -> Self {
        let mut monomial = Monomial::new();
        monomial.insert(name.into(), 1);
        let mut poly = Self::zero();
        poly.add_term(monomial, Rational::ONE);
        poly
    }

    fn add_term(&mut self, monomial: Monomial, coeff: Rational) {
        if !coeff.is_zero() {
            self.terms.insert(monomial, coeff);
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The value of a polynomial with no variables.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::ZERO),
            1 => self.terms.get(&Monomial::new()).copied(),
            _ => None,
        }
    }

    /// Highest total degree among the terms; zero for constants.
    pub fn total_degree(&self) -> u32 {
        self.terms.keys().map(monomial_degree).max().unwrap_or(0)
    }

    /// Every variable with a non-zero coefficient somewhere.
    pub fn variables(&self) -> BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|m| m.keys().cloned())
            .collect()
    }

    /// Coefficient of `var^degree` in a univariate polynomial. Terms that
    /// involve other variables are ignored.
    pub fn coeff(&self, var: &str, degree: u32) -> Rational {
        let mut monomial = Monomial::new();
        if degree > 0 {
            monomial.insert(var.to_string(), degree);
        }
        self.terms.get(&monomial).copied().unwrap_or(Rational::ZERO)
    }

    pub fn constant_term(&self) -> Rational {
        self.terms
            .get(&Monomial::new())
            .copied()
            .unwrap_or(Rational::ZERO)
    }

    /// Add `coeff * monomial` in place, dropping the term if it cancels.
    fn accumulate(&mut self, monomial: Monomial, coeff: Rational) -> Result<(), EngineError> {
        match self.terms.entry(monomial) {
            Entry::Vacant(slot) => {
                if !coeff.is_zero() {
                    slot.insert(coeff);
                }
            }
            Entry::Occupied(mut slot) => {
                let sum = slot.get().checked_add(coeff)?;
                if sum.is_zero() {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
        }
        Ok(())
    }

    fn add_assign(&mut self, rhs: &Poly, negate: bool) -> Result<(), EngineError> {
        for (monomial, coeff) in &rhs.terms {
            let coeff = if negate { coeff.checked_neg()? } else { *coeff };
            self.accumulate(monomial.clone(), coeff)?;
        }
        Ok(())
    }

    pub fn checked_neg(&self) -> Result<Poly, EngineError> {
        let mut out = Poly::zero();
        for (monomial, coeff) in &self.terms {
            out.add_term(monomial.clone(), coeff.checked_neg()?);
        }
        Ok(out)
    }

    pub fn checked_sub(&self, rhs: &Poly) -> Result<Poly, EngineError> {
        let mut out = self.clone();
        out.add_assign(rhs, true)?;
        Ok(out)
    }

    /// Product of two polynomials. Fails with [`EngineError::TooManyTerms`]
    /// as soon as the partial result outgrows `limits.max_terms`.
    pub fn checked_mul(&self, rhs: &Poly, limits: &EngineLimits) -> Result<Poly, EngineError> {
        let mut out = Poly::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &rhs.terms {
                let mut monomial = m1.clone();
                for (var, exp) in m2 {
                    let entry = monomial.entry(var.clone()).or_insert(0);
                    *entry = entry.checked_add(*exp).ok_or(EngineError::NumericOverflow)?;
                }
                out.accumulate(monomial, c1.checked_mul(*c2)?)?;
                if out.terms.len() > limits.max_terms {
                    return Err(EngineError::TooManyTerms {
                        limit: limits.max_terms,
                    });
                }
            }
        }
        Ok(out)
    }

    pub fn scale(&self, factor: Rational) -> Result<Poly, EngineError> {
        let mut out = Poly::zero();
        for (monomial, coeff) in &self.terms {
            out.add_term(monomial.clone(), coeff.checked_mul(factor)?);
        }
        Ok(out)
    }

    pub fn checked_pow(&self, exp: u32, limits: &EngineLimits) -> Result<Poly, EngineError> {
        let mut result = Poly::constant(Rational::ONE);
        let mut base = self.clone();
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.checked_mul(&base, limits)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(&base, limits)?;
            }
        }
        Ok(result)
    }

    /// Expand an expression into canonical polynomial form.
    ///
    /// Division is only allowed by non-zero constants and exponents must be
    /// constant integers; anything else is [`EngineError::NonPolynomial`].
    pub fn from_expr(expr: &Expr, limits: &EngineLimits) -> Result<Poly, EngineError> {
        match expr {
            Expr::Number(n) => Ok(Poly::constant(*n)),
            Expr::Symbol(name) => Ok(Poly::variable(name.clone())),
            Expr::Neg(inner) => Poly::from_expr(inner, limits)?.checked_neg(),
            Expr::Sum(first, rest) => {
                let mut acc = Poly::from_expr(first, limits)?;
                for (op, operand) in rest {
                    let operand = Poly::from_expr(operand, limits)?;
                    acc.add_assign(&operand, *op == SumOp::Minus)?;
                    if acc.terms.len() > limits.max_terms {
                        return Err(EngineError::TooManyTerms {
                            limit: limits.max_terms,
                        });
                    }
                }
                Ok(acc)
            }
            Expr::Product(first, rest) => {
                let mut acc = Poly::from_expr(first, limits)?;
                for (op, operand) in rest {
                    let operand = Poly::from_expr(operand, limits)?;
                    acc = match op {
                        ProductOp::Times => acc.checked_mul(&operand, limits)?,
                        ProductOp::Over => match operand.as_constant() {
                            Some(c) if c.is_zero() => return Err(EngineError::DivisionByZero),
                            Some(c) => acc.scale(c.recip()?)?,
                            None => return Err(EngineError::NonPolynomial(expr.to_string())),
                        },
                    };
                }
                Ok(acc)
            }
            Expr::Pow(base, exp) => {
                let base_poly = Poly::from_expr(base, limits)?;
                let exponent = Poly::from_expr(exp, limits)?
                    .as_constant()
                    .filter(Rational::is_integer)
                    .ok_or_else(|| EngineError::NonPolynomial(expr.to_string()))?;

                if exponent.numer().unsigned_abs() > u128::from(limits.max_exponent) {
                    return Err(EngineError::ExponentTooLarge {
                        exponent: exponent.to_string(),
                        limit: limits.max_exponent,
                    });
                }
                // Bounded by max_exponent above
                let power = exponent.numer() as i64;

                if power >= 0 {
                    return base_poly.checked_pow(power as u32, limits);
                }
                match base_poly.as_constant() {
                    Some(c) => Ok(Poly::constant(c.checked_pow(power)?)),
                    None => Err(EngineError::NonPolynomial(expr.to_string())),
                }
            }
        }
    }

    /// Order terms for display: higher total degree first, then earlier
    /// variables with higher powers first.
    fn display_order(&self) -> Vec<(&Monomial, &Rational)> {
        let vars = self.variables();
        let mut terms: Vec<_> = self.terms.iter().collect();
        terms.sort_by(|(a, _), (b, _)| {
            Reverse(monomial_degree(a))
                .cmp(&Reverse(monomial_degree(b)))
                .then_with(|| {
                    vars.iter()
                        .map(|v| {
                            let ea = a.get(v).copied().unwrap_or(0);
                            let eb = b.get(v).copied().unwrap_or(0);
                            eb.cmp(&ea)
                        })
                        .find(|o| *o != Ordering::Equal)
                        .unwrap_or(Ordering::Equal)
                })
        });
        terms
    }
}

fn render_monomial(monomial: &Monomial) -> String {
    monomial
        .iter()
        .map(|(var, exp)| {
            if *exp == 1 {
                var.clone()
            } else {
                format!("{var}**{exp}")
            }
        })
        .collect::<Vec<_>>()
        .join("*")
}

/// Render a term with a non-negative coefficient, sympy style: `3*x/2`.
fn render_term(monomial: &Monomial, magnitude_num: u128, magnitude_den: u128) -> String {
    if monomial.is_empty() {
        return if magnitude_den == 1 {
            magnitude_num.to_string()
        } else {
            format!("{magnitude_num}/{magnitude_den}")
        };
    }
    let mut out = String::new();
    if magnitude_num != 1 {
        out.push_str(&format!("{magnitude_num}*"));
    }
    out.push_str(&render_monomial(monomial));
    if magnitude_den != 1 {
        out.push_str(&format!("/{magnitude_den}"));
    }
    out
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (monomial, coeff)) in self.display_order().into_iter().enumerate() {
            let term = render_term(
                monomial,
                coeff.numer().unsigned_abs(),
                coeff.denom().unsigned_abs(),
            );
            match (i, coeff.is_negative()) {
                (0, true) => write!(f, "-{term}")?,
                (0, false) => write!(f, "{term}")?,
                (_, true) => write!(f, " - {term}")?,
                (_, false) => write!(f, " + {term}")?,
            }
        }
        Ok(())
    }
}
