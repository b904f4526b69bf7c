//! Exact symbolic algebra engine.
//!
//! The rest of the crate treats this module as an opaque capability with two
//! operations:
//!
//! - [`parse_expression`] turns one side of an equation into an [`Expr`] over a
//!   fixed [`Vocabulary`] of unknowns.
//! - [`solve_equalities`] solves a set of `poly = 0` equalities for a set of
//!   unknowns and returns every assignment it found (possibly none).
//!
//! # Architecture
//!
//! - [`Rational`] coefficients with checked `i128` arithmetic
//! - [`Expr`] syntax trees with sympy-style rendering
//! - [`Poly`] multivariate polynomials used for degree analysis and moving
//!   terms to one side
//! - exact quadratic roots ([`quadratic_roots`]) rendered with radicals and `I`
//! - Gauss-Jordan elimination for linear systems
//!
//! Every arithmetic operation is checked: overflow and division by zero come
//! back as [`EngineError`] values instead of panics.

mod elimination;
mod expr;
mod parser;
mod poly;
mod rational;
mod roots;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub use expr::{Expr, ProductOp, SumOp};
pub use parser::{parse_expression, MAX_NESTING};
pub use poly::{Monomial, Poly};
pub use rational::Rational;
pub use roots::{quadratic_roots, Surd};

/// A solution branch: each solved unknown mapped to its value.
///
/// Values are polynomials so that underdetermined systems can express pivot
/// unknowns in terms of the free ones.
pub type Assignment = BTreeMap<String, Poly>;

/// Syntax errors raised while reading a single equation line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line has no '=' separating two sides")]
    MissingEquality,

    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected token '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("numeric literal '{0}' is out of range")]
    NumberOutOfRange(String),

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Failures of the engine itself while simplifying or solving.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("numeric overflow")]
    NumericOverflow,

    #[error("exponent {exponent} exceeds the limit of {limit}")]
    ExponentTooLarge { exponent: String, limit: u32 },

    #[error("expansion exceeds the limit of {limit} terms")]
    TooManyTerms { limit: usize },

    #[error("expression is not a polynomial: {0}")]
    NonPolynomial(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Resource limits applied while expanding expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLimits {
    /// Largest integer exponent `expand` is allowed to multiply out.
    pub max_exponent: u32,
    /// Most terms any intermediate polynomial may hold.
    pub max_terms: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_exponent: 64,
            max_terms: 1024,
        }
    }
}

/// The set of names the parser accepts as unknowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    symbols: BTreeSet<String>,
}

impl Vocabulary {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(["x", "y", "z"])
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Solves `poly = 0` for every poly jointly over `unknowns`.
///
/// Returns an empty vector when the system has no solution and a single
/// assignment otherwise. Only linear systems are supported; a term of degree
/// two or more yields [`EngineError::Unsupported`].
pub fn solve_equalities(
    equalities: &[Poly],
    unknowns: &[String],
) -> Result<Vec<Assignment>, EngineError> {
    if let Some(nonlinear) = equalities.iter().find(|p| p.total_degree() > 1) {
        return Err(EngineError::Unsupported(format!(
            "non-linear system ({nonlinear} = 0)"
        )));
    }
    elimination::solve_linear(equalities, unknowns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(text: &str) -> Poly {
        let vocab = Vocabulary::default();
        let expr = parse_expression(text, &vocab).unwrap();
        Poly::from_expr(&expr, &EngineLimits::default()).unwrap()
    }

    #[test]
    fn solve_equalities_rejects_nonlinear_systems() {
        let err = solve_equalities(&[poly("x*y-6"), poly("x+y-5")], &["x".into(), "y".into()])
            .unwrap_err();
        assert!(matches!(err, EngineError::Unsupported(_)));
    }

    #[test]
    fn solve_equalities_returns_single_assignment() {
        let solutions =
            solve_equalities(&[poly("x+y-10"), poly("x-y-2")], &["x".into(), "y".into()]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0]["x"].to_string(), "6");
        assert_eq!(solutions[0]["y"].to_string(), "4");
    }

    #[test]
    fn vocabulary_display_is_sorted() {
        let vocab = Vocabulary::new(["y", "x"]);
        assert_eq!(vocab.to_string(), "x, y");
        assert!(vocab.contains("x"));
        assert!(!vocab.contains("z"));
    }
}
