//! Turns reconstructed lines into symbolic equations.
//!
//! Each line is parsed in isolation. A line that fails is recorded as a
//! [`RejectedLine`] with its reason and never affects its neighbours.

use crate::algebra::{parse_expression, EngineError, EngineLimits, Expr, ParseError, Poly, Vocabulary};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// An equality between two expressions over the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    source: String,
    lhs: Expr,
    rhs: Expr,
}

impl Equation {
    pub fn new(source: impl Into<String>, lhs: Expr, rhs: Expr) -> Self {
        Self {
            source: source.into(),
            lhs,
            rhs,
        }
    }

    /// The reconstructed line this equation was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// `lhs - rhs` expanded into canonical polynomial form.
    pub fn moved_to_one_side(&self, limits: &EngineLimits) -> Result<Poly, EngineError> {
        Poly::from_expr(&Expr::sub(self.lhs.clone(), self.rhs.clone()), limits)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// A line that could not be read as an equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedLine {
    pub line: String,
    #[serde(serialize_with = "crate::core::serialize_display")]
    pub reason: ParseError,
}

/// Outcome of parsing a batch of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEquations {
    pub equations: Vec<Equation>,
    pub rejected: Vec<RejectedLine>,
}

/// Parse a single `lhs=rhs` line, splitting on the first `=`.
pub fn parse_equation(line: &str, vocabulary: &Vocabulary) -> Result<Equation, ParseError> {
    let (left, right) = line.split_once('=').ok_or(ParseError::MissingEquality)?;
    let lhs = parse_expression(left, vocabulary)?;
    let rhs = parse_expression(right, vocabulary)?;
    Ok(Equation::new(line, lhs, rhs))
}

/// Parse every line independently, keeping input order.
pub fn parse_equations<S: AsRef<str>>(lines: &[S], vocabulary: &Vocabulary) -> ParsedEquations {
    let mut parsed = ParsedEquations::default();
    for line in lines.iter().map(AsRef::as_ref) {
        match parse_equation(line, vocabulary) {
            Ok(equation) => parsed.equations.push(equation),
            Err(reason) => {
                debug!(line, %reason, "dropping unparsable line");
                parsed.rejected.push(RejectedLine {
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }
    parsed
}
