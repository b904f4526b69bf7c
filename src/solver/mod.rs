//! Step-generating solvers.
//!
//! [`solve`] picks a solver from the number of equations and, for a single
//! equation, the degree of `lhs - rhs`:
//!
//! | equations | degree | solver |
//! |-----------|--------|--------|
//! | 0 | - | unrecognized |
//! | 1 | 1 | [`linear`] |
//! | 1 | 2 | [`quadratic`] |
//! | 1 | other, or not a polynomial in one unknown | unrecognized |
//! | 2+ | - | [`system`] |

pub mod linear;
pub mod quadratic;
pub mod system;

use crate::algebra::{EngineError, EngineLimits};
use crate::core::StepResult;
use crate::equations::Equation;
use tracing::debug;

/// Step emitted when no solver applies.
pub const UNRECOGNIZED: &str = "no recognizable problem form";

fn unrecognized() -> StepResult {
    StepResult::new(vec![UNRECOGNIZED.to_string()], Default::default())
}

/// Dispatch `equations` to the matching solver.
///
/// Engine failures are returned as errors; unsupported shapes are not errors
/// and produce the unrecognized result.
pub fn solve(equations: &[Equation], limits: &EngineLimits) -> Result<StepResult, EngineError> {
    match equations {
        [] => Ok(unrecognized()),
        [single] => solve_single(single, limits),
        many => system::solve_system_steps(many, limits),
    }
}

fn solve_single(equation: &Equation, limits: &EngineLimits) -> Result<StepResult, EngineError> {
    let moved = match equation.moved_to_one_side(limits) {
        Ok(poly) => poly,
        Err(EngineError::NonPolynomial(expr)) => {
            debug!(%expr, "single equation is not polynomial");
            return Ok(unrecognized());
        }
        Err(err) => return Err(err),
    };

    let unknowns = moved.variables();
    let Some(unknown) = unknowns.iter().next().filter(|_| unknowns.len() == 1) else {
        debug!(count = unknowns.len(), "single equation needs exactly one unknown");
        return Ok(unrecognized());
    };

    match moved.total_degree() {
        1 => linear::solve_linear_steps(equation, &moved, unknown),
        2 => quadratic::solve_quadratic_steps(&moved, unknown),
        degree => {
            debug!(degree, "no solver for this degree");
            Ok(unrecognized())
        }
    }
}
