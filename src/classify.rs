//! Structural problem classification.

use crate::algebra::Vocabulary;
use crate::core::ProblemClassification;
use crate::equations::Equation;

/// Classify a problem by the shape of its parsed equations and text.
///
/// Checks run in a fixed order and the first match wins, so two parsable
/// equations are always a system even if either one is quadratic.
pub fn classify(
    normalized: &str,
    equations: &[Equation],
    vocabulary: &Vocabulary,
) -> ProblemClassification {
    if equations.len() >= 2 {
        return ProblemClassification::SystemOfEquations;
    }

    let text: String = normalized
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let squared = vocabulary
        .iter()
        .any(|u| text.contains(&format!("{u}^2")) || text.contains(&format!("{u}**2")));
    if squared {
        return ProblemClassification::QuadraticEquation;
    }

    if text.contains('=') && vocabulary.iter().any(|u| text.contains(u)) {
        return ProblemClassification::LinearEquation;
    }

    ProblemClassification::WordProblem
}
