use crate::algebra::{quadratic_roots, EngineError, Poly, Rational};
use crate::core::{Solution, SolutionValue, StepResult};
use std::cmp::Ordering;

/// Solve a degree-two equation in `unknown` through the discriminant.
///
/// The solution is always a list, even for a repeated root. A negative
/// discriminant still reports the complex roots.
pub fn solve_quadratic_steps(moved: &Poly, unknown: &str) -> Result<StepResult, EngineError> {
    let a = moved.coeff(unknown, 2);
    let b = moved.coeff(unknown, 1);
    let c = moved.coeff(unknown, 0);
    let delta = b
        .checked_mul(b)?
        .checked_sub(Rational::integer(4).checked_mul(a)?.checked_mul(c)?)?;

    let mut steps = vec![
        format!("Equation: {moved} = 0"),
        format!("Coefficients: a = {a}, b = {b}, c = {c}"),
        format!("Discriminant: Δ = b² - 4ac = {delta}"),
    ];

    let roots: Vec<String> = quadratic_roots(a, b, c)?
        .iter()
        .map(ToString::to_string)
        .collect();

    match delta.sign() {
        Ordering::Less => steps.push("Δ < 0: the equation has no real roots".to_string()),
        Ordering::Equal => steps.push(format!(
            "Δ = 0: the equation has a repeated root {unknown} = {}",
            roots[0]
        )),
        Ordering::Greater => steps.push(format!(
            "Δ > 0: the equation has two distinct roots {unknown}1 = {}, {unknown}2 = {}",
            roots[0], roots[1]
        )),
    }

    let solution = Solution::from([(unknown.to_string(), SolutionValue::Many(roots))]);
    Ok(StepResult::new(steps, solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{parse_expression, EngineLimits, Vocabulary};
    use pretty_assertions::assert_eq;

    fn run(expr: &str) -> StepResult {
        let parsed = parse_expression(expr, &Vocabulary::default()).unwrap();
        let moved = Poly::from_expr(&parsed, &EngineLimits::default()).unwrap();
        solve_quadratic_steps(&moved, "x").unwrap()
    }

    fn roots(result: &StepResult) -> Vec<String> {
        match &result.solution["x"] {
            SolutionValue::Many(values) => values.clone(),
            other => panic!("expected root list, got {other:?}"),
        }
    }

    #[test]
    fn two_distinct_roots() {
        let result = run("x**2-5*x+6");
        assert_eq!(
            result.steps,
            vec![
                "Equation: x**2 - 5*x + 6 = 0",
                "Coefficients: a = 1, b = -5, c = 6",
                "Discriminant: Δ = b² - 4ac = 1",
                "Δ > 0: the equation has two distinct roots x1 = 2, x2 = 3",
            ]
        );
        assert_eq!(roots(&result), vec!["2", "3"]);
    }

    #[test]
    fn repeated_root_is_a_single_element_list() {
        let result = run("x**2-4*x+4");
        assert_eq!(result.steps[2], "Discriminant: Δ = b² - 4ac = 0");
        assert_eq!(
            result.steps[3],
            "Δ = 0: the equation has a repeated root x = 2"
        );
        assert_eq!(roots(&result), vec!["2"]);
    }

    #[test]
    fn negative_discriminant_reports_complex_roots() {
        let result = run("x**2+2*x+5");
        assert_eq!(result.steps[2], "Discriminant: Δ = b² - 4ac = -16");
        assert_eq!(result.steps[3], "Δ < 0: the equation has no real roots");
        assert_eq!(roots(&result), vec!["-1 - 2*I", "-1 + 2*I"]);
    }

    #[test]
    fn irrational_roots() {
        let result = run("x**2-2");
        assert_eq!(roots(&result), vec!["-sqrt(2)", "sqrt(2)"]);
    }

    #[test]
    fn leading_coefficient_other_than_one() {
        let result = run("2*x**2-3*x-2");
        assert_eq!(result.steps[1], "Coefficients: a = 2, b = -3, c = -2");
        assert_eq!(roots(&result), vec!["-1/2", "2"]);
    }
}
