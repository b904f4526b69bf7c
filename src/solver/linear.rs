use crate::algebra::{EngineError, Poly};
use crate::core::{Solution, SolutionValue, StepResult};
use crate::equations::Equation;

/// Solve a degree-one equation in `unknown`.
///
/// `moved` is `lhs - rhs`; its only unknown must be `unknown`.
pub fn solve_linear_steps(
    equation: &Equation,
    moved: &Poly,
    unknown: &str,
) -> Result<StepResult, EngineError> {
    let slope = moved.coeff(unknown, 1);
    let intercept = moved.constant_term();
    let value = intercept.checked_neg()?.checked_div(slope)?;

    let steps = vec![
        format!("Original equation: {equation}"),
        format!("Move all terms to one side: {moved} = 0"),
        format!("Solve for {unknown}: {unknown} = {value}"),
    ];
    let solution = Solution::from([(unknown.to_string(), SolutionValue::Single(value.to_string()))]);

    Ok(StepResult::new(steps, solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{EngineLimits, Vocabulary};
    use crate::equations::parse_equation;
    use pretty_assertions::assert_eq;

    fn run(line: &str) -> StepResult {
        let eq = parse_equation(line, &Vocabulary::default()).unwrap();
        let moved = eq.moved_to_one_side(&EngineLimits::default()).unwrap();
        let unknown = moved.variables().into_iter().next().unwrap();
        solve_linear_steps(&eq, &moved, &unknown).unwrap()
    }

    #[test]
    fn produces_three_steps() {
        let result = run("2*x+3=7");
        assert_eq!(
            result.steps,
            vec![
                "Original equation: 2*x + 3 = 7",
                "Move all terms to one side: 2*x - 4 = 0",
                "Solve for x: x = 2",
            ]
        );
        assert_eq!(result.solution["x"], SolutionValue::Single("2".into()));
    }

    #[test]
    fn fractional_answers_stay_exact() {
        let result = run("2*y=7");
        assert_eq!(result.solution["y"], SolutionValue::Single("7/2".into()));
    }

    #[test]
    fn unknown_on_both_sides() {
        let result = run("5*x-3=2*x+9");
        assert_eq!(result.steps[1], "Move all terms to one side: 3*x - 12 = 0");
        assert_eq!(result.solution["x"], SolutionValue::Single("4".into()));
    }

    #[test]
    fn decimal_coefficients() {
        let result = run("0.5*x=1.25");
        assert_eq!(result.solution["x"], SolutionValue::Single("5/2".into()));
    }
}
