use crate::algebra::{solve_equalities, EngineError, EngineLimits, Poly};
use crate::core::{Solution, SolutionValue, StepResult};
use crate::equations::Equation;
use std::collections::BTreeSet;

/// Solve two or more equations jointly over the union of their unknowns.
///
/// Only the first solution branch is reported. An underdetermined system
/// reports its pivot unknowns in terms of the free ones.
pub fn solve_system_steps(
    equations: &[Equation],
    limits: &EngineLimits,
) -> Result<StepResult, EngineError> {
    let polys = equations
        .iter()
        .map(|eq| eq.moved_to_one_side(limits))
        .collect::<Result<Vec<Poly>, _>>()?;

    let unknowns: Vec<String> = polys
        .iter()
        .flat_map(Poly::variables)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut steps = vec!["System of equations:".to_string()];
    steps.extend(equations.iter().map(ToString::to_string));

    let solutions = solve_equalities(&polys, &unknowns)?;
    let Some(first) = solutions.into_iter().next() else {
        steps.push("The system is inconsistent: no solution".to_string());
        return Ok(StepResult::new(steps, Solution::new()));
    };

    let free: Vec<&str> = unknowns
        .iter()
        .filter(|u| !first.contains_key(*u))
        .map(String::as_str)
        .collect();
    if !free.is_empty() {
        steps.push(format!(
            "The system has infinitely many solutions, parametrized by {}",
            free.join(", ")
        ));
    }

    if first.is_empty() {
        steps.push("Every assignment satisfies the system".to_string());
    } else {
        let rendered: Vec<String> = first
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect();
        steps.push(format!("Solve the system: {}", rendered.join(", ")));
    }

    let solution = first
        .into_iter()
        .map(|(name, value)| (name, SolutionValue::Single(value.to_string())))
        .collect();
    Ok(StepResult::new(steps, solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Vocabulary;
    use crate::equations::parse_equations;
    use pretty_assertions::assert_eq;

    fn run(lines: &[&str]) -> Result<StepResult, EngineError> {
        let parsed = parse_equations(lines, &Vocabulary::default());
        solve_system_steps(&parsed.equations, &EngineLimits::default())
    }

    #[test]
    fn two_by_two_system() {
        let result = run(&["x+y=10", "x-y=2"]).unwrap();
        assert_eq!(
            result.steps,
            vec![
                "System of equations:",
                "x + y = 10",
                "x - y = 2",
                "Solve the system: x = 6, y = 4",
            ]
        );
        assert_eq!(result.solution["x"], SolutionValue::Single("6".into()));
        assert_eq!(result.solution["y"], SolutionValue::Single("4".into()));
    }

    #[test]
    fn inconsistent_system_has_empty_solution() {
        let result = run(&["x+y=1", "x+y=2"]).unwrap();
        assert_eq!(
            result.steps.last().map(String::as_str),
            Some("The system is inconsistent: no solution")
        );
        assert!(result.solution.is_empty());
    }

    #[test]
    fn dependent_system_reports_one_representative() {
        let result = run(&["x+y=10", "2*x+2*y=20"]).unwrap();
        assert_eq!(
            result.steps[3],
            "The system has infinitely many solutions, parametrized by y"
        );
        assert_eq!(result.solution["x"], SolutionValue::Single("-y + 10".into()));
        assert!(!result.solution.contains_key("y"));
    }

    #[test]
    fn unknowns_missing_from_one_equation() {
        let result = run(&["x=3", "x+z=5"]).unwrap();
        assert_eq!(result.solution["x"], SolutionValue::Single("3".into()));
        assert_eq!(result.solution["z"], SolutionValue::Single("2".into()));
    }

    #[test]
    fn constant_identities_satisfy_the_system() {
        let result = run(&["3=3", "4=4"]).unwrap();
        assert_eq!(
            result.steps,
            vec![
                "System of equations:",
                "3 = 3",
                "4 = 4",
                "Every assignment satisfies the system",
            ]
        );
        assert!(result.solution.is_empty());
    }

    #[test]
    fn nonlinear_system_is_an_engine_error() {
        assert!(matches!(
            run(&["x*y=6", "x+y=5"]),
            Err(EngineError::Unsupported(_))
        ));
    }
}
