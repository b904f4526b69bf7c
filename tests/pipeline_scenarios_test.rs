//! End-to-end scenarios through `Pipeline::solve_problem`.

use pretty_assertions::assert_eq;
use serde_json::json;
use stepwise::core::{ERROR_KEY, MESSAGE_KEY};
use stepwise::pipeline::NO_EQUATIONS;
use stepwise::solver::UNRECOGNIZED;
use stepwise::algebra::MAX_NESTING;
use stepwise::{EngineError, Pipeline, ParseError, ProblemClassification, SolutionValue};

fn single(value: &str) -> SolutionValue {
    SolutionValue::Single(value.to_string())
}

fn many(values: &[&str]) -> SolutionValue {
    SolutionValue::Many(values.iter().map(|v| v.to_string()).collect())
}

#[test]
fn linear_equation_from_ocr_text() {
    let report = Pipeline::default().solve_problem("2x + 3 = 7");

    assert_eq!(report.classification, ProblemClassification::LinearEquation);
    assert_eq!(
        report.steps,
        vec![
            "Original equation: 2*x + 3 = 7",
            "Move all terms to one side: 2*x - 4 = 0",
            "Solve for x: x = 2",
        ]
    );
    assert_eq!(report.solution["x"], single("2"));
}

#[test]
fn quadratic_with_two_roots() {
    let report = Pipeline::default().solve_problem("x**2-5*x+6=0");

    assert_eq!(
        report.classification,
        ProblemClassification::QuadraticEquation
    );
    assert_eq!(report.steps[2], "Discriminant: Δ = b² - 4ac = 1");
    assert_eq!(report.solution["x"], many(&["2", "3"]));
}

#[test]
fn quadratic_with_repeated_root() {
    let report = Pipeline::default().solve_problem("x^2 - 4x + 4 = 0");

    assert_eq!(
        report.classification,
        ProblemClassification::QuadraticEquation
    );
    assert_eq!(report.steps[2], "Discriminant: Δ = b² - 4ac = 0");
    assert_eq!(report.solution["x"], many(&["2"]));
}

#[test]
fn quadratic_from_superscript_glyph() {
    let report = Pipeline::default().solve_problem("x² − 9 = 0");

    assert_eq!(report.normalized, "x**2-9=0");
    assert_eq!(report.solution["x"], many(&["-3", "3"]));
}

#[test]
fn two_line_system() {
    let report = Pipeline::default().solve_problem("x + y = 10\nx - y = 2");

    assert_eq!(
        report.classification,
        ProblemClassification::SystemOfEquations
    );
    assert_eq!(report.parsed, vec!["x+y=10", "x-y=2"]);
    assert_eq!(report.solution["x"], single("6"));
    assert_eq!(report.solution["y"], single("4"));
}

#[test]
fn two_parsable_equations_are_always_a_system() {
    let report = Pipeline::default().solve_problem("x**2 = 4\nx + 1 = 3");
    assert_eq!(
        report.classification,
        ProblemClassification::SystemOfEquations
    );
}

#[test]
fn fragmented_ocr_lines_are_rejoined() {
    let report = Pipeline::default().solve_problem("2x +\n3x\n14");

    // "2*x+" and "3*x" join, then the bare "14" completes the pending side
    assert_eq!(report.parsed, vec!["2*x+3*x=14"]);
    assert_eq!(report.solution["x"], single("14/5"));

    let report = Pipeline::default().solve_problem("2x + 3\n7");
    assert_eq!(report.parsed, vec!["2*x+3=7"]);
    assert_eq!(report.solution["x"], single("2"));
}

#[test]
fn garbage_line_is_isolated() {
    let report = Pipeline::default().solve_problem("2x + 3 = 7\n@#$ = %");

    assert_eq!(report.parsed, vec!["2*x+3=7"]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, "@#$=%");
    assert_eq!(report.classification, ProblemClassification::LinearEquation);
    assert_eq!(report.solution["x"], single("2"));
}

#[test]
fn plain_words_are_a_word_problem() {
    let report = Pipeline::default().solve_problem("hello world");

    assert_eq!(report.classification, ProblemClassification::WordProblem);
    assert!(report.parsed.is_empty());
    assert_eq!(report.steps, vec![UNRECOGNIZED]);
    assert_eq!(report.solution[MESSAGE_KEY], single(NO_EQUATIONS));
}

#[test]
fn cubic_falls_back_to_unrecognized() {
    let report = Pipeline::default().solve_problem("x**3 = 8");

    assert_eq!(report.steps, vec![UNRECOGNIZED]);
    assert!(report.solution.is_empty());
}

#[test]
fn inconsistent_system_has_no_solution() {
    let report = Pipeline::default().solve_problem("x + y = 1\nx + y = 2");

    assert_eq!(
        report.steps.last().map(String::as_str),
        Some("The system is inconsistent: no solution")
    );
    assert!(report.solution.is_empty());
}

#[test]
fn division_by_zero_becomes_an_error_entry() {
    let report = Pipeline::default().solve_problem("x / 0 = 1");

    assert!(report.is_error());
    assert!(report.solution.contains_key(ERROR_KEY));
    assert_eq!(report.steps.len(), 1);
}

#[test]
fn uppercase_unknown_is_solved() {
    let report = Pipeline::default().solve_problem("X^2 = 4");

    assert_eq!(
        report.classification,
        ProblemClassification::QuadraticEquation
    );
    assert!(report.rejected.is_empty());
    assert_eq!(report.solution["x"], many(&["-2", "2"]));
}

#[test]
fn very_long_sum_is_solved() {
    let text = format!("x = {}", vec!["1"; 50_000].join(" + "));
    let report = Pipeline::default().solve_problem(&text);

    assert_eq!(report.classification, ProblemClassification::LinearEquation);
    assert_eq!(report.solution["x"], single("50000"));
}

#[test]
fn deeply_nested_line_is_rejected() {
    let text = format!("x = {}1{}", "(".repeat(100_000), ")".repeat(100_000));
    let report = Pipeline::default().solve_problem(&text);

    assert!(report.parsed.is_empty());
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(
        report.rejected[0].reason,
        ParseError::TooDeep { limit: MAX_NESTING }
    );
    assert_eq!(report.solution[MESSAGE_KEY], single(NO_EQUATIONS));
}

#[test]
fn runaway_expansion_becomes_an_error_entry() {
    let report = Pipeline::default().solve_problem("(x+y+z+1)**24 = 0");

    assert!(report.is_error());
    assert_eq!(
        report.steps,
        vec![format!(
            "Solving failed: {}",
            EngineError::TooManyTerms { limit: 1024 }
        )]
    );
}

#[test]
fn report_serializes_with_wire_names() {
    let report = Pipeline::default().solve_problem("2x + 3 = 7");
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(
        value,
        json!({
            "domain": null,
            "type": "linear_equation",
            "ocr_text": "2x + 3 = 7",
            "normalized": "2*x+3=7",
            "parsed": ["2*x+3=7"],
            "steps": [
                "Original equation: 2*x + 3 = 7",
                "Move all terms to one side: 2*x - 4 = 0",
                "Solve for x: x = 2"
            ],
            "solution": {"x": "2"}
        })
    );
}
