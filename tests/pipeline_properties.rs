//! Property-based tests for the text stages and the classifier
//!
//! These tests verify invariants that should hold for all inputs:
//! - Normalization is idempotent
//! - Implicit multiplication never doubles an operator
//! - Reconstruction never produces more lines than it was given
//! - Two parsable equations always classify as a system
//! - A garbage line never costs a good line its equation

use proptest::prelude::*;
use stepwise::algebra::Vocabulary;
use stepwise::normalize::insert_implicit_multiplication;
use stepwise::{classify, normalize, parse_equations, reconstruct, ProblemClassification};

/// Text mixing math tokens, OCR glyphs and line noise
fn ocr_text() -> impl Strategy<Value = String> {
    let symbols = prop::sample::select(vec![
        "²", "×", "−", "÷", "=", "(", ")", "+", " ", "\t", "\n", "\r\n",
    ])
    .prop_map(str::to_string);
    let token = prop_oneof!["[0-9]{1,3}", "[xyz]", symbols, "[a-w]{1,4}"];
    prop::collection::vec(token, 0..40).prop_map(|tokens| tokens.concat())
}

/// A linear equation line in normalized form, e.g. `3*x+2=11`
fn linear_line() -> impl Strategy<Value = String> {
    (1i32..20, "[xyz]", -20i32..20, -50i32..50)
        .prop_map(|(a, u, b, c)| format!("{a}*{u}+{b}={c}").replace("+-", "-"))
}

fn garbage_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[@#$%&!]{1,6}",
        "[@#$%&!]{1,3}=[@#$%&!]{1,3}",
        "[a-w]{3,8}",
        Just("=".to_string()),
        Just("x+=".to_string()),
    ]
}

fn non_empty_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(text in ocr_text()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_implicit_multiplication_never_doubles(text in "[0-9xyz()+*=]{0,30}") {
        let once = insert_implicit_multiplication(&text);
        prop_assert_eq!(insert_implicit_multiplication(&once), once.clone());
        // Only stars are added, and never next to another star
        prop_assert_eq!(once.replace('*', ""), text.replace('*', ""));
        prop_assert_eq!(once.matches("**").count(), text.matches("**").count());
    }

    #[test]
    fn prop_reconstruct_never_adds_lines(text in ocr_text()) {
        let normalized = normalize(&text);
        let lines = reconstruct(&normalized);
        prop_assert!(lines.len() <= non_empty_lines(&normalized));
        prop_assert!(lines.iter().all(|line| !line.is_empty()));
    }

    #[test]
    fn prop_two_equations_classify_as_system(
        first in linear_line(),
        second in linear_line(),
    ) {
        let vocabulary = Vocabulary::default();
        let text = format!("{first}\n{second}");
        let parsed = parse_equations(&reconstruct(&text), &vocabulary);
        prop_assert_eq!(parsed.equations.len(), 2);
        prop_assert_eq!(
            classify(&text, &parsed.equations, &vocabulary),
            ProblemClassification::SystemOfEquations
        );
    }

    #[test]
    fn prop_garbage_line_is_isolated(
        good in linear_line(),
        bad in garbage_line(),
        bad_first in any::<bool>(),
    ) {
        let vocabulary = Vocabulary::default();
        let lines = if bad_first {
            vec![bad.clone(), good.clone()]
        } else {
            vec![good.clone(), bad.clone()]
        };
        let parsed = parse_equations(&lines, &vocabulary);
        prop_assert_eq!(parsed.equations.len(), 1);
        prop_assert_eq!(parsed.equations[0].source(), good.as_str());
        prop_assert_eq!(parsed.rejected.len(), 1);
        prop_assert_eq!(&parsed.rejected[0].line, &bad);
    }
}
