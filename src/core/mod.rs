pub mod errors;

use crate::equations::RejectedLine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural category of a problem, driving which solver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemClassification {
    LinearEquation,
    QuadraticEquation,
    SystemOfEquations,
    WordProblem,
}

impl ProblemClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemClassification::LinearEquation => "linear_equation",
            ProblemClassification::QuadraticEquation => "quadratic_equation",
            ProblemClassification::SystemOfEquations => "system_of_equations",
            ProblemClassification::WordProblem => "word_problem",
        }
    }
}

impl fmt::Display for ProblemClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A solution value: one rendered value, or a list for root sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolutionValue {
    Single(String),
    Many(Vec<String>),
}

impl fmt::Display for SolutionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionValue::Single(value) => f.write_str(value),
            SolutionValue::Many(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// Unknown name (or `message` / `error`) mapped to its value.
pub type Solution = BTreeMap<String, SolutionValue>;

/// Key carrying an informational message instead of a value.
pub const MESSAGE_KEY: &str = "message";
/// Key carrying an engine failure instead of a value.
pub const ERROR_KEY: &str = "error";

/// Ordered derivation steps plus the solution they lead to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepResult {
    pub steps: Vec<String>,
    pub solution: Solution,
}

impl StepResult {
    pub fn new(steps: Vec<String>, solution: Solution) -> Self {
        Self { steps, solution }
    }

    pub fn message(steps: Vec<String>, message: impl Into<String>) -> Self {
        Self::new(
            steps,
            Solution::from([(MESSAGE_KEY.to_string(), SolutionValue::Single(message.into()))]),
        )
    }

    pub fn error(steps: Vec<String>, error: impl fmt::Display) -> Self {
        Self::new(
            steps,
            Solution::from([(ERROR_KEY.to_string(), SolutionValue::Single(error.to_string()))]),
        )
    }
}

/// Everything produced for one input text.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemReport {
    /// Label from the injected domain classifier; never affects solving.
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub classification: ProblemClassification,
    pub ocr_text: String,
    pub normalized: String,
    /// Source lines of the equations that parsed.
    pub parsed: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedLine>,
    pub steps: Vec<String>,
    pub solution: Solution,
}

impl ProblemReport {
    pub fn is_error(&self) -> bool {
        self.solution.contains_key(ERROR_KEY)
    }
}

/// Serialize any `Display` value as its string form.
pub(crate) fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}
