//! Step-by-step solving of algebra problems recovered from OCR text.
//!
//! [`Pipeline::solve_problem`] takes the raw text through normalization, line
//! reconstruction, equation parsing, classification and a step-generating
//! solver, and returns a serializable [`ProblemReport`].

// Export modules for library usage
pub mod algebra;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod domain;
pub mod equations;
pub mod history;
pub mod io;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod reconstruct;
pub mod solver;

// Re-export commonly used types
pub use crate::core::{
    ProblemClassification, ProblemReport, Solution, SolutionValue, StepResult,
};

pub use crate::algebra::{EngineError, EngineLimits, ParseError, Vocabulary};
pub use crate::classify::classify;
pub use crate::config::StepwiseConfig;
pub use crate::domain::{DomainClassifier, KeywordDomainClassifier, NoDomain};
pub use crate::equations::{parse_equations, Equation, ParsedEquations, RejectedLine};
pub use crate::history::{HistorySink, JsonLinesHistory, NoHistory, SolveRecord};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::normalize::normalize;
pub use crate::pipeline::{Pipeline, PipelineBuilder};
pub use crate::reconstruct::reconstruct;
pub use crate::solver::solve;
