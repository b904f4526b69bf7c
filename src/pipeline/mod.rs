//! End-to-end solving of one problem text.
//!
//! ```text
//! raw ─▶ normalize ─▶ reconstruct ─▶ parse ─┬─▶ classify ─┐
//!                                           └─▶ solve ────┴─▶ ProblemReport
//! ```
//!
//! A [`Pipeline`] holds only immutable configuration and the injected
//! collaborators, so one instance can serve any number of threads.

pub mod stage;

use crate::algebra::{EngineLimits, Vocabulary};
use crate::classify::classify;
use crate::config::StepwiseConfig;
use crate::core::{ProblemReport, StepResult};
use crate::domain::{DomainClassifier, KeywordDomainClassifier, NoDomain};
use crate::equations::{parse_equations, Equation};
use crate::history::{HistorySink, NoHistory, SolveRecord};
use crate::normalize::normalize;
use crate::reconstruct::reconstruct;
use crate::solver::{self, UNRECOGNIZED};
use stage::{run_stage, PureStage};
use tracing::{debug, info_span, warn};

/// Solution message when no line parsed as an equation.
pub const NO_EQUATIONS: &str = "No equations found";

pub struct Pipeline {
    vocabulary: Vocabulary,
    limits: EngineLimits,
    domain: Box<dyn DomainClassifier>,
    history: Box<dyn HistorySink>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    /// Run every stage over `raw` and record the outcome.
    ///
    /// Never fails: engine errors become an `error` entry in the solution.
    pub fn solve_problem(&self, raw: &str) -> ProblemReport {
        let span = info_span!("solve_problem", chars = raw.chars().count());
        let _entered = span.enter();

        let domain = self.domain.classify(raw);

        let normalized = run_stage(&PureStage::new("normalize", normalize), raw);
        let lines = run_stage(
            &PureStage::new("reconstruct", reconstruct),
            normalized.as_str(),
        );
        let parsed = run_stage(
            &PureStage::new("parse", |lines: Vec<String>| {
                parse_equations(&lines, &self.vocabulary)
            }),
            lines,
        );

        let classification = classify(&normalized, &parsed.equations, &self.vocabulary);
        let result = run_stage(
            &PureStage::new("solve", |equations: &[Equation]| {
                self.solve_equations(equations)
            }),
            parsed.equations.as_slice(),
        );
        debug!(%classification, steps = result.steps.len(), "problem solved");

        let report = ProblemReport {
            domain,
            classification,
            ocr_text: raw.to_string(),
            normalized,
            parsed: parsed
                .equations
                .iter()
                .map(|eq| eq.source().to_string())
                .collect(),
            rejected: parsed.rejected,
            steps: result.steps,
            solution: result.solution,
        };

        self.history.record(&SolveRecord::from(&report));
        report
    }

    fn solve_equations(&self, equations: &[Equation]) -> StepResult {
        if equations.is_empty() {
            return StepResult::message(vec![UNRECOGNIZED.to_string()], NO_EQUATIONS);
        }
        match solver::solve(equations, &self.limits) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "engine failure while solving");
                StepResult::error(vec![format!("Solving failed: {e}")], e)
            }
        }
    }
}

/// Builder for [`Pipeline`]; unset collaborators default to no-ops.
#[derive(Default)]
pub struct PipelineBuilder {
    vocabulary: Option<Vocabulary>,
    limits: Option<EngineLimits>,
    domain: Option<Box<dyn DomainClassifier>>,
    history: Option<Box<dyn HistorySink>>,
}

impl PipelineBuilder {
    /// Vocabulary, limits and keyword domain rules taken from `config`.
    pub fn from_config(config: &StepwiseConfig) -> Self {
        let keywords = KeywordDomainClassifier::new(config.domain.keywords.clone());
        let builder = Self::default()
            .vocabulary(config.vocabulary())
            .limits(config.limits);
        if keywords.is_empty() {
            builder
        } else {
            builder.domain_classifier(keywords)
        }
    }

    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn limits(mut self, limits: EngineLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn domain_classifier(mut self, classifier: impl DomainClassifier + 'static) -> Self {
        self.domain = Some(Box::new(classifier));
        self
    }

    pub fn history(mut self, sink: impl HistorySink + 'static) -> Self {
        self.history = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            vocabulary: self.vocabulary.unwrap_or_default(),
            limits: self.limits.unwrap_or_default(),
            domain: self.domain.unwrap_or_else(|| Box::new(NoDomain)),
            history: self.history.unwrap_or_else(|| Box::new(NoHistory)),
        }
    }
}
