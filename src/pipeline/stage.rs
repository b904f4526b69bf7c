//! Named pipeline stages.
//!
//! A stage is a named transformation from one representation of a problem to
//! the next. Fallible stages simply produce a `Result` as their output.

use std::marker::PhantomData;
use std::time::Instant;
use tracing::{debug_span, trace};

/// A pipeline stage that transforms data.
pub trait Stage {
    type Input;
    type Output;

    /// Execute this stage with the given input.
    fn execute(&self, input: Self::Input) -> Self::Output;

    /// Stage name used in spans.
    fn name(&self) -> &str;
}

/// A stage backed by a plain function.
///
/// ```rust,ignore
/// let stage = PureStage::new("normalize", normalize);
/// let text = stage.execute("2x + 3 = 7");
/// ```
pub struct PureStage<F, I, O> {
    name: &'static str,
    func: F,
    _phantom: PhantomData<fn(I) -> O>,
}

impl<F, I, O> PureStage<F, I, O>
where
    F: Fn(I) -> O,
{
    pub fn new(name: &'static str, func: F) -> Self {
        Self {
            name,
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, I, O> Stage for PureStage<F, I, O>
where
    F: Fn(I) -> O,
{
    type Input = I;
    type Output = O;

    fn execute(&self, input: I) -> O {
        (self.func)(input)
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Run `stage` inside a `debug` span carrying its name.
pub fn run_stage<S: Stage>(stage: &S, input: S::Input) -> S::Output {
    let span = debug_span!("stage", name = stage.name());
    let _entered = span.enter();
    let start = Instant::now();
    let output = stage.execute(input);
    trace!(elapsed_us = start.elapsed().as_micros() as u64, "stage finished");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_stage_execution() {
        let stage = PureStage::new("double", |x: i32| x * 2);
        assert_eq!(stage.execute(21), 42);
    }

    #[test]
    fn test_fallible_output() {
        let stage = PureStage::new("parse", |s: &str| s.parse::<i32>());
        assert_eq!(run_stage(&stage, "42"), Ok(42));
        assert!(run_stage(&stage, "not a number").is_err());
    }

    #[test]
    fn test_stage_name() {
        let stage = PureStage::new("reconstruct", |x: i32| x);
        assert_eq!(Stage::name(&stage), "reconstruct");
    }
}
