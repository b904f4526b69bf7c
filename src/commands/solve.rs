use super::{build_pipeline, open_writer, resolve_config};
use crate::core::errors::Error;
use crate::core::ProblemReport;
use crate::io::output::OutputFormat;
use crate::io::{read_file, read_stdin};
use crate::pipeline::Pipeline;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

pub struct SolveConfig {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub history: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
}

pub fn solve_problem(config: SolveConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let raw = match (config.text, &config.file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_file(path)?,
        (None, None) => {
            debug!("reading problem text from stdin");
            read_stdin()?
        }
    };

    let pipeline = Arc::new(build_pipeline(&settings, config.history));
    let report = match config.timeout_ms {
        Some(ms) => solve_with_timeout(pipeline, raw, Duration::from_millis(ms))?,
        None => pipeline.solve_problem(&raw),
    };
    info!(classification = %report.classification, "solved");

    let format = config.format.unwrap_or(settings.output.default_format);
    let mut writer = open_writer(format, config.output.as_deref())?;
    writer.write_report(&report)?;
    Ok(())
}

/// Run the solve on a worker thread and wait at most `timeout`.
///
/// A solve that overruns is abandoned; its thread finishes in the background.
/// A worker that dies without a report (a panic) is reported as such, not as
/// a timeout.
pub fn solve_with_timeout(
    pipeline: Arc<Pipeline>,
    raw: String,
    timeout: Duration,
) -> Result<ProblemReport, Error> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver is gone once the wait has timed out
        let _ = tx.send(pipeline.solve_problem(&raw));
    });
    rx.recv_timeout(timeout).map_err(|e| match e {
        RecvTimeoutError::Timeout => {
            Error::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
        }
        RecvTimeoutError::Disconnected => Error::WorkerStopped,
    })
}
