use super::{build_pipeline, open_writer, resolve_config};
use crate::core::errors::{Error, Result as StepwiseResult};
use crate::core::ProblemReport;
use crate::io::output::OutputFormat;
use crate::io::read_file;
use anyhow::Result;
use rayon::prelude::*;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

pub struct BatchConfig {
    pub path: PathBuf,
    pub jobs: usize,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub history: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct BatchItem {
    text: String,
}

/// Configure the global rayon pool; `jobs == 0` means one thread per core.
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(RAYON_STACK_SIZE);

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        tracing::debug!("thread pool already configured: {e}");
    }
}

/// Problem texts from JSON lines, skipping blank lines.
pub fn parse_batch(contents: &str) -> StepwiseResult<Vec<String>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<BatchItem>(line)
                .map(|item| item.text)
                .map_err(|e| Error::Input {
                    line: index + 1,
                    message: e.to_string(),
                })
        })
        .collect()
}

pub fn solve_batch(config: BatchConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let texts = parse_batch(&read_file(&config.path)?)?;
    configure_thread_pool(config.jobs);

    let pipeline = build_pipeline(&settings, config.history);
    // par_iter keeps input order in the collected reports
    let reports: Vec<ProblemReport> = texts
        .par_iter()
        .map(|text| pipeline.solve_problem(text))
        .collect();

    let failures = reports.iter().filter(|r| r.is_error()).count();
    info!(problems = reports.len(), failures, "batch solved");

    let format = config.format.unwrap_or(settings.output.default_format);
    let mut writer = open_writer(format, config.output.as_deref())?;
    writer.write_reports(&reports)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_json_lines_and_skips_blanks() {
        let texts = parse_batch(indoc! {r#"
            {"text": "2x + 3 = 7"}

            {"text": "x + y = 10\nx - y = 2"}
        "#})
        .unwrap();
        assert_eq!(texts, vec!["2x + 3 = 7", "x + y = 10\nx - y = 2"]);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let err = parse_batch("{\"text\": \"x=1\"}\nnot json\n").unwrap_err();
        assert!(matches!(err, Error::Input { line: 2, .. }));
    }
}
