pub mod batch;
pub mod init;
pub mod solve;

use crate::config::{load_config, load_config_from, StepwiseConfig};
use crate::history::JsonLinesHistory;
use crate::io::output::{create_writer, OutputFormat, OutputWriter};
use crate::pipeline::{Pipeline, PipelineBuilder};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Explicit configuration file, or discovery from the current directory.
pub(crate) fn resolve_config(explicit: Option<&Path>) -> Result<StepwiseConfig> {
    match explicit {
        Some(path) => Ok(load_config_from(path)?),
        None => Ok(load_config()),
    }
}

pub(crate) fn build_pipeline(config: &StepwiseConfig, history: Option<PathBuf>) -> Pipeline {
    let builder = PipelineBuilder::from_config(config);
    let builder = match history {
        Some(path) => builder.history(JsonLinesHistory::new(path)),
        None => builder,
    };
    builder.build()
}

/// A writer for `output`, or stdout. Files never receive color codes.
pub(crate) fn open_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => {
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };
    Ok(create_writer(format, sink))
}
