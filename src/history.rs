//! Solve history records.
//!
//! The pipeline produces a [`SolveRecord`] per request and hands it to a
//! [`HistorySink`]. Recording is fire-and-forget: a sink that fails logs the
//! failure and the request carries on.

use crate::core::{ProblemClassification, ProblemReport, Solution};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// The persisted shape of one solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveRecord {
    pub raw_text: String,
    pub normalized: String,
    pub parsed: Vec<String>,
    pub classification: ProblemClassification,
    pub solution: Solution,
}

impl From<&ProblemReport> for SolveRecord {
    fn from(report: &ProblemReport) -> Self {
        Self {
            raw_text: report.ocr_text.clone(),
            normalized: report.normalized.clone(),
            parsed: report.parsed.clone(),
            classification: report.classification,
            solution: report.solution.clone(),
        }
    }
}

/// Destination for solve records.
pub trait HistorySink: Send + Sync {
    fn record(&self, record: &SolveRecord);
}

/// Sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistorySink for NoHistory {
    fn record(&self, _record: &SolveRecord) {}
}

#[derive(Serialize)]
struct TimestampedRecord<'a> {
    recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    record: &'a SolveRecord,
}

/// Appends one JSON object per line to a file.
#[derive(Debug)]
pub struct JsonLinesHistory {
    path: PathBuf,
    // Serializes appends from concurrent solves
    lock: Mutex<()>,
}

impl JsonLinesHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &SolveRecord) -> crate::core::errors::Result<()> {
        let line = serde_json::to_string(&TimestampedRecord {
            recorded_at: Utc::now(),
            record,
        })?;
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl HistorySink for JsonLinesHistory {
    fn record(&self, record: &SolveRecord) {
        if let Err(e) = self.append(record) {
            warn!(path = %self.path.display(), error = %e, "failed to record solve history");
        }
    }
}
