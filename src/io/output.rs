use crate::core::{ProblemReport, SolutionValue, ERROR_KEY, MESSAGE_KEY};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ProblemReport) -> anyhow::Result<()>;

    fn write_reports(&mut self, reports: &[ProblemReport]) -> anyhow::Result<()> {
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    /// Batches are written as one JSON array.
    fn write_reports(&mut self, reports: &[ProblemReport]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(reports)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_equations(report)?;
        self.write_steps(report)?;
        self.write_solution(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Solution")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Field | Value |")?;
        writeln!(self.writer, "|-------|-------|")?;
        writeln!(self.writer, "| Type | `{}` |", report.classification)?;
        if let Some(domain) = &report.domain {
            writeln!(self.writer, "| Domain | {domain} |")?;
        }
        writeln!(
            self.writer,
            "| Input | `{}` |",
            report.ocr_text.replace('\n', " ")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_equations(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        if report.parsed.is_empty() && report.rejected.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Equations")?;
        writeln!(self.writer)?;
        for line in &report.parsed {
            writeln!(self.writer, "- `{line}`")?;
        }
        for rejected in &report.rejected {
            writeln!(
                self.writer,
                "- ~~`{}`~~ (skipped: {})",
                rejected.line, rejected.reason
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_steps(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Steps")?;
        writeln!(self.writer)?;
        for (i, step) in report.steps.iter().enumerate() {
            writeln!(self.writer, "{}. {}", i + 1, step)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_solution(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Result")?;
        writeln!(self.writer)?;
        if report.solution.is_empty() {
            writeln!(self.writer, "_No solution._")?;
        }
        for (name, value) in &report.solution {
            writeln!(self.writer, "- **{name}**: {}", render_value(value))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        self.print_header(report)?;
        self.print_equations(report)?;
        self.print_steps(report)?;
        self.print_solution(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Stepwise Solution".bold().blue())?;
        writeln!(self.writer, "{}", "=================".blue())?;
        write!(self.writer, "  Type: {}", report.classification.as_str().cyan())?;
        if let Some(domain) = &report.domain {
            write!(self.writer, "  Domain: {}", domain.cyan())?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_equations(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        if report.rejected.is_empty() {
            return Ok(());
        }
        writeln!(
            self.writer,
            "{} ({}):",
            "Skipped lines".yellow(),
            report.rejected.len()
        )?;
        for rejected in &report.rejected {
            writeln!(
                self.writer,
                "  - {} ({})",
                rejected.line.yellow(),
                rejected.reason
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_steps(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Steps:".bold())?;
        for (i, step) in report.steps.iter().enumerate() {
            writeln!(self.writer, "  {}. {}", i + 1, step)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_solution(&mut self, report: &ProblemReport) -> anyhow::Result<()> {
        if let Some(error) = report.solution.get(ERROR_KEY) {
            writeln!(self.writer, "{} {}", "✗ Error:".red().bold(), error)?;
            return Ok(());
        }
        if let Some(message) = report.solution.get(MESSAGE_KEY) {
            writeln!(self.writer, "{} {}", "•".yellow(), message)?;
            return Ok(());
        }
        if report.solution.is_empty() {
            writeln!(self.writer, "{} no solution", "•".yellow())?;
            return Ok(());
        }
        for (name, value) in &report.solution {
            writeln!(
                self.writer,
                "{} {} = {}",
                "✓".green(),
                name.bold(),
                render_value(value).green()
            )?;
        }
        Ok(())
    }
}

fn render_value(value: &SolutionValue) -> String {
    match value {
        SolutionValue::Single(v) => v.clone(),
        SolutionValue::Many(values) if values.is_empty() => "none".to_string(),
        SolutionValue::Many(values) => values.join(", "),
    }
}

pub fn create_writer<'a>(format: OutputFormat, writer: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
