use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stepwise")]
#[command(about = "Step-by-step solver for OCR'd algebra problems", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: info, -vv: debug, -vvv: trace. RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve one problem and print its steps
    Solve {
        /// Problem text (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read the problem text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format (defaults to output.default_format from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (skips discovery of .stepwise.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append a JSON line per solve to this file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Give up on the solve after this many milliseconds
        #[arg(long = "timeout-ms")]
        timeout_ms: Option<u64>,
    },

    /// Solve every problem in a JSON lines file of {"text": ...} objects
    Batch {
        /// Input file
        path: PathBuf,

        /// Number of worker threads (0 = one per core)
        #[arg(short = 'j', long, default_value = "0")]
        jobs: usize,

        /// Output format (defaults to output.default_format from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (skips discovery of .stepwise.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append a JSON line per solve to this file
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Write a default .stepwise.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
