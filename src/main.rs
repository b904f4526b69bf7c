use anyhow::Result;
use clap::Parser;
use stepwise::cli::{Cli, Commands};
use stepwise::commands::{batch::BatchConfig, solve::SolveConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    stepwise::logging::init_tracing(cli.verbosity);

    match cli.command {
        Commands::Solve {
            text,
            file,
            format,
            output,
            config,
            history,
            timeout_ms,
        } => stepwise::commands::solve::solve_problem(SolveConfig {
            text,
            file,
            format,
            output,
            config,
            history,
            timeout_ms,
        }),
        Commands::Batch {
            path,
            jobs,
            format,
            output,
            config,
            history,
        } => stepwise::commands::batch::solve_batch(BatchConfig {
            path,
            jobs,
            format,
            output,
            config,
            history,
        }),
        Commands::Init { force } => stepwise::commands::init::init_config(force),
    }
}
