//! logscope CLI -- command-line access log analyzer
//!
//! Reads `logscope.toml` (defaults apply when it is missing), initializes
//! logging on stderr, and dispatches to a subcommand handler.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use logscope_core::config::{GeneralConfig, LogscopeConfig};

use cli::{Cli, Commands};
use error::CliError;
use output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loaded = LogscopeConfig::load_or_default(&cli.config).await;

    init_logging(&cli, loaded.as_ref().ok())?;
    tracing::debug!(config = %cli.config.display(), "logscope starting");

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Analyze(args) => {
            let config = loaded?;
            commands::analyze::execute(args, &config, &writer).await
        }
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}

/// Initialize tracing from the loaded config, falling back to defaults
/// when the config itself failed to load.
fn init_logging(cli: &Cli, config: Option<&LogscopeConfig>) -> Result<(), CliError> {
    let mut general: GeneralConfig = config.map(|c| c.general.clone()).unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    logging::init_tracing(&general).map_err(|e| CliError::Command(format!("{e:#}")))
}
