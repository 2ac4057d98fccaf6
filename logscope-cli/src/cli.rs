//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use logscope_access_log::{RankOrder, TimezoneMode};

/// logscope -- access log analyzer.
///
/// Use `logscope <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logscope", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logscope.toml configuration file (defaults apply if missing).
    #[arg(short, long, default_value = "logscope.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an access log file.
    Analyze(AnalyzeArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- analyze ----

/// Rank 5xx requests and find the peak traffic window of a log file.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Access log file in Common Log Format.
    pub path: PathBuf,

    /// Number of 5xx requests to rank (0 or negative yields an empty table).
    #[arg(long, allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// Peak window length in seconds (0 or negative yields an empty window).
    #[arg(long, allow_negative_numbers = true)]
    pub window: Option<i64>,

    /// Timestamp interpretation (local, offset).
    #[arg(long)]
    pub timezone: Option<TimezoneMode>,

    /// Order of the ranked table (rank, request).
    #[arg(long)]
    pub order: Option<RankOrder>,

    /// Also print every parsed record.
    #[arg(long)]
    pub show_records: bool,
}

// ---- config ----

/// Manage logscope configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, analysis).
        #[arg(long)]
        section: Option<String>,
    },
}
