//! Logging initialization for the logscope CLI.
//!
//! Diagnostics go to stderr; stdout only carries analysis results.

use std::fmt;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use logscope_core::config::{GeneralConfig, VALID_LOG_LEVELS};

/// Diagnostic output style selected by `general.log_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line human-readable output
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => bail!("unknown log format '{value}', expected 'json' or 'pretty'"),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        })
    }
}

/// Normalize a configured level name, rejecting anything `EnvFilter`
/// would otherwise silently treat as a target directive.
fn normalize_level(level: &str) -> Result<String> {
    let level = level.to_ascii_lowercase();
    if !VALID_LOG_LEVELS.contains(&level.as_str()) {
        bail!(
            "unknown log level '{level}', expected one of: {}",
            VALID_LOG_LEVELS.join(", ")
        );
    }
    Ok(level)
}

/// Initialize the global tracing subscriber.
///
/// Must be called once, before any tracing macros are used.
/// `RUST_LOG` takes precedence over `config.log_level`, but the configured
/// level is validated either way.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let format = LogFormat::parse(&config.log_format)?;
    let level = normalize_level(&config.log_level)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    result.with_context(|| format!("failed to initialize {format} tracing subscriber"))
}
