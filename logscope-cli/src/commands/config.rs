//! `logscope config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use logscope_core::config::LogscopeConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Execute the config validate subcommand.
///
/// Unlike `analyze`, a missing file is reported as invalid.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (missing file, invalid values, parse errors).
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match LogscopeConfig::load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Execute the config show subcommand.
///
/// Displays the effective configuration (file + env overrides + defaults).
///
/// # Errors
///
/// Returns `CliError::Core` if loading fails or `CliError::Command` if the section name is unknown.
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = LogscopeConfig::load_or_default(config_path).await?;
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        format!("{} (not found, defaults)", config_path.display())
    };

    let report = build_config_report(&config, source, section)?;
    writer.render(&report)?;

    Ok(())
}

/// Serialize the whole configuration or a single section.
///
/// The JSON payload and the TOML text cover the same part of the config.
fn build_config_report(
    config: &LogscopeConfig,
    source: String,
    section: Option<String>,
) -> Result<ConfigReport, CliError> {
    let (config_toml, config_json) = match section.as_deref() {
        None => serialize_section(config)?,
        Some("general") => serialize_section(&config.general)?,
        Some("analysis") => serialize_section(&config.analysis)?,
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, analysis)",
                other
            )));
        }
    };

    Ok(ConfigReport {
        source,
        section,
        config: config_json,
        config_toml,
    })
}

fn serialize_section<T: Serialize>(value: &T) -> Result<(String, serde_json::Value), CliError> {
    let config_toml = toml::to_string_pretty(value)
        .map_err(|e| CliError::Command(format!("failed to serialize configuration: {e}")))?;
    Ok((config_toml, serde_json::to_value(value)?))
}

/// Effective configuration, rendered as TOML in text mode.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub config: serde_json::Value,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        // header is a TOML comment so text output stays loadable
        let header = match &self.section {
            Some(section) => format!("# {} [{}]", self.source, section),
            None => format!("# {}", self.source),
        };
        writeln!(w, "{}", header.dimmed())?;
        w.write_all(self.config_toml.as_bytes())
    }
}

/// Outcome of `config validate`.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Empty when `valid` is true.
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let verdict = if self.valid {
            "valid".green()
        } else {
            "invalid".red()
        };
        writeln!(w, "{}: {}", self.source, verdict.bold())?;
        for err in &self.errors {
            writeln!(w, "  - {err}")?;
        }
        Ok(())
    }
}
