//! `logscope analyze` command handler

use std::io::Write;

use chrono::{Local, TimeZone};
use serde::Serialize;
use tracing::info;

use logscope_access_log::{
    AccessLogAnalyzerBuilder, AnalysisReport, AnalyzerConfig, PeakWindow, RankedRequest,
};
use logscope_core::config::LogscopeConfig;
use logscope_core::types::LogRecord;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Date format used for peak window boundaries in text output.
const WINDOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Execute the `analyze` command.
///
/// Command-line flags take precedence over the `[analysis]` config section.
/// The log file is read on the blocking thread pool.
///
/// # Errors
///
/// Returns `CliError::Analysis` if the log file cannot be opened or read,
/// or if the configured analysis section holds an unknown enum value.
pub async fn execute(
    args: AnalyzeArgs,
    config: &LogscopeConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let analyzer_config = resolve_config(&args, config)?;
    info!(
        path = %args.path.display(),
        top_n = analyzer_config.top_n,
        window_secs = analyzer_config.window_secs,
        timezone = %analyzer_config.timezone,
        "analyzing access log"
    );

    let analyzer = AccessLogAnalyzerBuilder::new()
        .config(analyzer_config.clone())
        .build();
    let path = args.path.clone();
    let (records, summary) = tokio::task::spawn_blocking(move || analyzer.analyze_path(&path))
        .await
        .map_err(|e| CliError::Command(format!("analysis task failed: {e}")))??;

    let report = build_report(
        args.path.display().to_string(),
        analyzer_config,
        summary,
        args.show_records.then_some(records),
    );
    writer.render(&report)?;

    Ok(())
}

/// Merge config file values with command-line overrides.
fn resolve_config(args: &AnalyzeArgs, config: &LogscopeConfig) -> Result<AnalyzerConfig, CliError> {
    let mut resolved = AnalyzerConfig::from_core(&config.analysis)?;
    if let Some(top) = args.top {
        resolved.top_n = top;
    }
    if let Some(window) = args.window {
        resolved.window_secs = window;
    }
    if let Some(timezone) = args.timezone {
        resolved.timezone = timezone;
    }
    if let Some(order) = args.order {
        resolved.rank_order = order;
    }
    Ok(resolved)
}

/// Assemble the output payload, applying the requested table order.
fn build_report(
    source: String,
    parameters: AnalyzerConfig,
    summary: AnalysisReport,
    records: Option<Vec<LogRecord>>,
) -> AnalyzeReport {
    let top_requests = summary
        .top_requests
        .ordered(parameters.rank_order)
        .into_iter()
        .cloned()
        .collect();

    AnalyzeReport {
        source,
        parameters,
        total_records: summary.total_records,
        malformed_records: summary.malformed_records,
        server_error_records: summary.server_error_records,
        top_requests,
        peak_window: summary.peak_window,
        records,
    }
}

/// Format a Unix timestamp in the host's local time zone.
fn format_local(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).earliest() {
        Some(dt) => dt.format(WINDOW_TIME_FORMAT).to_string(),
        None => ts.to_string(),
    }
}

/// Analysis result for a single log file.
#[derive(Serialize)]
pub struct AnalyzeReport {
    /// Log file path
    pub source: String,
    /// Effective analysis parameters
    pub parameters: AnalyzerConfig,
    /// Number of lines read
    pub total_records: usize,
    /// Lines that did not match the log layout
    pub malformed_records: usize,
    /// Records with a 5xx status
    pub server_error_records: usize,
    /// Ranked 5xx requests in the requested order
    pub top_requests: Vec<RankedRequest>,
    /// Densest window
    pub peak_window: PeakWindow,
    /// Every parsed record (only with `--show-records`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<LogRecord>>,
}

impl Render for AnalyzeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Access log: {} (timezone: {})",
            self.source.bold(),
            self.parameters.timezone
        )?;
        writeln!(
            w,
            "  Records: {} ({} malformed)",
            self.total_records, self.malformed_records
        )?;
        writeln!(w, "  5XX records: {}", self.server_error_records)?;

        if let Some(records) = &self.records {
            writeln!(w)?;
            for record in records {
                writeln!(w, "{record}")?;
            }
        }

        writeln!(w)?;
        writeln!(w, "{}", "Most frequent 5XX requests:".bold())?;
        if self.top_requests.is_empty() {
            writeln!(w, "  (none)")?;
        }
        for entry in &self.top_requests {
            writeln!(w, "{}: {}", entry.request, entry.count.to_string().yellow())?;
        }

        writeln!(w)?;
        let peak = &self.peak_window;
        if peak.count == 0 {
            writeln!(
                w,
                "No peak request window (window: {}s)",
                self.parameters.window_secs
            )?;
        } else {
            writeln!(
                w,
                "Peak request window from {} to {} ({} requests)",
                format_local(peak.window.start).cyan(),
                format_local(peak.window.end).cyan(),
                peak.count
            )?;
        }

        Ok(())
    }
}
