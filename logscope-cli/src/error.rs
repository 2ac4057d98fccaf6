//! CLI-specific error types and exit code mapping

use logscope_access_log::AccessLogError;
use logscope_core::error::LogscopeError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logscope-core.
    #[error("{0}")]
    Core(#[from] LogscopeError),

    /// Access log analysis error.
    #[error("{0}")]
    Analysis(#[from] AccessLogError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | Configuration error              |
    /// | 10   | Log source or other IO error     |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::Core(LogscopeError::Config(_))
            | Self::Analysis(AccessLogError::Config { .. }) => 2,
            Self::Io(_)
            | Self::Core(LogscopeError::Io(_) | LogscopeError::Source(_))
            | Self::Analysis(AccessLogError::SourceUnavailable { .. } | AccessLogError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}
