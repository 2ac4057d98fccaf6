//! Text / JSON output switching
//!
//! Command handlers build a payload and hand it to [`OutputWriter`]; the
//! `--output` flag decides whether it is printed via [`Render`] or serde_json.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes command payloads in the format selected on the command line.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print `payload` to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let mut out = std::io::stdout().lock();
        self.render_to(payload, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Print `payload` to `w`. JSON output is pretty-printed and newline-terminated.
    pub fn render_to<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                w.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Human-readable rendering of a command payload.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}
