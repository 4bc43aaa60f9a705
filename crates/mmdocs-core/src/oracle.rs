//! External full-grammar parser oracle.
//!
//! The structural validator is heuristic by design; when the real parser is
//! installed it gets the final say. The oracle is a single blocking
//! subprocess call with no retry: its outcome is definitive.
//!
//! Failures caused purely by the host environment (no browser binary, no
//! display) say nothing about the diagram, so they are classified into an
//! explicit [`NonSignalFailure`] set and reported as
//! [`OracleVerdict::Unavailable`] rather than as rejections. Anything the
//! classifier does not recognize is treated as a real rejection, so drift in
//! the CLI's wording fails toward reporting errors, never toward hiding them.

use std::io::Write as _;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Verdict from a full-grammar parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleVerdict {
    /// The parser accepted the diagram.
    Accepted,
    /// The parser rejected the diagram.
    Rejected {
        /// Parser-reported reason, suitable for surfacing to the caller.
        reason: String,
    },
    /// The parser could not run for environment-only reasons; the verdict
    /// carries no signal about the diagram itself.
    Unavailable {
        /// Why the oracle could not produce a verdict.
        reason: String,
    },
}

/// A black-box validity check backed by a real parser.
#[async_trait]
pub trait RenderOracle: Send + Sync {
    /// Parse the diagram and report a verdict.
    ///
    /// # Errors
    ///
    /// Returns an error only when the oracle fails to *execute* in a way that
    /// is not a recognized environment condition; a parser rejection is a
    /// verdict, not an error.
    async fn check(&self, code: &str) -> Result<OracleVerdict>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Environment-only failure conditions that carry no signal about the
/// diagram being validated.
///
/// Kept as a closed, named set rather than ad-hoc substring checks at call
/// sites, so every non-signal condition is enumerated (and tested) in one
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonSignalFailure {
    /// The headless browser binary the renderer depends on is not installed.
    MissingBrowser,
    /// The browser is installed but failed to start.
    BrowserLaunchFailed,
    /// No display/X server is available to the browser.
    MissingDisplay,
}

impl NonSignalFailure {
    /// Classify CLI stderr output into a non-signal condition, if any.
    #[must_use]
    pub fn classify(stderr: &str) -> Option<Self> {
        let lowered = stderr.to_lowercase();
        if lowered.contains("could not find chrome") || lowered.contains("could not find browser") {
            Some(Self::MissingBrowser)
        } else if lowered.contains("failed to launch the browser") {
            Some(Self::BrowserLaunchFailed)
        } else if lowered.contains("missing x server") || lowered.contains("cannot open display") {
            Some(Self::MissingDisplay)
        } else {
            None
        }
    }

    /// Human-readable description of the condition.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::MissingBrowser => "headless browser binary not installed",
            Self::BrowserLaunchFailed => "headless browser failed to launch",
            Self::MissingDisplay => "no display available for the renderer",
        }
    }
}

/// Oracle backed by the mermaid CLI (`mmdc`).
///
/// The diagram is written to a temporary file and compiled to a throwaway
/// output; a zero exit status means the full parser accepted it.
pub struct MmdcOracle {
    command: String,
}

impl MmdcOracle {
    /// Create an oracle invoking `mmdc` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_command("mmdc")
    }

    /// Create an oracle invoking a specific executable.
    #[must_use]
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Condense CLI stderr into a single reason line.
    fn rejection_reason(stderr: &str) -> String {
        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if meaningful.is_empty() {
            "diagram rejected by parser".to_string()
        } else {
            meaningful.join("; ")
        }
    }
}

impl Default for MmdcOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderOracle for MmdcOracle {
    async fn check(&self, code: &str) -> Result<OracleVerdict> {
        let workdir = tempfile::tempdir()
            .map_err(|e| Error::Oracle(format!("failed to create scratch dir: {e}")))?;
        let input_path = workdir.path().join("diagram.mmd");
        let output_path = workdir.path().join("diagram.svg");

        write_input(&input_path, code)?;

        let output = Command::new(&self.command)
            .arg("--input")
            .arg(&input_path)
            .arg("--output")
            .arg(&output_path)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(OracleVerdict::Unavailable {
                    reason: format!("'{}' executable not found", self.command),
                });
            },
            Err(e) => {
                return Err(Error::Oracle(format!(
                    "failed to run '{}': {e}",
                    self.command
                )));
            },
        };

        if output.status.success() {
            debug!(command = %self.command, "oracle accepted diagram");
            return Ok(OracleVerdict::Accepted);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if let Some(non_signal) = NonSignalFailure::classify(&stderr) {
            warn!(
                command = %self.command,
                condition = non_signal.describe(),
                "oracle unavailable"
            );
            return Ok(OracleVerdict::Unavailable {
                reason: non_signal.describe().to_string(),
            });
        }

        Ok(OracleVerdict::Rejected {
            reason: Self::rejection_reason(&stderr),
        })
    }

    fn name(&self) -> &str {
        &self.command
    }
}

fn write_input(path: &Path, code: &str) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .map_err(|e| Error::Oracle(format!("failed to stage diagram: {e}")))?;
    file.write_all(code.as_bytes())
        .map_err(|e| Error::Oracle(format!("failed to stage diagram: {e}")))?;
    Ok(())
}
