//! Graphviz backend shelling out to the dot CLI

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use wait_timeout::ChildExt;

use super::{ImageFormat, RenderBackend};
use crate::error::{PipevizError, Result};

/// Timeout for the availability probe; rendering itself is never bounded
const CLI_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Backend that pipes DOT source through the Graphviz `dot` binary
pub struct GraphvizBackend {
    /// Path to the dot binary
    binary_path: String,
}

impl GraphvizBackend {
    /// Create a backend using `dot` from PATH
    pub fn new() -> Self {
        Self {
            binary_path: "dot".to_string(),
        }
    }

    /// Override the dot binary location
    pub fn with_binary_path(mut self, path: impl Into<String>) -> Self {
        self.binary_path = path.into();
        self
    }

    /// Check if the dot CLI responds (with 5s timeout)
    fn check_cli(&self) -> bool {
        Command::new(&self.binary_path)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .and_then(|mut child| {
                match child.wait_timeout(CLI_CHECK_TIMEOUT)? {
                    Some(status) => Ok(status.success()),
                    None => {
                        // Timeout - kill the process
                        let _ = child.kill();
                        Ok(false)
                    }
                }
            })
            .unwrap_or(false)
    }
}

impl Default for GraphvizBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for GraphvizBackend {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn is_available(&self) -> bool {
        self.check_cli()
    }

    fn render(&self, dot_source: &str, format: ImageFormat) -> Result<Vec<u8>> {
        tracing::debug!(
            binary = %self.binary_path,
            format = format.dot_format(),
            "invoking dot"
        );

        // A NotFound spawn means the binary vanished after (or without) the
        // preflight; report it as unavailable, not as a render failure.
        let mut child = Command::new(&self.binary_path)
            .arg(format!("-T{}", format.dot_format()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PipevizError::BackendUnavailable {
                        backend: self.binary_path.clone(),
                    }
                } else {
                    PipevizError::Io(e)
                }
            })?;

        // Feed the DOT source, then close stdin so dot can finish
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot_source.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let details = if stderr.is_empty() {
                format!("dot exited with {}", output.status)
            } else {
                stderr
            };
            return Err(PipevizError::RenderFailed { details });
        }

        // dot can warn on stderr while still exiting 0
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            tracing::warn!(stderr, "dot reported warnings");
        }

        Ok(output.stdout)
    }
}
