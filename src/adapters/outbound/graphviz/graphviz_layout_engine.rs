use crate::dependency_graph::domain::ImageFormat;
use crate::ports::outbound::LayoutEngine;
use crate::shared::error::DepGraphError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const DEFAULT_PROGRAM: &str = "dot";

/// GraphvizLayoutEngine adapter running the `dot` executable
///
/// The description is piped to stdin and the image read from stdout, so no
/// temporary files are involved.
#[derive(Debug, Clone)]
pub struct GraphvizLayoutEngine {
    program: String,
}

impl GraphvizLayoutEngine {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Uses another Graphviz layout program (`neato`, `fdp`, ...) or a
    /// non-standard install location
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn unavailable(&self) -> DepGraphError {
        DepGraphError::LayoutEngineUnavailable {
            tool: self.program.clone(),
        }
    }
}

impl Default for GraphvizLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LayoutEngine for GraphvizLayoutEngine {
    async fn render(&self, description: &str, format: ImageFormat) -> Result<Vec<u8>> {
        let program = which::which(&self.program).map_err(|_| self.unavailable())?;

        let mut child = Command::new(program)
            .arg(format!("-T{}", format.extension()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|_| self.unavailable())?;

        // dot may exit early on bad input; its exit status takes precedence
        // over a failed write. stdin is dropped at the end of the match.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(description.as_bytes()).await,
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("Failed to wait for {}", self.program))?;

        if output.status.success() {
            write_result.with_context(|| {
                format!("Failed to send graph description to {}", self.program)
            })?;
        } else {
            return Err(DepGraphError::LayoutEngineError {
                tool: self.program.clone(),
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(output.stdout)
    }
}
