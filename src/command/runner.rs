// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Execution of the external control-plane tool.

use crate::error::{ReconcileError, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Exit status and captured output of one tool invocation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs the control-plane tool. A non-zero exit status is not an error at this
/// level; callers decide what it means for their operation.
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(&self, args: &[String], stdin: Option<&[u8]>) -> Result<CommandOutput>;

    /// Printable command line, used in error messages
    fn display(&self, args: &[String]) -> String;
}

/// Runs the tool as a child process
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    binary: PathBuf,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self, stdin), fields(stdin_bytes = stdin.map_or(0, <[u8]>::len)))]
    async fn execute(&self, args: &[String], stdin: Option<&[u8]>) -> Result<CommandOutput> {
        let spawn_error = |source| ReconcileError::Spawn {
            command: self.display(args),
            source,
        };

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin while the output is being drained so neither pipe can fill up
        let pipe = child.stdin.take();
        let feed = async move {
            if let (Some(mut pipe), Some(data)) = (pipe, stdin) {
                pipe.write_all(data).await?;
                pipe.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(spawn_error)?;
        if let Err(e) = fed {
            // The tool may exit before reading its whole input; its exit status tells the story
            debug!("Writing standard input failed: {}", e);
        }

        let result = CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!("Command exited with status {}", result.code);
        Ok(result)
    }

    fn display(&self, args: &[String]) -> String {
        std::iter::once(self.binary.display().to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
