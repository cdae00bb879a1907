// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Unparsable output from {operation}: {source}")]
    MalformedOutput {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid resource payload: {0}")]
    InvalidPayload(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
