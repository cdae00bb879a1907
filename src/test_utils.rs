// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for scripting control-plane tool responses.

use crate::command::{CommandOutput, CommandRunner};
use crate::error::Result;
use std::sync::{Arc, Mutex};

/// One recorded call to the tool
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Invocation {
    /// Arguments after the leading global flags
    pub fn command(&self) -> &[String] {
        let start = self
            .args
            .iter()
            .position(|a| !a.starts_with("--"))
            .unwrap_or(self.args.len());
        &self.args[start..]
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.command().first().map(String::as_str)
    }
}

/// A runner that answers with predefined outputs, matched on the arguments that
/// follow the global flags, and records every invocation.
#[derive(Clone, Default)]
pub struct MockRunner {
    responses: Arc<Mutex<Vec<(Vec<String>, CommandOutput)>>>,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `args` with the given status and stdout
    pub fn on(self, args: &[&str], code: i32, stdout: &str) -> Self {
        self.respond(
            args,
            CommandOutput {
                code,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    /// Answer commands starting with `args` with a failure and the given stderr
    pub fn on_failure(self, args: &[&str], code: i32, stderr: &str) -> Self {
        self.respond(
            args,
            CommandOutput {
                code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    fn respond(self, args: &[&str], output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((args.iter().map(|s| s.to_string()).collect(), output));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls whose subcommand is `subcommand`
    pub fn calls_to(&self, subcommand: &str) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|c| c.subcommand() == Some(subcommand))
            .collect()
    }

    fn find_response(&self, command: &[String]) -> Option<CommandOutput> {
        let responses = self.responses.lock().unwrap();

        // Try exact match first
        if let Some((_, output)) = responses.iter().find(|(args, _)| args == command) {
            return Some(output.clone());
        }

        // Then the longest registered prefix
        responses
            .iter()
            .filter(|(args, _)| command.starts_with(args))
            .max_by_key(|(args, _)| args.len())
            .map(|(_, output)| output.clone())
    }
}

#[async_trait::async_trait]
impl CommandRunner for MockRunner {
    async fn execute(&self, args: &[String], stdin: Option<&[u8]>) -> Result<CommandOutput> {
        let invocation = Invocation {
            args: args.to_vec(),
            stdin: stdin.map(|s| String::from_utf8_lossy(s).into_owned()),
        };
        let response = self.find_response(invocation.command());
        self.calls.lock().unwrap().push(invocation);

        // Default "not found" for unmatched commands
        Ok(response.unwrap_or_else(|| CommandOutput {
            code: 1,
            stdout: String::new(),
            stderr: "Error from server (NotFound): not found".to_string(),
        }))
    }

    fn display(&self, args: &[String]) -> String {
        format!("oc {}", args.join(" "))
    }
}

/// A live object as the tool would print it with `-o json`
pub fn live_json(kind: &str, name: &str, resource_version: &str, spec: serde_json::Value) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": kind,
        "metadata": {
            "name": name,
            "namespace": "default",
            "uid": "3c1d6c2e-0000-4000-8000-000000000000",
            "resourceVersion": resource_version,
            "creationTimestamp": "2026-01-01T00:00:00Z"
        },
        "spec": spec,
        "status": {}
    })
    .to_string()
}

/// A dry-run render of an object: no server-populated metadata
pub fn rendered_json(kind: &str, name: &str, spec: serde_json::Value) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": kind,
        "metadata": {
            "name": name,
            "namespace": "default"
        },
        "spec": spec
    })
    .to_string()
}
