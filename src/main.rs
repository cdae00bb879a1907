// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ocsync::command::ProcessRunner;
use ocsync::config::Config;
use ocsync::reconcilers::Reconciler;
use ocsync::types::{Report, TaskSpec};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ocsync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            println!(
                "{}",
                serde_json::json!({ "failed": true, "msg": format!("{:#}", e) })
            );
            Err(e)
        }
    }
}

async fn run() -> Result<Report> {
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: binary={}, check_mode={}",
        config.binary.display(),
        config.check_mode
    );

    let tasks = TaskSpec::parse_all(&read_tasks()?).context("Failed to parse task documents")?;
    let reconciler = Reconciler::from_config(ProcessRunner::new(config.binary.clone()), &config);

    let mut report = Report::default();
    for task in tasks {
        let request = task.into_request()?;
        let label = request.label();
        let outcome = reconciler
            .reconcile(&request)
            .await
            .with_context(|| format!("Failed to reconcile {} to state {}", label, request.state))?;
        report = report.merge(Report::single(label, outcome));
    }

    Ok(report)
}

/// Task documents come from the file named by the first argument, or stdin
fn read_tasks() -> Result<String> {
    match std::env::args_os().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read task file {}", path.to_string_lossy())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read tasks from stdin")?;
            Ok(text)
        }
    }
}
