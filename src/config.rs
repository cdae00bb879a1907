// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{DEFAULT_BINARY, EXTRA_BINARY_DIRS};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Reconciler configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the control-plane tool (`oc` or `kubectl`)
    pub binary: PathBuf,
    /// Skip every mutating command and report it as changed
    pub check_mode: bool,
    /// Keep the discrepancy list in `latest` outcomes
    pub report_diff: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let binary = match env::var_os("OC_BINARY") {
            Some(path) => PathBuf::from(path),
            None => find_binary(DEFAULT_BINARY).with_context(|| {
                format!(
                    "OC_BINARY not set and `{}` not found in PATH or {:?}",
                    DEFAULT_BINARY, EXTRA_BINARY_DIRS
                )
            })?,
        };
        let check_mode = parse_flag("CHECK_MODE", false)?;
        let report_diff = parse_flag("REPORT_DIFF", true)?;

        Ok(Config {
            binary,
            check_mode,
            report_diff,
        })
    }
}

fn parse_flag(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be `true` or `false`, got `{}`", name, value)),
        Err(_) => Ok(default),
    }
}

fn find_binary(name: &str) -> Option<PathBuf> {
    let path_dirs = env::var_os("PATH")
        .map(|p| env::split_paths(&p).collect::<Vec<_>>())
        .unwrap_or_default();

    path_dirs
        .into_iter()
        .chain(EXTRA_BINARY_DIRS.iter().map(PathBuf::from))
        .map(|dir| dir.join(name))
        .find(|candidate| is_file(candidate))
}

fn is_file(path: &Path) -> bool {
    path.metadata().is_ok_and(|m| m.is_file())
}
