// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Argument lists that identify objects to the control-plane tool.

use crate::constants::flags;
use crate::error::{ReconcileError, Result};
use crate::types::resource::filename_flag;
use crate::types::{AddressingSpec, ResourceDescriptor};

/// What the located objects are about to be used for; decides how the `all`
/// flag is spelled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Read,
    Delete,
    Stop,
}

/// Builds addressing arguments from a request's addressing and file references
#[derive(Clone, Copy, Debug)]
pub struct ResourceLocator<'a> {
    addressing: &'a AddressingSpec,
    files: &'a [String],
}

impl<'a> ResourceLocator<'a> {
    pub fn new(addressing: &'a AddressingSpec, descriptor: Option<&'a ResourceDescriptor>) -> Self {
        Self {
            addressing,
            files: descriptor
                .map(ResourceDescriptor::file_paths)
                .unwrap_or_default(),
        }
    }

    /// `--server`, `--v` and `--namespace`, attached to every invocation
    pub fn global_flags(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(server) = &self.addressing.server {
            args.push(format!("--server={}", server));
        }
        if self.addressing.log_level > 0 {
            args.push(format!("--v={}", self.addressing.log_level));
        }
        if let Some(namespace) = &self.addressing.namespace {
            args.push(format!("--namespace={}", namespace));
        }
        args
    }

    /// `--filename=<paths>`, or `<kind> [<name>] [--selector] [--all[-namespaces]] [--as]`
    pub fn search_flags(&self, operation: Operation) -> Result<Vec<String>> {
        if !self.files.is_empty() {
            return Ok(vec![filename_flag(self.files)]);
        }

        let Some(kind) = &self.addressing.kind else {
            return Err(ReconcileError::Config(
                "`kind` is required when no `filename` is given".to_string(),
            ));
        };

        let mut args = vec![kind.clone()];
        if let Some(name) = &self.addressing.name {
            args.push(name.clone());
        }
        if let Some(selector) = &self.addressing.selector {
            args.push(format!("--selector={}", selector));
        }
        if self.addressing.all {
            args.push(
                match operation {
                    Operation::Read => flags::ALL_NAMESPACES,
                    Operation::Delete | Operation::Stop => flags::ALL,
                }
                .to_string(),
            );
        }
        if let Some(identity) = &self.addressing.as_user {
            args.push(impersonation_flag(identity));
        }
        Ok(args)
    }
}

pub(crate) fn impersonation_flag(identity: &str) -> String {
    format!("--as={}", identity)
}
