// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// How to locate objects for reads, deletes and stops. Never used to build a
/// write payload.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressingSpec {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    /// Label selector
    pub selector: Option<String>,
    /// All objects of the kind (delete/stop) or all namespaces (reads)
    pub all: bool,
    /// Identity to impersonate
    pub as_user: Option<String>,
    /// API server endpoint
    pub server: Option<String>,
    /// Tool verbosity, omitted when zero
    pub log_level: u32,
}

impl AddressingSpec {
    pub fn for_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Short `kind/namespace/name` label used in logs and report keys
    pub fn label(&self) -> String {
        let mut parts = vec![self.kind.as_deref().unwrap_or("?")];
        if let Some(namespace) = &self.namespace {
            parts.push(namespace);
        }
        if let Some(name) = &self.name {
            parts.push(name);
        } else if let Some(selector) = &self.selector {
            parts.push(selector);
        }
        parts.join("/")
    }
}
