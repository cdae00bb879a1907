// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{ReconcileError, Result};
use crate::types::{AddressingSpec, DesiredState, ResourceDescriptor};

/// Everything one reconciliation pass needs. Immutable for the duration of the pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileRequest {
    pub state: DesiredState,
    pub addressing: AddressingSpec,
    pub descriptor: Option<ResourceDescriptor>,
    /// Force apply; skip the existence check before delete/stop
    pub force: bool,
    /// Let delete succeed when the object is already gone
    pub ignore_not_found: bool,
}

impl ReconcileRequest {
    pub fn new(state: DesiredState, addressing: AddressingSpec) -> Self {
        Self {
            state,
            addressing,
            descriptor: None,
            force: false,
            ignore_not_found: false,
        }
    }

    pub fn with_descriptor(mut self, descriptor: ResourceDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }

    /// The payload to write, or a configuration error for modes that need one
    pub fn require_descriptor(&self) -> Result<&ResourceDescriptor> {
        self.descriptor.as_ref().ok_or_else(|| {
            ReconcileError::Config(format!(
                "state `{}` requires either `content` or `filename`",
                self.state
            ))
        })
    }

    /// Identity used in logs and as report key
    pub fn label(&self) -> String {
        match &self.descriptor {
            Some(d) if self.addressing.kind.is_none() && !d.file_paths().is_empty() => {
                d.file_paths().join(",")
            }
            _ => self.addressing.label(),
        }
    }
}
