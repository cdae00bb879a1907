// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One rendered point of disagreement, as reported to the caller
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DiffEntry {
    pub path: String,
    pub before: String,
    pub after: String,
}

/// Result of one reconciliation pass
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub changed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diff: Vec<DiffEntry>,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            diff: Vec::new(),
        }
    }

    pub fn with_diff(mut self, diff: Vec<DiffEntry>) -> Self {
        self.diff = diff;
        self
    }

    /// Flags OR together, diff lists concatenate
    pub fn merge(mut self, other: Outcome) -> Self {
        self.changed |= other.changed;
        self.diff.extend(other.diff);
        self
    }
}

/// Accumulated outcomes of several reconciliations, keyed by object label
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub changed: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub objects: BTreeMap<String, Outcome>,
}

impl Report {
    pub fn single(label: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            changed: outcome.changed,
            objects: BTreeMap::from([(label.into(), outcome)]),
        }
    }

    /// Flags OR together, objects merge key-wise
    pub fn merge(mut self, other: Report) -> Self {
        self.changed |= other.changed;
        for (label, outcome) in other.objects {
            let merged = match self.objects.remove(&label) {
                Some(existing) => existing.merge(outcome),
                None => outcome,
            };
            self.objects.insert(label, merged);
        }
        self
    }
}
