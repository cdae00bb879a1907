// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object identity (`kind`, name, namespace) carried inside an inline payload.

use crate::error::Result;
use crate::types::AddressingSpec;
use kube::core::ObjectMeta;
use serde::Deserialize;

#[derive(Deserialize)]
struct IdentityFields {
    kind: Option<String>,
    #[serde(default)]
    metadata: ObjectMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectIdentity {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
}

impl ObjectIdentity {
    /// Read the identity of the first object in a YAML (or JSON) payload
    pub fn from_payload(content: &str) -> Result<Self> {
        let Some(document) = serde_yaml::Deserializer::from_str(content).next() else {
            return Ok(Self::default());
        };
        let Some(fields) = Option::<IdentityFields>::deserialize(document)? else {
            return Ok(Self::default());
        };

        Ok(Self {
            kind: fields.kind,
            name: fields.metadata.name,
            namespace: fields.metadata.namespace,
        })
    }

    /// Fill the addressing from this identity; fields found in the payload win
    pub fn apply_to(self, addressing: &mut AddressingSpec) {
        if self.kind.is_some() {
            addressing.kind = self.kind;
        }
        if self.name.is_some() {
            addressing.name = self.name;
        }
        if self.namespace.is_some() {
            addressing.namespace = self.namespace;
        }
    }
}
