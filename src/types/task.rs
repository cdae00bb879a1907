// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Task documents: the YAML the binary reads, one reconciliation per document.

use crate::error::{ReconcileError, Result};
use crate::payload::ObjectIdentity;
use crate::types::kinds::api_version_for_kind;
use crate::types::{AddressingSpec, DesiredState, ReconcileRequest, ResourceDescriptor};
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// One task. Control fields steer the reconciler; any other field is taken as
/// part of an object given inline (`apiVersion`, `metadata`, `spec`, ...).
#[derive(Deserialize, Debug, Default)]
pub struct TaskSpec {
    #[serde(default)]
    pub state: DesiredState,
    #[serde(alias = "resource")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    #[serde(
        default,
        alias = "files",
        alias = "file",
        alias = "filenames",
        deserialize_with = "file_list"
    )]
    pub filename: Vec<String>,
    pub content: Option<String>,
    #[serde(alias = "selector")]
    pub label: Option<String>,
    pub server: Option<String>,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub ignore_not_found: bool,
    #[serde(default)]
    pub log_level: u32,
    pub as_user: Option<String>,
    #[serde(flatten)]
    pub object: Mapping,
}

/// `filename` accepts a list or a comma-separated string
fn file_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Files {
        One(String),
        Many(Vec<String>),
    }

    let files = match Files::deserialize(deserializer)? {
        Files::One(list) => list.split(',').map(str::to_string).collect(),
        Files::Many(files) => files,
    };
    Ok(files
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect())
}

impl TaskSpec {
    /// Parse every non-empty document of a multi-document YAML stream
    pub fn parse_all(text: &str) -> Result<Vec<TaskSpec>> {
        let mut tasks = Vec::new();
        for document in serde_yaml::Deserializer::from_str(text) {
            if let Some(task) = Option::<TaskSpec>::deserialize(document)? {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    pub fn into_request(self) -> Result<ReconcileRequest> {
        let mut addressing = AddressingSpec {
            kind: self.kind,
            name: self.name,
            namespace: self.namespace,
            selector: self.label,
            all: self.all,
            as_user: self.as_user,
            server: self.server,
            log_level: self.log_level,
        };

        let content = match self.content {
            Some(content) => {
                if !self.object.is_empty() {
                    return Err(ReconcileError::Config(
                        "object fields cannot be combined with `content`".to_string(),
                    ));
                }
                ObjectIdentity::from_payload(&content)?.apply_to(&mut addressing);
                Some(content)
            }
            None if self.object.is_empty() => None,
            None if !self.filename.is_empty() => {
                return Err(ReconcileError::Config(
                    "object fields cannot be combined with `filename`".to_string(),
                ));
            }
            None => Some(render_object(self.object, &mut addressing)?),
        };

        let descriptor = ResourceDescriptor::from_parts(self.filename, content)?;
        Ok(ReconcileRequest {
            state: self.state,
            addressing,
            descriptor,
            force: self.force,
            ignore_not_found: self.ignore_not_found,
        })
    }
}

/// Serialize an inline object, completing `kind` and `apiVersion` and picking
/// its name and namespace up for addressing
fn render_object(object: Mapping, addressing: &mut AddressingSpec) -> Result<String> {
    let mut rendered = Mapping::new();
    if let Some(kind) = &addressing.kind {
        let api_version = object
            .get("apiVersion")
            .cloned()
            .unwrap_or_else(|| Value::from(api_version_for_kind(kind)));
        rendered.insert(Value::from("apiVersion"), api_version);
        rendered.insert(Value::from("kind"), Value::from(kind.as_str()));
    }
    for (key, value) in object {
        if !rendered.contains_key(&key) {
            rendered.insert(key, value);
        }
    }

    if let Some(metadata) = rendered.get("metadata") {
        if let Some(name) = metadata.get("name").and_then(Value::as_str) {
            addressing.name = Some(name.to_string());
        }
        if let Some(namespace) = metadata.get("namespace").and_then(Value::as_str) {
            addressing.namespace = Some(namespace.to_string());
        }
    }

    Ok(serde_yaml::to_string(&Value::Mapping(rendered))?)
}
