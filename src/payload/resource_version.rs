// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Concurrency-token handling: read `metadata.resourceVersion` from a live object
//! and splice it into the payload text ahead of an update.
//!
//! The payload is patched textually so that comments, key order and formatting
//! of the operator's YAML survive untouched.

use crate::constants::metadata::{METADATA, RESOURCE_VERSION};
use kube::core::ObjectMeta;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Top-level `metadata:` line, any blank or comment lines below it, then the
/// indentation and first character of the first field in the block.
fn metadata_block() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?m)^(metadata:[ \t]*(?:#[^\n]*)?(\r?\n))((?:[ \t]*(?:#[^\n]*)?\r?\n)*)([ \t]+)(\w)",
        )
        .expect("metadata block pattern is valid")
    })
}

/// A YAML document start marker, optionally followed by content on the same line
fn document_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^---(?:[ \t][^\n]*)?\r?$").expect("document separator pattern is valid")
    })
}

/// The concurrency token of a live object, if it carries a non-empty one
pub fn live_resource_version(live: &Value) -> Option<String> {
    let metadata = live.get(METADATA)?;
    ObjectMeta::deserialize(metadata)
        .ok()?
        .resource_version
        .filter(|v| !v.is_empty())
}

/// Insert `resourceVersion: "<token>"` as the first field of the payload's
/// top-level metadata block, after any leading comment lines and at the block's
/// indentation. Payloads without a recognizable block, or that already declare
/// a resource version, come back unchanged.
pub fn inject_resource_version<'a>(payload: &'a str, token: &str) -> Cow<'a, str> {
    if token.is_empty() {
        return Cow::Borrowed(payload);
    }

    let Some(caps) = metadata_block().captures(payload) else {
        warn!("No top-level metadata block found, payload passed through without resourceVersion");
        return Cow::Borrowed(payload);
    };
    let Some(block) = caps.get(0) else {
        return Cow::Borrowed(payload);
    };

    // The existence check has to look at the document the block belongs to
    if declares_resource_version(enclosing_document(payload, block.start())) {
        debug!("Payload already declares a resourceVersion, leaving it as is");
        return Cow::Borrowed(payload);
    }

    // JSON string syntax is also a valid YAML double-quoted scalar
    let quoted = Value::String(token.to_string()).to_string();
    let indent = &caps[4];
    Cow::Owned(format!(
        "{}{}{}{}{}: {}{}{}{}{}",
        &payload[..block.start()],
        &caps[1],
        &caps[3],
        indent,
        RESOURCE_VERSION,
        quoted,
        &caps[2],
        indent,
        &caps[5],
        &payload[block.end()..]
    ))
}

/// The slice of a multi-document payload holding the byte at `offset`
fn enclosing_document(payload: &str, offset: usize) -> &str {
    let mut start = 0;
    let mut end = payload.len();
    for separator in document_separator().find_iter(payload) {
        if separator.end() <= offset {
            start = separator.end();
        } else {
            end = separator.start();
            break;
        }
    }
    &payload[start..end]
}

fn declares_resource_version(document: &str) -> bool {
    serde_yaml::from_str::<serde_yaml::Value>(document)
        .ok()
        .as_ref()
        .and_then(|v| v.get(METADATA))
        .and_then(|m| m.get(RESOURCE_VERSION))
        .is_some()
}
