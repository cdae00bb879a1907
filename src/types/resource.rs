// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::flags;
use crate::error::{ReconcileError, Result};

/// Where the desired state of an object comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// One or more definition files, handed to the tool by path
    Files(Vec<String>),
    /// Serialized object text, handed to the tool on standard input
    Inline(String),
}

/// The desired state of one cluster object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    payload: Payload,
}

impl ResourceDescriptor {
    pub fn files<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            payload: Payload::Files(
                paths
                    .into_iter()
                    .map(|p| p.as_ref().trim().to_string())
                    .collect(),
            ),
        }
    }

    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            payload: Payload::Inline(content.into()),
        }
    }

    /// Build a descriptor from optional file references and optional inline content.
    /// Returns `None` when neither is given; giving both is a configuration error.
    pub fn from_parts(files: Vec<String>, content: Option<String>) -> Result<Option<Self>> {
        match (files.is_empty(), content) {
            (false, Some(_)) => Err(ReconcileError::Config(
                "`filename` and `content` are mutually exclusive".to_string(),
            )),
            (false, None) => Ok(Some(Self::files(files))),
            (true, Some(content)) => Ok(Some(Self::inline(content))),
            (true, None) => Ok(None),
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// File references, empty for inline payloads
    pub fn file_paths(&self) -> &[String] {
        match &self.payload {
            Payload::Files(paths) => paths,
            Payload::Inline(_) => &[],
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.payload {
            Payload::Inline(content) => Some(content),
            Payload::Files(_) => None,
        }
    }

    /// Arguments that hand the payload to the tool: `-f -` or `--filename=<paths>`
    pub fn source_args(&self) -> Vec<String> {
        match &self.payload {
            Payload::Inline(_) => flags::STDIN_FILE.iter().map(|s| s.to_string()).collect(),
            Payload::Files(paths) => vec![filename_flag(paths)],
        }
    }

    /// Bytes to feed on standard input alongside `source_args`
    pub fn stdin(&self) -> Option<&[u8]> {
        self.content().map(str::as_bytes)
    }

    /// Human-readable form of the payload for diagnostics
    pub fn describe(&self) -> String {
        match &self.payload {
            Payload::Inline(content) => content.clone(),
            Payload::Files(paths) => paths.join(","),
        }
    }
}

pub(crate) fn filename_flag(paths: &[String]) -> String {
    format!("--filename={}", paths.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_rejects_both() {
        let result = ResourceDescriptor::from_parts(
            vec!["a.yaml".to_string()],
            Some("kind: Pod".to_string()),
        );
        assert!(matches!(result, Err(ReconcileError::Config(_))));
    }

    #[test]
    fn test_from_parts_neither_is_none() {
        assert!(ResourceDescriptor::from_parts(vec![], None).unwrap().is_none());
    }

    #[test]
    fn test_files_are_trimmed_and_joined() {
        let descriptor = ResourceDescriptor::files([" a.yaml", "b.yaml "]);
        assert_eq!(descriptor.source_args(), vec!["--filename=a.yaml,b.yaml"]);
        assert!(descriptor.stdin().is_none());
    }

    #[test]
    fn test_inline_goes_through_stdin() {
        let descriptor = ResourceDescriptor::inline("kind: Pod\n");
        assert_eq!(descriptor.source_args(), vec!["-f", "-"]);
        assert_eq!(descriptor.stdin(), Some("kind: Pod\n".as_bytes()));
        assert!(descriptor.file_paths().is_empty());
    }
}
