// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation mode a reconciliation runs in.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Create the object if it does not exist, never update it
    Present,
    /// Delete the object if it exists
    Absent,
    /// Create the object, or update it when the live state has drifted
    #[default]
    Latest,
    /// Write the object unconditionally
    Reloaded,
    /// Stop the object if it exists
    Stopped,
}

impl DesiredState {
    /// Whether this mode writes the resource payload (as opposed to removing objects)
    pub fn needs_payload(self) -> bool {
        matches!(self, Self::Present | Self::Latest | Self::Reloaded)
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Latest => "latest",
            Self::Reloaded => "reloaded",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_latest() {
        assert_eq!(DesiredState::default(), DesiredState::Latest);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let state: DesiredState = serde_yaml::from_str("stopped").unwrap();
        assert_eq!(state, DesiredState::Stopped);
    }

    #[test]
    fn test_deserialize_unknown_state_fails() {
        assert!(serde_yaml::from_str::<DesiredState>("restarted").is_err());
    }

    #[test]
    fn test_needs_payload() {
        assert!(DesiredState::Present.needs_payload());
        assert!(DesiredState::Latest.needs_payload());
        assert!(DesiredState::Reloaded.needs_payload());
        assert!(!DesiredState::Absent.needs_payload());
        assert!(!DesiredState::Stopped.needs_payload());
    }
}
