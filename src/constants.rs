// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Default control-plane tool, looked up on `PATH` when `OC_BINARY` is unset
pub const DEFAULT_BINARY: &str = "oc";

/// Extra directories searched for the control-plane tool after `PATH`
pub const EXTRA_BINARY_DIRS: &[&str] = &["/opt/bin"];

/// Flags and subcommands understood by the control-plane tool
pub mod flags {
    pub const APPLY: &str = "apply";
    pub const CREATE: &str = "create";
    pub const DELETE: &str = "delete";
    pub const GET: &str = "get";
    pub const STOP: &str = "stop";

    pub const DRY_RUN: &str = "--dry-run";
    pub const FORCE: &str = "--force";
    pub const IGNORE_NOT_FOUND: &str = "--ignore-not-found";
    pub const NO_HEADERS: &str = "--no-headers";
    pub const OUTPUT: &str = "-o";
    pub const JSON: &str = "json";
    pub const STDIN_FILE: &[&str] = &["-f", "-"];
    pub const ALL: &str = "--all";
    pub const ALL_NAMESPACES: &str = "--all-namespaces";
}

/// Object metadata field names
pub mod metadata {
    pub const METADATA: &str = "metadata";
    pub const RESOURCE_VERSION: &str = "resourceVersion";
}

/// Shape of a discrepancy the platform produces itself when an image trigger
/// has pinned a container image to its digest
pub mod image_trigger {
    pub const CONTAINERS: &str = "containers";
    pub const IMAGE: &str = "image";
    pub const DIGEST_MARKER: &str = "@sha256:";
}

/// Diff path reported when `latest` has to create the object
pub const NON_EXISTENT: &str = "(non-existent)";
