// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Inspection and patching of desired-state payload text.

pub mod identity;
pub mod resource_version;

pub use identity::ObjectIdentity;
pub use resource_version::{inject_resource_version, live_resource_version};
