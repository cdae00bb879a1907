// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The control-plane tool: process execution and object addressing.

pub mod locator;
pub mod runner;

pub use locator::{Operation, ResourceLocator};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
