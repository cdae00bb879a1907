// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod addressing;
pub mod kinds;
pub mod outcome;
pub mod request;
pub mod resource;
pub mod state;
pub mod task;

pub use addressing::AddressingSpec;
pub use outcome::{DiffEntry, Outcome, Report};
pub use request::ReconcileRequest;
pub use resource::{Payload, ResourceDescriptor};
pub use state::DesiredState;
pub use task::TaskSpec;
