// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation of one object against the live cluster.

mod latest;
pub mod reconciler;

pub use reconciler::Reconciler;
