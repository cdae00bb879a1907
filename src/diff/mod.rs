// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Drift detection between a dry-run render and the live object.

pub mod engine;
pub mod relevance;

pub use engine::{diff_points, is_satisfied, is_satisfied_ignoring, DiffPoint, PathSegment};
pub use relevance::is_irrelevant;
