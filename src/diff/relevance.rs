// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Discrepancies the platform produces itself and that must not count as drift.

use crate::constants::image_trigger::{CONTAINERS, DIGEST_MARKER, IMAGE};
use crate::diff::{DiffPoint, PathSegment};

/// True for a container `image` that an image trigger has pinned to a digest
/// (`...containers.<n>.image` is `repo@sha256:...` live while the desired value
/// is a plain tag).
pub fn is_irrelevant(point: &DiffPoint) -> bool {
    let path = &point.path;
    if path.len() <= 3 {
        return false;
    }
    let under_containers = matches!(&path[path.len() - 3], PathSegment::Key(k) if k == CONTAINERS);
    let is_image = matches!(&path[path.len() - 1], PathSegment::Key(k) if k == IMAGE);
    if !under_containers || !is_image {
        return false;
    }

    let live_pinned = point.live.as_str().is_some_and(|s| s.contains(DIGEST_MARKER));
    let desired_pinned = point.desired.as_str().is_some_and(|s| s.contains(DIGEST_MARKER));
    live_pinned && !desired_pinned
}
