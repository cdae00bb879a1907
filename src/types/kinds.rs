// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Closed mapping from object kind to the API version used when a payload omits it.

/// API version used for kinds not listed in [`API_VERSIONS`]
pub const FALLBACK_API_VERSION: &str = "v1";

/// Known kinds, matched case-insensitively
pub const API_VERSIONS: &[(&str, &str)] = &[
    ("ImageStream", "image.openshift.io/v1"),
    ("ImageStreamTag", "image.openshift.io/v1"),
    ("BuildConfig", "build.openshift.io/v1"),
    ("Route", "route.openshift.io/v1"),
    ("DeploymentConfig", "apps.openshift.io/v1"),
    ("Deployment", "apps/v1"),
    ("StatefulSet", "apps/v1"),
    ("DaemonSet", "apps/v1"),
    ("ReplicaSet", "apps/v1"),
    ("CronJob", "batch/v1"),
    ("Job", "batch/v1"),
];

pub fn api_version_for_kind(kind: &str) -> &'static str {
    API_VERSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(kind))
        .map_or(FALLBACK_API_VERSION, |(_, version)| version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openshift_kinds() {
        assert_eq!(api_version_for_kind("ImageStream"), "image.openshift.io/v1");
        assert_eq!(api_version_for_kind("buildconfig"), "build.openshift.io/v1");
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        assert_eq!(api_version_for_kind("ConfigMap"), FALLBACK_API_VERSION);
    }
}
