// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Asymmetric structural comparison of a desired tree against a live tree.
//!
//! The live object satisfies the desired one when it is a superset of it down to
//! every leaf the desired tree specifies. Mapping keys only present on the live
//! side are ignored, sequences must match element-wise, and an empty sequence or
//! mapping on the desired side demands that the live side be empty or missing.

use crate::types::DiffEntry;
use serde_json::Value;
use std::fmt;
use std::ops::ControlFlow;

static NULL: Value = Value::Null;

/// One step of a path into a tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A point where the live tree does not satisfy the desired tree
#[derive(Clone, Debug, PartialEq)]
pub struct DiffPoint {
    pub path: Vec<PathSegment>,
    pub live: Value,
    pub desired: Value,
}

impl DiffPoint {
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn to_entry(&self) -> DiffEntry {
        DiffEntry {
            path: self.dotted_path(),
            before: render(&self.live),
            after: render(&self.desired),
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Every point where `live` fails to satisfy `desired`
pub fn diff_points(desired: &Value, live: &Value) -> Vec<DiffPoint> {
    let mut points = Vec::new();
    let _ = walk(desired, live, &mut Vec::new(), &mut |point| {
        points.push(point);
        ControlFlow::Continue(())
    });
    points
}

/// Whether `live` already satisfies `desired`, stopping at the first discrepancy
pub fn is_satisfied(desired: &Value, live: &Value) -> bool {
    is_satisfied_ignoring(desired, live, |_| false)
}

/// Like [`is_satisfied`], but discrepancies for which `ignore` holds do not count
pub fn is_satisfied_ignoring<F>(desired: &Value, live: &Value, ignore: F) -> bool
where
    F: Fn(&DiffPoint) -> bool,
{
    walk(desired, live, &mut Vec::new(), &mut |point| {
        if ignore(&point) {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })
    .is_continue()
}

fn walk(
    desired: &Value,
    live: &Value,
    path: &mut Vec<PathSegment>,
    visit: &mut dyn FnMut(DiffPoint) -> ControlFlow<()>,
) -> ControlFlow<()> {
    if desired == live {
        return ControlFlow::Continue(());
    }

    match (desired, live) {
        (Value::Array(d), _) if d.is_empty() => report_if(is_truthy(live), desired, live, path, visit),
        (Value::Object(d), _) if d.is_empty() => report_if(is_truthy(live), desired, live, path, visit),
        (Value::Array(d), Value::Array(l)) => {
            if d.len() != l.len() {
                return report(desired, live, path, visit);
            }
            for (index, (d, l)) in d.iter().zip(l).enumerate() {
                path.push(PathSegment::Index(index));
                let flow = walk(d, l, path, visit);
                path.pop();
                if flow.is_break() {
                    return flow;
                }
            }
            ControlFlow::Continue(())
        }
        (Value::Object(d), Value::Object(l)) => {
            for (key, d) in d {
                path.push(PathSegment::Key(key.clone()));
                let flow = walk(d, l.get(key).unwrap_or(&NULL), path, visit);
                path.pop();
                if flow.is_break() {
                    return flow;
                }
            }
            ControlFlow::Continue(())
        }
        _ => report(desired, live, path, visit),
    }
}

fn report_if(
    condition: bool,
    desired: &Value,
    live: &Value,
    path: &[PathSegment],
    visit: &mut dyn FnMut(DiffPoint) -> ControlFlow<()>,
) -> ControlFlow<()> {
    if condition {
        report(desired, live, path, visit)
    } else {
        ControlFlow::Continue(())
    }
}

fn report(
    desired: &Value,
    live: &Value,
    path: &[PathSegment],
    visit: &mut dyn FnMut(DiffPoint) -> ControlFlow<()>,
) -> ControlFlow<()> {
    visit(DiffPoint {
        path: path.to_vec(),
        live: live.clone(),
        desired: desired.clone(),
    })
}

/// Null, `false`, zero, and empty strings, sequences and mappings are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(segments: &[PathSegment]) -> Vec<PathSegment> {
        segments.to_vec()
    }

    #[test]
    fn test_equal_trees_have_no_diff() {
        let tree = json!({"spec": {"replicas": 2, "ports": [{"port": 80}]}});
        assert!(diff_points(&tree, &tree).is_empty());
        assert!(is_satisfied(&tree, &tree));
    }

    #[test]
    fn test_live_only_keys_are_ignored() {
        let desired = json!({"metadata": {"name": "a"}, "spec": {"replicas": 2}});
        let live = json!({
            "metadata": {"name": "a", "uid": "123", "resourceVersion": "9"},
            "spec": {"replicas": 2, "revisionHistoryLimit": 10},
            "status": {"readyReplicas": 2}
        });

        assert!(diff_points(&desired, &live).is_empty());
        assert!(is_satisfied(&desired, &live));
    }

    #[test]
    fn test_scalar_mismatch() {
        let desired = json!({"spec": {"replicas": 3}});
        let live = json!({"spec": {"replicas": 2}});

        let points = diff_points(&desired, &live);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].path, path(&["spec".into(), "replicas".into()]));
        assert_eq!(points[0].live, json!(2));
        assert_eq!(points[0].desired, json!(3));
        assert!(!is_satisfied(&desired, &live));
    }

    #[test]
    fn test_empty_mapping_requires_empty_live() {
        let desired = json!({"metadata": {"annotations": {}}});
        let live = json!({"metadata": {"annotations": {"a": "1", "b": "2"}}});

        let points = diff_points(&desired, &live);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].dotted_path(), "metadata.annotations");
    }

    #[test]
    fn test_empty_sequence_requires_empty_live() {
        let desired = json!({"spec": {"triggers": []}});
        let live = json!({"spec": {"triggers": [{"type": "ConfigChange"}, {"type": "ImageChange"}]}});

        let points = diff_points(&desired, &live);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].dotted_path(), "spec.triggers");
    }

    #[test]
    fn test_empty_collection_matches_missing_or_empty_live() {
        let desired = json!({"spec": {"triggers": [], "selector": {}}});
        assert!(diff_points(&desired, &json!({"spec": {}})).is_empty());
        assert!(diff_points(&desired, &json!({"spec": {"triggers": null, "selector": []}})).is_empty());
    }

    #[test]
    fn test_sequence_length_mismatch_does_not_descend() {
        let desired = json!({"ports": [{"port": 80}, {"port": 443}]});
        let live = json!({"ports": [{"port": 8080}]});

        let points = diff_points(&desired, &live);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].path, path(&["ports".into()]));
    }

    #[test]
    fn test_sequences_compare_pairwise() {
        let desired = json!({"containers": [{"name": "a", "image": "x"}, {"name": "b", "image": "y"}]});
        let live = json!({"containers": [
            {"name": "a", "image": "x", "imagePullPolicy": "Always"},
            {"name": "b", "image": "z"}
        ]});

        let points = diff_points(&desired, &live);

        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0].path,
            path(&["containers".into(), PathSegment::Index(1), "image".into()])
        );
    }

    #[test]
    fn test_missing_live_key_is_null() {
        let desired = json!({"spec": {"host": "example.com"}});
        let live = json!({"spec": {}});

        let points = diff_points(&desired, &live);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].live, Value::Null);
    }

    #[test]
    fn test_type_mismatch() {
        let points = diff_points(&json!({"a": [1]}), &json!({"a": {"0": 1}}));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].dotted_path(), "a");
    }

    #[test]
    fn test_desired_null_against_value() {
        let points = diff_points(&json!({"a": null}), &json!({"a": "set"}));
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_all_points_are_enumerated() {
        let desired = json!({"a": 1, "b": {"c": 2, "d": [1, 2]}, "e": {}});
        let live = json!({"a": 2, "b": {"c": 3, "d": [1]}, "e": {"x": true}});

        let paths: Vec<_> = diff_points(&desired, &live)
            .iter()
            .map(DiffPoint::dotted_path)
            .collect();

        assert_eq!(paths, vec!["a", "b.c", "b.d", "e"]);
    }

    #[test]
    fn test_is_satisfied_ignoring() {
        let desired = json!({"a": 1, "b": 2});
        let live = json!({"a": 5, "b": 2});

        assert!(!is_satisfied(&desired, &live));
        assert!(is_satisfied_ignoring(&desired, &live, |p| p.dotted_path() == "a"));
        assert!(!is_satisfied_ignoring(&desired, &live, |p| p.dotted_path() == "b"));
    }

    #[test]
    fn test_to_entry_renders_strings_raw() {
        let point = DiffPoint {
            path: path(&["spec".into(), "host".into()]),
            live: json!("old.example.com"),
            desired: json!({"k": 1}),
        };

        let entry = point.to_entry();

        assert_eq!(entry.path, "spec.host");
        assert_eq!(entry.before, "old.example.com");
        assert_eq!(entry.after, r#"{"k":1}"#);
    }
}
