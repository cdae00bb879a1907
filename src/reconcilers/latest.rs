// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The `latest` state: write only when the live object has drifted from what
//! the payload renders to.

use super::reconciler::{locator, with_resource_version, Reconciler};
use crate::command::{CommandRunner, ResourceLocator};
use crate::constants::{flags, NON_EXISTENT};
use crate::diff::{diff_points, is_irrelevant, is_satisfied_ignoring, DiffPoint};
use crate::error::{ReconcileError, Result};
use crate::types::{DiffEntry, Outcome, ReconcileRequest, ResourceDescriptor};
use serde_json::Value;
use tracing::{debug, info};

impl<R: CommandRunner> Reconciler<R> {
    pub(super) async fn ensure_latest(&self, request: &ReconcileRequest) -> Result<Outcome> {
        let locator = locator(request);
        let descriptor = request.require_descriptor()?;

        let Some(live) = self.fetch_live(&locator).await? else {
            info!("Object does not exist, creating it");
            let outcome = self.apply(request, &locator, descriptor).await?;
            return Ok(if self.report_diff {
                outcome.with_diff(vec![DiffEntry {
                    path: NON_EXISTENT.to_string(),
                    before: String::new(),
                    after: descriptor.describe(),
                }])
            } else {
                outcome
            });
        };

        let desired = self.render_dry_run(&locator, descriptor).await?;

        let diff = if self.report_diff {
            let points: Vec<DiffPoint> = diff_points(&desired, &live)
                .into_iter()
                .filter(|p| !is_irrelevant(p))
                .collect();
            if points.is_empty() {
                debug!("Live object is up to date");
                return Ok(Outcome::unchanged());
            }
            for point in &points {
                debug!(path = %point.dotted_path(), "Live object differs");
            }
            points.iter().map(DiffPoint::to_entry).collect()
        } else {
            if is_satisfied_ignoring(&desired, &live, is_irrelevant) {
                debug!("Live object is up to date");
                return Ok(Outcome::unchanged());
            }
            Vec::new()
        };
        info!("Live object has drifted, updating it");

        let descriptor = with_resource_version(descriptor, &live);
        Ok(self
            .apply(request, &locator, &descriptor)
            .await?
            .with_diff(diff))
    }

    /// What the payload becomes after server-side defaulting, without persisting it
    async fn render_dry_run(
        &self,
        locator: &ResourceLocator<'_>,
        descriptor: &ResourceDescriptor,
    ) -> Result<Value> {
        let mut args = vec![
            flags::CREATE.to_string(),
            flags::DRY_RUN.to_string(),
            flags::OUTPUT.to_string(),
            flags::JSON.to_string(),
        ];
        args.extend(descriptor.source_args());

        let output = self
            .execute_checked(locator, args, descriptor.stdin())
            .await?;
        serde_json::from_str(&output.stdout).map_err(|source| ReconcileError::MalformedOutput {
            operation: "dry-run render",
            source,
        })
    }
}
