// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciler - maps a desired state onto reads, dry-runs and writes issued
//! through the control-plane tool.

use crate::command::{CommandOutput, CommandRunner, Operation, ResourceLocator};
use crate::command::locator::impersonation_flag;
use crate::config::Config;
use crate::constants::flags;
use crate::error::{ReconcileError, Result};
use crate::payload::{inject_resource_version, live_resource_version};
use crate::types::{DesiredState, Outcome, ReconcileRequest, ResourceDescriptor};
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, info, instrument};

/// How an object is taken out of the cluster
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Removal {
    Delete,
    Stop,
}

impl Removal {
    fn verb(self) -> &'static str {
        match self {
            Removal::Delete => flags::DELETE,
            Removal::Stop => flags::STOP,
        }
    }

    fn operation(self) -> Operation {
        match self {
            Removal::Delete => Operation::Delete,
            Removal::Stop => Operation::Stop,
        }
    }
}

pub struct Reconciler<R> {
    pub(super) runner: R,
    pub(super) check_mode: bool,
    pub(super) report_diff: bool,
}

impl<R: CommandRunner> Reconciler<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            check_mode: false,
            report_diff: true,
        }
    }

    pub fn from_config(runner: R, config: &Config) -> Self {
        Self::new(runner)
            .with_check_mode(config.check_mode)
            .with_diff_report(config.report_diff)
    }

    /// Skip mutating commands and report them as changes
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    /// Keep the discrepancy list in `latest` outcomes
    pub fn with_diff_report(mut self, report_diff: bool) -> Self {
        self.report_diff = report_diff;
        self
    }

    /// Run one reconciliation pass for `request`
    #[instrument(skip(self, request), fields(state = %request.state, object = %request.label()))]
    pub async fn reconcile(&self, request: &ReconcileRequest) -> Result<Outcome> {
        if request.state.needs_payload() {
            request.require_descriptor()?;
        }

        let outcome = match request.state {
            DesiredState::Present => self.ensure_present(request).await?,
            DesiredState::Absent => self.ensure_removed(request, Removal::Delete).await?,
            DesiredState::Stopped => self.ensure_removed(request, Removal::Stop).await?,
            DesiredState::Latest => self.ensure_latest(request).await?,
            DesiredState::Reloaded => self.reload(request).await?,
        };

        info!(changed = outcome.changed, "Reconciliation finished");
        Ok(outcome)
    }

    async fn ensure_present(&self, request: &ReconcileRequest) -> Result<Outcome> {
        let locator = locator(request);
        if self.exists(&locator).await? {
            debug!("Object already exists");
            return Ok(Outcome::unchanged());
        }

        self.apply(request, &locator, request.require_descriptor()?)
            .await
    }

    async fn ensure_removed(&self, request: &ReconcileRequest, removal: Removal) -> Result<Outcome> {
        let locator = locator(request);
        let search = locator.search_flags(removal.operation())?;
        if !request.force && !self.exists(&locator).await? {
            debug!("Object does not exist, nothing to remove");
            return Ok(Outcome::unchanged());
        }

        let mut args = vec![removal.verb().to_string()];
        args.extend(search);
        if removal == Removal::Delete && request.ignore_not_found {
            args.push(flags::IGNORE_NOT_FOUND.to_string());
        }

        if self.check_mode {
            info!("Check mode: skipping {}", removal.verb());
            return Ok(Outcome::changed());
        }

        self.execute_checked(&locator, args, None).await?;
        info!(verb = removal.verb(), "Object removed");
        Ok(Outcome::changed())
    }

    async fn reload(&self, request: &ReconcileRequest) -> Result<Outcome> {
        let locator = locator(request);
        let descriptor = request.require_descriptor()?;

        let descriptor = match self.fetch_live(&locator).await? {
            Some(live) => with_resource_version(descriptor, &live),
            None => Cow::Borrowed(descriptor),
        };
        self.apply(request, &locator, &descriptor).await
    }

    /// Quiet read; any non-zero exit status counts as "does not exist"
    pub(super) async fn exists(&self, locator: &ResourceLocator<'_>) -> Result<bool> {
        let mut args = vec![flags::GET.to_string(), flags::NO_HEADERS.to_string()];
        args.extend(locator.search_flags(Operation::Read)?);

        let output = self.execute(locator, args, None).await?;
        if !output.success() {
            debug!("Existence probe failed: {}", output.stderr.trim());
        }
        Ok(output.success())
    }

    /// The live object as a tree, or `None` when the read fails
    pub(super) async fn fetch_live(&self, locator: &ResourceLocator<'_>) -> Result<Option<Value>> {
        let mut args = vec![
            flags::GET.to_string(),
            flags::NO_HEADERS.to_string(),
            flags::OUTPUT.to_string(),
            flags::JSON.to_string(),
        ];
        args.extend(locator.search_flags(Operation::Read)?);

        let output = self.execute(locator, args, None).await?;
        if !output.success() {
            debug!("Live state read failed: {}", output.stderr.trim());
            return Ok(None);
        }

        serde_json::from_str(&output.stdout)
            .map(Some)
            .map_err(|source| ReconcileError::MalformedOutput {
                operation: "live state read",
                source,
            })
    }

    /// Idempotent create-or-replace of the payload
    pub(super) async fn apply(
        &self,
        request: &ReconcileRequest,
        locator: &ResourceLocator<'_>,
        descriptor: &ResourceDescriptor,
    ) -> Result<Outcome> {
        let mut args = vec![flags::APPLY.to_string()];
        if request.force {
            args.push(flags::FORCE.to_string());
        }
        if let Some(identity) = &request.addressing.as_user {
            args.push(impersonation_flag(identity));
        }
        args.extend(descriptor.source_args());

        if self.check_mode {
            info!("Check mode: skipping apply");
            return Ok(Outcome::changed());
        }

        self.execute_checked(locator, args, descriptor.stdin())
            .await?;
        info!("Object applied");
        Ok(Outcome::changed())
    }

    pub(super) async fn execute(
        &self,
        locator: &ResourceLocator<'_>,
        args: Vec<String>,
        stdin: Option<&[u8]>,
    ) -> Result<CommandOutput> {
        let mut command = locator.global_flags();
        command.extend(args);
        self.runner.execute(&command, stdin).await
    }

    /// Like `execute`, but a non-zero exit status is fatal
    pub(super) async fn execute_checked(
        &self,
        locator: &ResourceLocator<'_>,
        args: Vec<String>,
        stdin: Option<&[u8]>,
    ) -> Result<CommandOutput> {
        let mut command = locator.global_flags();
        command.extend(args);
        let output = self.runner.execute(&command, stdin).await?;
        if output.success() {
            return Ok(output);
        }

        Err(ReconcileError::CommandFailed {
            command: self.runner.display(&command),
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

pub(super) fn locator(request: &ReconcileRequest) -> ResourceLocator<'_> {
    ResourceLocator::new(&request.addressing, request.descriptor.as_ref())
}

/// The descriptor with the live object's concurrency token spliced into its
/// metadata, when there is both a token and inline text to patch
pub(super) fn with_resource_version<'d>(
    descriptor: &'d ResourceDescriptor,
    live: &Value,
) -> Cow<'d, ResourceDescriptor> {
    let Some(token) = live_resource_version(live) else {
        return Cow::Borrowed(descriptor);
    };
    let Some(content) = descriptor.content() else {
        debug!("Payload is file-addressed, not injecting resourceVersion");
        return Cow::Borrowed(descriptor);
    };

    match inject_resource_version(content, &token) {
        Cow::Owned(patched) => {
            debug!("Injected resourceVersion {}", token);
            Cow::Owned(ResourceDescriptor::inline(patched))
        }
        Cow::Borrowed(_) => Cow::Borrowed(descriptor),
    }
}
