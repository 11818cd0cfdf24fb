// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The redeployment orchestrator.
//!
//! One state machine per container, run strictly sequentially across
//! the batch: backup, pull, rename to a shadow name, re-inspect the
//! shadow for the canonical descriptor, remove the shadow, wait for
//! the engine to release the name, force-remove any stale shadow left
//! by a prior failed run, then create the replacement under the
//! original name. A failed container never aborts the rest of the
//! batch, and images are pruned once at the end regardless of
//! outcomes.
//!
//! There is deliberately no recovery path: once the shadow is gone, a
//! failed creation leaves the host without a container under that
//! name until someone intervenes with the backup JSON in hand.

use crate::cleanup;
use crate::error::DeployError;
use crate::snapshot::{inspect_container, persist_backup};
use redock_core::{allocate_shadow_name, docker, parse_name_list, RecreatePlan};
use redock_session::RemoteSession;
use std::fmt;
use std::time::Duration;
use tracing::{error, info, warn};

/// How the orchestrator waits between shadow removal and recreation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleMode {
    /// Fixed wait for the engine to release name and resources.
    Delay(Duration),
    /// Poll the container list until the shadow name is gone, bounded
    /// by `max_attempts` checks spaced by `interval`. A deviation from
    /// the fixed wait, opt-in via configuration.
    PollUntilAbsent { interval: Duration, max_attempts: u32 },
}

impl Default for SettleMode {
    fn default() -> Self {
        Self::Delay(Duration::from_secs(10))
    }
}

/// Per-run settings for the orchestrator.
#[derive(Debug, Clone)]
pub struct RedeployConfig {
    /// Image reference every replacement container is created from.
    pub image: String,
    /// Directory on the host receiving `<name>_backup.json` artifacts.
    pub backup_dir: String,
    pub settle: SettleMode,
}

/// Final state of one container in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Replacement created under the original name.
    Redeployed,
    /// Container absent at inspection time; nothing was touched.
    Skipped,
    /// Processing aborted mid-machine; the reason is already logged.
    Failed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redeployed => write!(f, "redeployed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerOutcome {
    pub container: String,
    pub outcome: Outcome,
}

/// Per-container outcomes for a whole run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ContainerOutcome>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o.outcome, Outcome::Failed(_))).count()
    }

    pub fn redeployed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome == Outcome::Redeployed).count()
    }
}

/// Drives redeployment of a batch of containers over one session.
pub struct Redeployer<'a> {
    session: &'a dyn RemoteSession,
    config: RedeployConfig,
}

impl<'a> Redeployer<'a> {
    pub fn new(session: &'a dyn RemoteSession, config: RedeployConfig) -> Self {
        Self { session, config }
    }

    /// Process every container name in order, then prune unused
    /// images. Names are trimmed; empty entries are dropped.
    pub async fn run(&self, containers: &[String]) -> BatchReport {
        let mut report = BatchReport::default();
        for raw_name in containers {
            let name = raw_name.trim();
            if name.is_empty() {
                continue;
            }
            info!(container = name, "processing container");
            let outcome = match self.redeploy_one(name).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(container = name, error = %e, "container redeployment failed");
                    Outcome::Failed(e.to_string())
                }
            };
            report.outcomes.push(ContainerOutcome { container: name.to_string(), outcome });
        }

        cleanup::prune_images(self.session).await;
        report
    }

    /// The per-container state machine.
    async fn redeploy_one(&self, name: &str) -> Result<Outcome, DeployError> {
        // Inspect the live container and persist the recovery artifact
        // before anything destructive happens. An absent container
        // skips the batch entry, nothing more.
        let original = match inspect_container(self.session, name).await {
            Ok(inspection) => inspection,
            Err(DeployError::NotFound(_)) => {
                warn!(container = name, "no inspection data, skipping");
                return Ok(Outcome::Skipped);
            }
            Err(e) => return Err(e),
        };
        persist_backup(self.session, &self.config.backup_dir, name, &original.raw).await;

        self.pull_image(name).await?;

        // Vacate the original name. The allocator walks past leftovers
        // from prior failed runs, so the rename target is always free.
        let existing = self.list_names().await?;
        let shadow = allocate_shadow_name(name, &existing);
        let rename = self.run_command(&docker::rename(name, &shadow).render()).await?;
        if !rename.success() {
            warn!(container = name, %shadow, stderr = %rename.stderr.trim(), "rename failed");
        }

        // The shadow's descriptor is the canonical input to the plan —
        // it supersedes the pre-rename copy. Losing it here means the
        // container cannot be reconstructed, so this aborts the entry.
        let canonical = inspect_container(self.session, &shadow).await.map_err(|e| {
            error!(container = name, %shadow, error = %e, "shadow re-inspection failed");
            e
        })?;
        let descriptor = canonical.payload.into_descriptor(name);

        let removal = self.run_command(&docker::remove(&shadow).render()).await?;
        if !removal.success() {
            warn!(%shadow, stderr = %removal.stderr.trim(), "shadow removal failed, continuing");
        }

        self.settle(&shadow).await?;

        // A shadow still listed here survived removal (or a prior
        // run's leftover reclaimed the name) — force it out before the
        // name is reused.
        let remaining = self.list_names().await?;
        if remaining.iter().any(|n| n == &shadow) {
            info!(%shadow, "stale shadow container present, force-removing");
            let forced = self.run_command(&docker::remove_force(&shadow).render()).await?;
            if !forced.success() {
                warn!(%shadow, stderr = %forced.stderr.trim(), "force removal failed");
            }
        }

        let plan = RecreatePlan::build(&descriptor, &self.config.image);
        let command = plan.command_line().render();
        let created = self.run_command(&command).await?;
        if !created.success() {
            // No recovery: the shadow is already gone. The host has no
            // container under this name until manual intervention.
            error!(
                container = name,
                status = created.status,
                stderr = %created.stderr.trim(),
                "container creation failed, no automatic recovery"
            );
            return Err(DeployError::command(command, created.status, &created.stderr));
        }
        info!(container = name, id = %created.stdout.trim(), "container recreated");
        Ok(Outcome::Redeployed)
    }

    /// Pull the target image. A structurally invalid reference skips
    /// the pull with a warning — recreation is still attempted with
    /// the reference as configured. A failed pull is logged and
    /// likewise non-fatal; the create step decides what is fatal.
    async fn pull_image(&self, name: &str) -> Result<(), DeployError> {
        if let Err(e) = validate_image_reference(&self.config.image) {
            warn!(container = name, error = %e, "skipping pull");
            return Ok(());
        }
        let pulled = self.run_command(&docker::pull(&self.config.image).render()).await?;
        if pulled.success() {
            info!(image = %self.config.image, "image pulled");
        } else {
            warn!(
                image = %self.config.image,
                status = pulled.status,
                stderr = %pulled.stderr.trim(),
                "image pull failed, continuing with recreation"
            );
        }
        Ok(())
    }

    async fn settle(&self, shadow: &str) -> Result<(), DeployError> {
        match &self.config.settle {
            SettleMode::Delay(delay) => {
                info!(delay_ms = delay.as_millis() as u64, "waiting for engine to settle");
                tokio::time::sleep(*delay).await;
            }
            SettleMode::PollUntilAbsent { interval, max_attempts } => {
                for attempt in 1..=*max_attempts {
                    let names = self.list_names().await?;
                    if !names.iter().any(|n| n == shadow) {
                        return Ok(());
                    }
                    info!(%shadow, attempt, "shadow still present, polling");
                    tokio::time::sleep(*interval).await;
                }
                warn!(%shadow, "shadow still present after polling, proceeding to stale check");
            }
        }
        Ok(())
    }

    /// Current container names on the host. A non-zero `docker ps` is
    /// treated as an empty listing so the machine can proceed; the
    /// stderr is logged.
    async fn list_names(&self) -> Result<Vec<String>, DeployError> {
        let output = self.run_command(&docker::list_names().render()).await?;
        if !output.success() {
            warn!(status = output.status, stderr = %output.stderr.trim(), "listing containers failed");
            return Ok(Vec::new());
        }
        Ok(parse_name_list(&output.stdout))
    }

    /// Execute one command, surfacing its captured output through the
    /// log. Transport errors propagate; exit status is the caller's
    /// decision.
    async fn run_command(
        &self,
        command: &str,
    ) -> Result<redock_session::CommandOutput, DeployError> {
        let output = self.session.execute(command).await?;
        tracing::debug!(
            %command,
            status = output.status,
            stdout = %output.stdout.trim(),
            stderr = %output.stderr.trim(),
            "remote command finished"
        );
        Ok(output)
    }
}

/// An image reference must carry a registry/tag separator.
pub fn validate_image_reference(image: &str) -> Result<(), DeployError> {
    if image.is_empty() || !image.contains(':') {
        return Err(DeployError::InvalidImageReference(image.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "redeploy_tests.rs"]
mod tests;
