// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration snapshot extraction and the recovery artifact.

use crate::error::DeployError;
use redock_core::docker;
use redock_core::inspect::{parse_inspect_output, InspectPayload};
use redock_session::RemoteSession;
use tracing::{info, warn};

/// A captured inspection: the parsed payload plus the raw JSON exactly
/// as the host printed it (the recovery artifact is written verbatim).
#[derive(Debug, Clone)]
pub struct Inspection {
    pub payload: InspectPayload,
    pub raw: String,
}

/// Inspect a named container over the session.
///
/// `NotFound` when the host returned no data for the name — absent
/// container, or one already removed by a concurrent actor.
pub async fn inspect_container(
    session: &dyn RemoteSession,
    name: &str,
) -> Result<Inspection, DeployError> {
    let output = session.execute(&docker::inspect(name).render()).await?;
    let payload = parse_inspect_output(&output.stdout)
        .map_err(|source| DeployError::Parse { name: name.to_string(), source })?;
    match payload {
        Some(payload) => Ok(Inspection { payload, raw: output.stdout }),
        None => Err(DeployError::NotFound(name.to_string())),
    }
}

/// Persist the raw inspection payload to the recovery path.
///
/// Written before any destructive step, one file per container. This
/// is documentation for a human operator — nothing reads it back — so
/// a failed write logs a warning and the run continues.
pub async fn persist_backup(
    session: &dyn RemoteSession,
    backup_dir: &str,
    name: &str,
    raw: &str,
) {
    let path = backup_path(backup_dir, name);
    match session.write_file(&path, raw.as_bytes()).await {
        Ok(()) => info!(container = name, %path, "container settings backed up"),
        Err(e) => warn!(container = name, %path, error = %e, "backup write failed, continuing"),
    }
}

pub fn backup_path(backup_dir: &str, name: &str) -> String {
    format!("{}/{}_backup.json", backup_dir.trim_end_matches('/'), name)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
