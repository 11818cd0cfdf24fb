// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Post-batch image cleanup.

use redock_core::docker;
use redock_session::RemoteSession;
use tracing::{info, warn};

/// Prune unused images. Issued once after the whole batch, whatever
/// the per-container outcomes were; failures are logged, never fatal.
pub async fn prune_images(session: &dyn RemoteSession) {
    info!("pruning unused images");
    match session.execute(&docker::image_prune().render()).await {
        Ok(output) if output.success() => {
            info!(summary = %output.stdout.trim(), "image prune finished");
        }
        Ok(output) => {
            warn!(status = output.status, stderr = %output.stderr.trim(), "image prune failed");
        }
        Err(e) => warn!(error = %e, "image prune failed"),
    }
}
