// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `redock pull` — fetch the image on the target host, nothing more.

use crate::commands::PullArgs;
use crate::config::PullConfig;
use anyhow::{bail, Result};
use redock_core::docker;
use redock_engine::redeploy::validate_image_reference;
use redock_session::{RemoteSession, SshSession};
use tracing::{info, warn};

pub async fn pull(args: PullArgs) -> Result<()> {
    let config = PullConfig::load(&args)?;
    let image = super::deploy::resolve(&config.image).await?;
    validate_image_reference(&image)?;

    let session = SshSession::connect(config.connection.session()).await?;
    info!(%image, "pulling image");
    let output = session.execute(&docker::pull(&image).render()).await?;
    if !output.stdout.trim().is_empty() {
        info!(stdout = %output.stdout.trim(), "pull output");
    }
    if !output.stderr.trim().is_empty() {
        warn!(stderr = %output.stderr.trim(), "pull stderr");
    }
    if !output.success() {
        bail!("docker pull exited with status {}", output.status);
    }
    println!("pulled {image}");
    Ok(())
}
