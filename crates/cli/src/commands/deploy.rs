// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `redock deploy` — the full batch redeployment run.

use crate::commands::DeployArgs;
use crate::config::{DeployConfig, ImageSource};
use anyhow::{anyhow, Result};
use redock_engine::{resolve_image, RedeployConfig, Redeployer};
use redock_session::SshSession;
use tracing::info;

pub async fn deploy(args: DeployArgs) -> Result<()> {
    // Fail closed: configuration and the image reference are settled
    // before anything touches the host.
    let config = DeployConfig::load(&args)?;
    let image = resolve(&config.image).await?;

    info!(
        host = %config.connection.host,
        %image,
        containers = config.containers.len(),
        "starting redeployment run"
    );

    let session = SshSession::connect(config.connection.session()).await?;
    let redeployer = Redeployer::new(
        &session,
        RedeployConfig {
            image,
            backup_dir: config.backup_dir.clone(),
            settle: config.settle.clone(),
        },
    );
    let report = redeployer.run(&config.containers).await;

    for entry in &report.outcomes {
        println!("{}: {}", entry.container, entry.outcome);
    }
    println!(
        "{} redeployed, {} failed, {} processed",
        report.redeployed(),
        report.failed(),
        report.outcomes.len()
    );
    Ok(())
}

/// Turn the configured image source into a concrete reference. An
/// endpoint that names no image is an unmet precondition — the run
/// ends here, before any remote operation.
pub(crate) async fn resolve(source: &ImageSource) -> Result<String> {
    match source {
        ImageSource::Direct(image) => Ok(image.clone()),
        ImageSource::Resolve { endpoint, user_agent } => resolve_image(endpoint, user_agent)
            .await?
            .ok_or_else(|| anyhow!("release metadata at {endpoint} named no image")),
    }
}
