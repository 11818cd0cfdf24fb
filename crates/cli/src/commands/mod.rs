// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI surface: argument types and command implementations.

pub mod deploy;
pub mod pull;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "redock",
    about = "Replace running containers on a remote host with a freshly pulled image",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redeploy the configured containers, preserving their captured
    /// runtime configuration
    Deploy(DeployArgs),
    /// Pull the image on the target host without touching containers
    Pull(PullArgs),
}

/// Target host coordinates. Every flag falls back to the environment
/// variable the CI workflow sets; the private key is environment-only
/// (`PRIVATE_KEY`), key material does not belong on a command line.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Target host address [env: SERVER_ADDRESS]
    #[arg(long)]
    pub host: Option<String>,

    /// Login user [env: USERNAME]
    #[arg(long)]
    pub user: Option<String>,

    /// SSH port, default 22 [env: PORT]
    #[arg(long)]
    pub port: Option<u16>,
}

/// Where the image reference comes from: given directly, or resolved
/// against a release-metadata endpoint once per run.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image reference to deploy [env: IMAGE_URL]
    #[arg(long)]
    pub image: Option<String>,

    /// Release-metadata endpoint queried when no image is given
    /// [env: RESOLVE_URL]
    #[arg(long)]
    pub resolve_url: Option<String>,

    /// User-Agent header for the release-metadata query
    /// [env: USER_AGENT]
    #[arg(long)]
    pub user_agent: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub image: ImageArgs,

    /// Container names to redeploy, joined with `&`
    /// [env: CONTAINER_NAMES]
    #[arg(long)]
    pub containers: Option<String>,

    /// Host directory receiving `<name>_backup.json` recovery artifacts
    #[arg(long)]
    pub backup_dir: Option<String>,

    /// Wait between shadow removal and recreation, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub settle_ms: u64,

    /// Poll the container list until the shadow name is released
    /// instead of waiting a fixed delay
    #[arg(long)]
    pub settle_poll: bool,
}

#[derive(Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub image: ImageArgs,
}
