// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration assembled from flags and the environment.
//!
//! Flags win over environment variables; the variable names are the
//! ones the CI workflow has always set. Validation is fail-closed: a
//! missing mandatory input aborts the run before any connection
//! attempt, and empty environment values count as unset.

use crate::commands::{ConnectionArgs, DeployArgs, ImageArgs, PullArgs};
use redock_engine::SettleMode;
use redock_session::SessionConfig;
use std::time::Duration;
use thiserror::Error;

/// Poll-mode settling checks the name list this many times, spaced
/// evenly across the configured settle window.
const SETTLE_POLL_ATTEMPTS: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required input: {0} (environment variable or flag)")]
    Missing(&'static str),
    #[error("invalid port value: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub user: String,
    pub port: u16,
    pub private_key: String,
}

impl ConnectionConfig {
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            host: self.host.clone(),
            user: self.user.clone(),
            port: self.port,
            private_key: self.private_key.clone(),
        }
    }
}

/// The image reference is either supplied directly or resolved from
/// the release-metadata endpoint once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Direct(String),
    Resolve { endpoint: String, user_agent: String },
}

#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub connection: ConnectionConfig,
    pub containers: Vec<String>,
    pub image: ImageSource,
    pub backup_dir: String,
    pub settle: SettleMode,
}

impl DeployConfig {
    pub fn load(args: &DeployArgs) -> Result<Self, ConfigError> {
        Self::from_lookup(args, env_lookup)
    }

    fn from_lookup(
        args: &DeployArgs,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = non_empty(lookup);
        let connection = connection_from(&args.connection, &lookup)?;

        let joined = args
            .containers
            .clone()
            .or_else(|| lookup("CONTAINER_NAMES"))
            .ok_or(ConfigError::Missing("CONTAINER_NAMES"))?;
        let containers = split_container_names(&joined);
        if containers.is_empty() {
            return Err(ConfigError::Missing("CONTAINER_NAMES"));
        }

        let image = image_source(&args.image, &lookup)?;
        let backup_dir = args.backup_dir.clone().unwrap_or_else(|| "/root".to_string());

        let settle = if args.settle_poll {
            SettleMode::PollUntilAbsent {
                interval: Duration::from_millis(args.settle_ms / u64::from(SETTLE_POLL_ATTEMPTS)),
                max_attempts: SETTLE_POLL_ATTEMPTS,
            }
        } else {
            SettleMode::Delay(Duration::from_millis(args.settle_ms))
        };

        Ok(Self { connection, containers, image, backup_dir, settle })
    }
}

#[derive(Debug, Clone)]
pub struct PullConfig {
    pub connection: ConnectionConfig,
    pub image: ImageSource,
}

impl PullConfig {
    pub fn load(args: &PullArgs) -> Result<Self, ConfigError> {
        Self::from_lookup(args, env_lookup)
    }

    fn from_lookup(
        args: &PullArgs,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = non_empty(lookup);
        Ok(Self {
            connection: connection_from(&args.connection, &lookup)?,
            image: image_source(&args.image, &lookup)?,
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Empty values count as unset, for flags and environment alike.
fn non_empty(
    lookup: impl Fn(&str) -> Option<String>,
) -> impl Fn(&str) -> Option<String> {
    move |key| lookup(key).filter(|value| !value.is_empty())
}

fn connection_from(
    args: &ConnectionArgs,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<ConnectionConfig, ConfigError> {
    let host = args
        .host
        .clone()
        .or_else(|| lookup("SERVER_ADDRESS"))
        .ok_or(ConfigError::Missing("SERVER_ADDRESS"))?;
    let user =
        args.user.clone().or_else(|| lookup("USERNAME")).ok_or(ConfigError::Missing("USERNAME"))?;
    let port = match (args.port, lookup("PORT")) {
        (Some(port), _) => port,
        (None, Some(raw)) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
        (None, None) => 22,
    };
    let private_key = lookup("PRIVATE_KEY").ok_or(ConfigError::Missing("PRIVATE_KEY"))?;

    Ok(ConnectionConfig { host, user, port, private_key })
}

fn image_source(
    args: &ImageArgs,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<ImageSource, ConfigError> {
    if let Some(image) = args.image.clone().or_else(|| lookup("IMAGE_URL")) {
        return Ok(ImageSource::Direct(image));
    }
    match args.resolve_url.clone().or_else(|| lookup("RESOLVE_URL")) {
        Some(endpoint) => {
            let user_agent = args
                .user_agent
                .clone()
                .or_else(|| lookup("USER_AGENT"))
                .ok_or(ConfigError::Missing("USER_AGENT"))?;
            Ok(ImageSource::Resolve { endpoint, user_agent })
        }
        None => Err(ConfigError::Missing("IMAGE_URL")),
    }
}

/// Split the `&`-joined container list, trimming entries and dropping
/// empties.
fn split_container_names(joined: &str) -> Vec<String> {
    joined
        .split('&')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
