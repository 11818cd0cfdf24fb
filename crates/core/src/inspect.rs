// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of `docker inspect` payloads.
//!
//! The raw JSON shape lives here so the orchestrator can be exercised
//! with synthetic payloads. Only the fields the recreate plan needs are
//! modeled; everything else in the (large) inspect document is ignored.

use crate::descriptor::{ContainerDescriptor, PortBinding, RestartPolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Address a binding is published on when the source omits `HostIp`.
pub const WILDCARD_HOST_IP: &str = "0.0.0.0";

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("malformed inspect payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One element of the JSON array `docker inspect` prints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectPayload {
    #[serde(default, rename = "Config")]
    pub config: InspectConfig,
    #[serde(default, rename = "HostConfig")]
    pub host_config: InspectHostConfig,
    #[serde(default, rename = "NetworkSettings")]
    pub network_settings: InspectNetworkSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectConfig {
    #[serde(default, rename = "Env")]
    pub env: Vec<String>,
    /// Map of mount target to an empty object; null when no volumes.
    #[serde(default, rename = "Volumes")]
    pub volumes: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectHostConfig {
    /// Binding lists may be null for exposed-but-unbound ports.
    #[serde(default, rename = "PortBindings")]
    pub port_bindings: Option<BTreeMap<String, Option<Vec<RawPortBinding>>>>,
    #[serde(default, rename = "RestartPolicy")]
    pub restart_policy: Option<RawRestartPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectNetworkSettings {
    #[serde(default, rename = "Networks")]
    pub networks: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPortBinding {
    /// Absent means the wildcard address; an explicit empty string is
    /// kept as captured.
    #[serde(rename = "HostIp")]
    pub host_ip: Option<String>,
    #[serde(default, rename = "HostPort")]
    pub host_port: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRestartPolicy {
    #[serde(default, rename = "Name")]
    pub name: String,
    #[serde(default, rename = "MaximumRetryCount")]
    pub maximum_retry_count: i64,
}

/// Parse the stdout of `docker inspect <name>`.
///
/// Returns `Ok(None)` when the inspection yielded no data: empty
/// output, or an empty JSON array (docker prints `[]` for an unknown
/// name before its not-found message on stderr).
pub fn parse_inspect_output(stdout: &str) -> Result<Option<InspectPayload>, InspectError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let mut entries: Vec<InspectPayload> = serde_json::from_str(trimmed)?;
    if entries.is_empty() {
        return Ok(None);
    }
    Ok(Some(entries.swap_remove(0)))
}

impl InspectPayload {
    /// Build the descriptor the plan builder consumes.
    ///
    /// `name` is the name the replacement container is created under —
    /// the original name, not the shadow name the payload may have been
    /// captured from.
    pub fn into_descriptor(self, name: impl Into<String>) -> ContainerDescriptor {
        let port_bindings = self
            .host_config
            .port_bindings
            .unwrap_or_default()
            .into_iter()
            .map(|(port, bindings)| {
                let bindings = bindings
                    .unwrap_or_default()
                    .into_iter()
                    .map(|raw| PortBinding {
                        host_ip: raw.host_ip.unwrap_or_else(|| WILDCARD_HOST_IP.to_string()),
                        host_port: raw.host_port,
                    })
                    .collect();
                (port, bindings)
            })
            .collect();

        let restart_policy = self
            .host_config
            .restart_policy
            .map(|raw| RestartPolicy { name: raw.name, maximum_retry_count: raw.maximum_retry_count })
            .unwrap_or_default();

        ContainerDescriptor {
            name: name.into(),
            env: self.config.env,
            port_bindings,
            volumes: self.config.volumes.unwrap_or_default().into_keys().collect(),
            networks: self.network_settings.networks.unwrap_or_default().into_keys().collect(),
            restart_policy,
        }
    }
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
