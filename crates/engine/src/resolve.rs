// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image reference resolution against a release-metadata endpoint.
//!
//! Queried once per run when no direct reference is configured. The
//! endpoint authenticates callers by `User-Agent`, so the header is
//! mandatory. Runs in the deploying process, before any remote
//! operation — an unresolved reference aborts the run with the host
//! untouched.

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("release metadata request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ReleaseMetadata {
    image_name: Option<String>,
}

impl ReleaseMetadata {
    fn image(self) -> Option<String> {
        self.image_name.filter(|name| !name.is_empty())
    }
}

/// Fetch the current image reference. `Ok(None)` when the endpoint
/// answered but named no image.
pub async fn resolve_image(
    endpoint: &str,
    user_agent: &str,
) -> Result<Option<String>, ResolveError> {
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;
    let metadata: ReleaseMetadata =
        client.get(endpoint).send().await?.error_for_status()?.json().await?;
    let image = metadata.image();
    match &image {
        Some(image) => info!(%image, "resolved image reference"),
        None => info!("release metadata named no image"),
    }
    Ok(image)
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
