// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-container error taxonomy.
//!
//! Everything here is caught at the container-loop boundary: an error
//! skips or fails the container it belongs to and the batch continues.
//! Only session establishment (before the loop) and configuration
//! loading (before any connection) are fatal to a run.

use redock_core::inspect::InspectError;
use redock_session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// Inspection of a named container yielded no data.
    #[error("container not found: {0}")]
    NotFound(String),

    /// Image reference missing its registry/tag separator.
    #[error("invalid image reference: {0:?}")]
    InvalidImageReference(String),

    /// A remote command exited non-zero at a step that requires it to
    /// succeed.
    #[error("remote command failed with status {status}: {command}: {stderr}")]
    Command { command: String, status: i32, stderr: String },

    /// Inspection output that was present but unparseable.
    #[error("inspect payload for {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: InspectError,
    },

    /// Transport failure on an established session.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl DeployError {
    pub(crate) fn command(command: impl Into<String>, status: i32, stderr: &str) -> Self {
        Self::Command {
            command: command.into(),
            status,
            stderr: stderr.trim().to_string(),
        }
    }
}
