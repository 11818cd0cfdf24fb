// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! redock-session: the remote command interface.
//!
//! One [`RemoteSession`] is established per run and passed explicitly
//! into every operation — there is no process-wide session singleton.
//! The trait carries exactly the two capabilities the orchestrator
//! needs: run a shell command and capture its output, and write bytes
//! to a remote path. [`SshSession`] implements it over libssh2;
//! [`FakeSession`] (behind `test-support`) replays scripted responses
//! so the orchestrator can be tested without a host.

pub mod ssh;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use ssh::SshSession;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSession;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from session establishment and remote operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("command execution failed: {0}")]
    Exec(String),
    #[error("remote file write failed: {0}")]
    FileWrite(String),
}

/// Captured result of one remote command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Remote exit status.
    pub status: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Connection parameters for establishing a session.
///
/// `private_key` holds the PEM-encoded key material itself, not a
/// path — CI pipelines hand the key over through the environment.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub user: String,
    pub port: u16,
    pub private_key: String,
}

impl SessionConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A live session against the target host.
///
/// One command is in flight at a time; implementations may serialize
/// internally but callers never overlap operations in this design.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Run a shell-invocable command string, capturing stdout, stderr
    /// and the exit status. A non-zero exit is not an `Err` — callers
    /// decide per step whether that is fatal.
    async fn execute(&self, command: &str) -> Result<CommandOutput, SessionError>;

    /// Write a byte payload to a remote path, replacing any existing
    /// file.
    async fn write_file(&self, path: &str, contents: &[u8]) -> Result<(), SessionError>;
}
