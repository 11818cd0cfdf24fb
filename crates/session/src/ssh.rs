// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! libssh2-backed session.
//!
//! libssh2 is a blocking library; every operation runs on the blocking
//! thread pool while the session handle itself lives behind a mutex.
//! The orchestrator is strictly sequential, so the lock is never
//! contended — it exists to make the shared handle `Sync`.

use crate::{CommandOutput, RemoteSession, SessionConfig, SessionError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;
use std::sync::Arc;

/// SSH session over one reused TCP connection.
///
/// Each `execute` opens a fresh exec channel on the shared connection,
/// mirroring how a shell user would run one command after another.
pub struct SshSession {
    inner: Arc<Mutex<ssh2::Session>>,
    addr: String,
}

impl SshSession {
    /// Establish the connection and authenticate with in-memory
    /// private-key material.
    pub async fn connect(config: SessionConfig) -> Result<Self, SessionError> {
        tokio::task::spawn_blocking(move || Self::connect_blocking(&config))
            .await
            .map_err(|e| SessionError::Connect(format!("connect task failed: {e}")))?
    }

    fn connect_blocking(config: &SessionConfig) -> Result<Self, SessionError> {
        let addr = config.addr();
        let tcp = TcpStream::connect(&addr)
            .map_err(|e| SessionError::Connect(format!("{addr}: {e}")))?;

        let mut session =
            ssh2::Session::new().map_err(|e| SessionError::Connect(e.to_string()))?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| SessionError::Connect(format!("handshake with {addr}: {e}")))?;
        session
            .userauth_pubkey_memory(&config.user, None, &config.private_key, None)
            .map_err(|e| SessionError::Auth(format!("{}@{}: {}", config.user, addr, e)))?;

        tracing::info!(user = %config.user, %addr, "ssh session established");
        Ok(Self { inner: Arc::new(Mutex::new(session)), addr })
    }
}

#[async_trait]
impl RemoteSession for SshSession {
    async fn execute(&self, command: &str) -> Result<CommandOutput, SessionError> {
        tracing::debug!(addr = %self.addr, %command, "executing remote command");
        let inner = Arc::clone(&self.inner);
        let command = command.to_string();
        tokio::task::spawn_blocking(move || exec_blocking(&inner, &command))
            .await
            .map_err(|e| SessionError::Exec(format!("exec task failed: {e}")))?
    }

    async fn write_file(&self, path: &str, contents: &[u8]) -> Result<(), SessionError> {
        tracing::debug!(addr = %self.addr, path, len = contents.len(), "writing remote file");
        let inner = Arc::clone(&self.inner);
        let path = path.to_string();
        let contents = contents.to_vec();
        tokio::task::spawn_blocking(move || write_blocking(&inner, &path, &contents))
            .await
            .map_err(|e| SessionError::FileWrite(format!("write task failed: {e}")))?
    }
}

fn exec_blocking(
    session: &Mutex<ssh2::Session>,
    command: &str,
) -> Result<CommandOutput, SessionError> {
    let session = session.lock();
    let mut channel =
        session.channel_session().map_err(|e| SessionError::Exec(e.to_string()))?;
    channel.exec(command).map_err(|e| SessionError::Exec(format!("{command}: {e}")))?;

    let mut stdout = String::new();
    channel
        .read_to_string(&mut stdout)
        .map_err(|e| SessionError::Exec(format!("reading stdout: {e}")))?;
    let mut stderr = String::new();
    channel
        .stderr()
        .read_to_string(&mut stderr)
        .map_err(|e| SessionError::Exec(format!("reading stderr: {e}")))?;

    channel.wait_close().map_err(|e| SessionError::Exec(format!("closing channel: {e}")))?;
    let status =
        channel.exit_status().map_err(|e| SessionError::Exec(format!("exit status: {e}")))?;

    Ok(CommandOutput { stdout, stderr, status })
}

fn write_blocking(
    session: &Mutex<ssh2::Session>,
    path: &str,
    contents: &[u8],
) -> Result<(), SessionError> {
    let session = session.lock();
    let sftp = session.sftp().map_err(|e| SessionError::FileWrite(format!("{path}: {e}")))?;
    let mut file = sftp
        .create(Path::new(path))
        .map_err(|e| SessionError::FileWrite(format!("{path}: {e}")))?;
    file.write_all(contents)
        .map_err(|e| SessionError::FileWrite(format!("{path}: {e}")))?;
    Ok(())
}
