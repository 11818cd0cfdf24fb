// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted in-memory session for orchestrator tests.

use crate::{CommandOutput, RemoteSession, SessionError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

struct Script {
    pattern: String,
    responses: VecDeque<CommandOutput>,
}

/// Replays scripted responses and records everything it is asked to do.
///
/// Responses are registered against a command pattern with [`on`];
/// an exact match wins over a prefix match, and repeated registrations
/// for the same pattern queue up in order with the last response
/// repeating once the queue drains. Commands with no matching script
/// succeed with empty output.
///
/// [`on`]: FakeSession::on
#[derive(Default)]
pub struct FakeSession {
    scripts: Mutex<Vec<Script>>,
    commands: Mutex<Vec<String>>,
    writes: Mutex<Vec<(String, Vec<u8>)>>,
    fail_writes: Mutex<bool>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for commands matching `pattern` (exact or
    /// prefix). Calling again with the same pattern queues another
    /// response behind the first.
    pub fn on(&self, pattern: &str, response: CommandOutput) -> &Self {
        let mut scripts = self.scripts.lock();
        if let Some(script) = scripts.iter_mut().find(|s| s.pattern == pattern) {
            script.responses.push_back(response);
        } else {
            scripts.push(Script {
                pattern: pattern.to_string(),
                responses: VecDeque::from([response]),
            });
        }
        self
    }

    /// Make every subsequent `write_file` fail.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock() = true;
    }

    /// All executed command strings, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }

    /// All `(path, contents)` pairs written, in order.
    pub fn writes(&self) -> Vec<(String, Vec<u8>)> {
        self.writes.lock().clone()
    }

    fn respond(&self, command: &str) -> CommandOutput {
        let mut scripts = self.scripts.lock();
        let index = scripts
            .iter()
            .position(|s| s.pattern == command)
            .or_else(|| scripts.iter().position(|s| command.starts_with(&s.pattern)));
        let Some(index) = index else {
            return output::ok("");
        };

        let script = &mut scripts[index];
        match script.responses.len() {
            0 => output::ok(""),
            1 => script.responses[0].clone(),
            _ => script.responses.pop_front().unwrap_or_else(|| output::ok("")),
        }
    }
}

#[async_trait]
impl RemoteSession for FakeSession {
    async fn execute(&self, command: &str) -> Result<CommandOutput, SessionError> {
        self.commands.lock().push(command.to_string());
        Ok(self.respond(command))
    }

    async fn write_file(&self, path: &str, contents: &[u8]) -> Result<(), SessionError> {
        if *self.fail_writes.lock() {
            return Err(SessionError::FileWrite(format!("{path}: scripted failure")));
        }
        self.writes.lock().push((path.to_string(), contents.to_vec()));
        Ok(())
    }
}

/// Canned command outputs for scripting.
pub mod output {
    use crate::CommandOutput;

    pub fn ok(stdout: &str) -> CommandOutput {
        CommandOutput { stdout: stdout.to_string(), stderr: String::new(), status: 0 }
    }

    pub fn failed(status: i32, stderr: &str) -> CommandOutput {
        CommandOutput { stdout: String::new(), stderr: stderr.to_string(), status }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
