// src/bridge/cli.rs
// Subprocess bridge: prompt on stdin, reply on stdout, hard timeout

use super::{BridgeReply, MemoryBridge};
use crate::config::BridgeConfig;
use crate::error::{HookError, Result};
use crate::utils::truncate_at_boundary;
use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Maximum stderr bytes kept in a `BridgeNonZeroExit` error
const MAX_STDERR_BYTES: usize = 2000;

/// Runs a CLI (by default `claude --print`) once per exchange
#[derive(Debug, Clone)]
pub struct CliBridge {
    command: Vec<String>,
    timeout: Duration,
    max_attempts: u32,
}

impl CliBridge {
    pub fn new(command: Vec<String>, timeout: Duration, max_attempts: u32) -> Self {
        Self {
            command,
            timeout,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.command.clone(), config.timeout(), config.max_attempts)
    }

    fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or("")
    }

    /// One spawn of the bridge process, bounded by the timeout
    async fn attempt(&self, prompt: &str) -> Result<BridgeReply> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(HookError::BridgeUnavailable {
                program: String::new(),
                reason: "bridge command is empty".to_string(),
            });
        };

        let start = Instant::now();
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    HookError::BridgeUnavailable {
                        program: program.clone(),
                        reason: e.to_string(),
                    }
                }
                _ => HookError::Io(e),
            })?;

        let stdin = child.stdin.take();
        let payload = prompt.as_bytes().to_vec();
        let write_prompt = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, io::Error>(())
        };

        // Dropping the exchange on timeout drops the child, which kills it
        let exchange = async move { tokio::join!(write_prompt, child.wait_with_output()) };
        let (written, output) = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(pair) => pair,
            Err(_) => {
                return Err(HookError::BridgeTimeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        let output = output?;
        if let Err(e) = written {
            // The process may legitimately exit before reading all of stdin
            tracing::debug!(error = %e, "Bridge stdin closed early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HookError::BridgeNonZeroExit {
                code: output.status.code(),
                stderr: truncate_at_boundary(stderr.trim(), MAX_STDERR_BYTES).to_string(),
            });
        }

        Ok(BridgeReply::new(
            String::from_utf8_lossy(&output.stdout).into_owned(),
            start.elapsed(),
        ))
    }
}

#[async_trait]
impl MemoryBridge for CliBridge {
    async fn exchange(&self, prompt: &str) -> Result<BridgeReply> {
        let mut attempt = 1;
        loop {
            tracing::debug!(
                program = self.program(),
                attempt,
                max_attempts = self.max_attempts,
                prompt_chars = prompt.chars().count(),
                "Invoking memory bridge"
            );
            match self.attempt(prompt).await {
                Ok(reply) => {
                    tracing::debug!(elapsed_ms = reply.elapsed.as_millis() as u64, "Memory bridge replied");
                    return Ok(reply);
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(error = %e, attempt, "Memory bridge attempt failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
