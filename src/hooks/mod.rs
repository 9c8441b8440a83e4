// src/hooks/mod.rs
// Compaction hook handlers

pub mod precompact;
pub mod session_start;

use crate::error::{HookError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::time::Instant;

/// Maximum bytes of hook input read from stdin
const MAX_HOOK_INPUT_BYTES: u64 = 1_048_576;

/// Read the raw hook input from stdin (the host passes one JSON object)
pub fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .take(MAX_HOOK_INPUT_BYTES)
        .read_to_string(&mut input)
        .map_err(|e| HookError::InputDecode(format!("failed to read stdin: {e}")))?;
    Ok(input)
}

/// Parse raw hook input; empty or malformed JSON is `InputDecode`
pub fn parse_hook_input<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(HookError::InputDecode("no input received on stdin".to_string()));
    }
    serde_json::from_str(raw).map_err(|e| HookError::InputDecode(e.to_string()))
}

/// Timer guard for hook performance monitoring.
/// Logs execution time on drop.
pub struct HookTimer {
    hook_name: &'static str,
    start: Instant,
}

impl HookTimer {
    /// Start timing a hook
    pub fn start(hook_name: &'static str) -> Self {
        Self {
            hook_name,
            start: Instant::now(),
        }
    }
}

impl Drop for HookTimer {
    fn drop(&mut self) {
        tracing::info!(
            hook = self.hook_name,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "Hook finished"
        );
    }
}
