// src/error.rs
// Standardized error types for the compaction hooks

use thiserror::Error;

/// Main error type for the hook library
#[derive(Error, Debug)]
pub enum HookError {
    #[error("invalid hook input: {0}")]
    InputDecode(String),

    #[error("transcript unavailable at {path}: {reason}")]
    TranscriptUnavailable { path: String, reason: String },

    #[error("memory bridge timed out after {secs}s")]
    BridgeTimeout { secs: u64 },

    #[error("memory bridge unavailable ({program}): {reason}")]
    BridgeUnavailable { program: String, reason: String },

    #[error("memory bridge exited with {}: {stderr}", .code.map_or_else(|| "signal".to_string(), |c| format!("code {c}")))]
    BridgeNonZeroExit { code: Option<i32>, stderr: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Result using HookError
pub type Result<T> = std::result::Result<T, HookError>;

impl HookError {
    /// Whether another bridge attempt could plausibly succeed.
    ///
    /// A missing program or bad input will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HookError::BridgeTimeout { .. } | HookError::BridgeNonZeroExit { .. } | HookError::Io(_)
        )
    }
}
