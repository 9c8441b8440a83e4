// src/bridge/mod.rs
// Request/response channel to the Memory Service

mod cli;

pub use cli::CliBridge;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Successful reply from the Memory Service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeReply {
    pub text: String,
    pub elapsed: Duration,
}

impl BridgeReply {
    pub fn new(text: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            text: text.into(),
            elapsed,
        }
    }

    /// A reply with nothing but whitespace carries no memory
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Anything that can carry a free-text prompt to the Memory Service.
///
/// Failures are `BridgeTimeout`, `BridgeUnavailable` or `BridgeNonZeroExit`;
/// callers treat all of them as an ordinary unsuccessful exchange.
#[async_trait]
pub trait MemoryBridge: Send + Sync {
    async fn exchange(&self, prompt: &str) -> Result<BridgeReply>;
}

/// Plain functions and closures are bridges; tests use this to script replies.
#[async_trait]
impl<F> MemoryBridge for F
where
    F: Fn(&str) -> Result<BridgeReply> + Send + Sync,
{
    async fn exchange(&self, prompt: &str) -> Result<BridgeReply> {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;

    #[tokio::test]
    async fn closure_acts_as_bridge() {
        let bridge = |prompt: &str| -> Result<BridgeReply> {
            Ok(BridgeReply::new(format!("echo: {prompt}"), Duration::ZERO))
        };
        let reply = bridge.exchange("hi").await.unwrap();
        assert_eq!(reply.text, "echo: hi");
    }

    #[tokio::test]
    async fn closure_errors_propagate() {
        let bridge = |_: &str| -> Result<BridgeReply> { Err(HookError::BridgeTimeout { secs: 1 }) };
        let dyn_bridge: &dyn MemoryBridge = &bridge;
        assert!(matches!(
            dyn_bridge.exchange("x").await,
            Err(HookError::BridgeTimeout { secs: 1 })
        ));
    }

    #[test]
    fn blank_reply_detection() {
        assert!(BridgeReply::new(" \n", Duration::ZERO).is_blank());
        assert!(!BridgeReply::new("memory", Duration::ZERO).is_blank());
    }
}
