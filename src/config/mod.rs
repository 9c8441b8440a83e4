// src/config/mod.rs
// Configuration and shared constants

pub mod env;
pub mod file;

pub use env::IgnoredOverride;
pub use file::{
    BridgeConfig, ClassifierConfig, ConfigSource, HookConfig, LanguageRuleConfig, LoggingConfig,
    MemoryServiceConfig, ProjectConfig, ReaderConfig, TranscriptConfig,
};

use std::path::PathBuf;

/// Default number of transcript records kept in the tail window
pub const DEFAULT_TRANSCRIPT_WINDOW: usize = 20;
/// Default hard timeout for one bridge exchange (3 minutes)
pub const DEFAULT_BRIDGE_TIMEOUT_SECS: u64 = 180;
/// Default bridge attempts per exchange (1 = no retry)
pub const DEFAULT_BRIDGE_ATTEMPTS: u32 = 1;
/// Default number of search queries the reader will try
pub const DEFAULT_MAX_QUERIES: usize = 2;
/// Maximum characters of digest/prompt echoed into logs
pub const DEFAULT_MAX_PREVIEW: usize = 300;
/// Maximum characters of a bridge response echoed into logs
pub const DEFAULT_MAX_RESPONSE_PREVIEW: usize = 200;

/// Base directory for hook data (~/.compact-memory)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".compact-memory")
}
