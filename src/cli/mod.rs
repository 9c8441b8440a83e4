// src/cli/mod.rs
// CLI module for compact-memory commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod debug;

pub use debug::run_debug_digest;

#[derive(Parser)]
#[command(name = "compact-memory")]
#[command(about = "Saves conversation context before auto-compact and restores it afterwards")]
#[command(version)]
pub struct Cli {
    /// Config file (default: ~/.compact-memory/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Client hook handlers
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },

    /// Print the digest, tags and metadata a PreCompact save would submit
    DebugDigest {
        /// Transcript JSONL file
        #[arg(short, long)]
        transcript: PathBuf,

        /// Records kept from the end of the transcript
        #[arg(short, long)]
        window: Option<usize>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    /// Handle PreCompact hooks - saves the conversation tail
    PreCompact,
    /// Handle SessionStart hooks - restores context after compaction
    SessionStart,
}
