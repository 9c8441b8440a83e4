// src/main.rs
// compact-memory - keeps working context across Claude Code auto-compaction

use anyhow::Result;
use clap::Parser;
use compact_memory::cli::{Cli, Commands, HookAction, run_debug_digest};
use compact_memory::config::{HookConfig, data_dir};
use compact_memory::hooks::{precompact, session_start};
use compact_memory::logging::init_logging;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load .env files (global first, then project - project overrides)
    let _ = dotenvy::from_path(data_dir().join(".env"));
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (config, source) = HookConfig::load_with_source(cli.config.as_deref());
    let (config, ignored) = config.with_env_overrides();

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("compact-memory: {e}");
    }
    source.log();
    for skipped in &ignored {
        skipped.log();
    }

    match cli.command {
        Commands::Hook { action } => Ok(match action {
            HookAction::PreCompact => precompact::run(&config).await,
            HookAction::SessionStart => session_start::run(&config).await,
        }),
        Commands::DebugDigest { transcript, window } => {
            run_debug_digest(&transcript, window, &config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
