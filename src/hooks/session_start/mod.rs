// src/hooks/session_start/mod.rs
// SessionStart hook handler - restores context saved before auto-compact

mod format;
mod query;

pub use format::format_restored_context;
pub use query::{MemoryQuery, build_queries, is_memory_reply, search_prompt, session_label};

use super::{HookTimer, parse_hook_input, read_stdin};
use crate::bridge::{CliBridge, MemoryBridge};
use crate::classify::MARKER_TAG;
use crate::config::HookConfig;
use crate::project::ProjectContext;
use crate::utils::{now_rfc3339, short_session_id, truncate_for_log};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::ExitCode;
use tracing::Instrument;

/// The only session source that triggers a restore
const COMPACT_SOURCE: &str = "compact";

/// SessionStart hook payload. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionStartInput {
    pub source: Option<String>,
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
}

/// Result of a memory search, rendered into the session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoredContext {
    pub found: bool,
    pub source_session: String,
    pub project: String,
    pub summary: String,
    pub raw_response: Option<String>,
    pub queries_used: Vec<String>,
    pub tags: Vec<String>,
    pub last_updated: String,
}

/// Run the SessionStart hook. Always exits 0; failures only reach the log.
pub async fn run(config: &HookConfig) -> ExitCode {
    let _timer = HookTimer::start("session_start");

    // A panic must not print a backtrace into the new session
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "SessionStart hook panicked");
    }));

    let config = config.clone();
    let task = tokio::spawn(
        async move {
            let raw = match read_stdin() {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read hook input");
                    return None;
                }
            };
            let bridge = CliBridge::from_config(&config.bridge);
            handle(&raw, &config, &bridge).await
        }
        .instrument(tracing::info_span!("session_start")),
    );

    match task.await {
        Ok(Some(report)) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{report}").and_then(|()| stdout.flush()) {
                tracing::warn!(error = %e, "Failed to write restored context");
            }
        }
        Ok(None) => {}
        Err(e) => tracing::error!(error = %e, "SessionStart hook aborted"),
    }

    ExitCode::SUCCESS
}

/// Process one raw SessionStart payload; `Some(report)` is printed to stdout.
pub async fn handle(raw: &str, config: &HookConfig, bridge: &dyn MemoryBridge) -> Option<String> {
    let input: SessionStartInput = match parse_hook_input(raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable SessionStart input");
            return None;
        }
    };

    let source = input.source.as_deref().unwrap_or_default();
    if source != COMPACT_SOURCE {
        tracing::info!(source, "Not a post-compact session, nothing to restore");
        return None;
    }

    let session_id = input.session_id.unwrap_or_default();
    let transcript_path = input.transcript_path.unwrap_or_default();
    let project = ProjectContext::resolve(&transcript_path, &config.project.markers);

    tracing::info!(
        session = %short_session_id(&session_id),
        project = %project.name,
        "Post-compact session detected, restoring context"
    );

    let restored = search_memory(&session_id, &project, config, bridge).await;
    Some(format_restored_context(&restored))
}

/// Try the top `max_queries` queries in order; the first memory-bearing reply wins.
pub async fn search_memory(
    session_id: &str,
    project: &ProjectContext,
    config: &HookConfig,
    bridge: &dyn MemoryBridge,
) -> RestoredContext {
    let queries: MemoryQuery = build_queries(session_id, project)
        .into_iter()
        .take(config.reader.max_queries)
        .collect();
    tracing::info!(queries = ?queries, "Searching memory");

    for (i, query) in queries.iter().enumerate() {
        tracing::info!(n = i + 1, query = %query, "Memory query");
        let prompt = search_prompt(query, project, session_id, &config.memory_service);

        match bridge.exchange(&prompt).await {
            Ok(reply) if is_memory_reply(&reply) => {
                let text = reply.text.trim().to_string();
                tracing::info!(
                    query = %query,
                    elapsed_ms = reply.elapsed.as_millis() as u64,
                    response = %truncate_for_log(&text, config.logging.max_response_preview),
                    "Found memories"
                );
                return RestoredContext {
                    found: true,
                    source_session: session_label(session_id),
                    project: project.name.clone(),
                    summary: "Memory search successful".to_string(),
                    raw_response: Some(text),
                    queries_used: queries[..=i].to_vec(),
                    tags: restored_tags(session_id, project),
                    last_updated: now_rfc3339(),
                };
            }
            Ok(_) => tracing::warn!(query = %query, "No memories returned for query"),
            Err(e) => tracing::warn!(query = %query, error = %e, "Memory query failed"),
        }
    }

    tracing::info!("No relevant memories found");
    RestoredContext {
        found: false,
        source_session: session_label(session_id),
        project: project.name.clone(),
        summary: "No previous context found in memory".to_string(),
        raw_response: None,
        queries_used: queries,
        tags: Vec::new(),
        last_updated: now_rfc3339(),
    }
}

fn restored_tags(session_id: &str, project: &ProjectContext) -> Vec<String> {
    let mut tags = vec![
        MARKER_TAG.to_string(),
        format!("session:{}", session_label(session_id)),
    ];
    if project.is_known() {
        tags.push(format!("project:{}", project.name));
    }
    tags
}
