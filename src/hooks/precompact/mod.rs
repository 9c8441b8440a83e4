// src/hooks/precompact/mod.rs
// PreCompact hook handler - saves the conversation tail before auto-compact

mod record;

pub use record::{MemoryRecord, RecordMetadata};

use super::{HookTimer, parse_hook_input, read_stdin};
use crate::bridge::{CliBridge, MemoryBridge};
use crate::classify::Classifier;
use crate::config::HookConfig;
use crate::error::Result;
use crate::project::{ProjectContext, UNKNOWN};
use crate::transcript::{extract_utterances, read_transcript_tail, render_digest};
use crate::utils::{now_rfc3339, short_session_id, truncate_for_log};
use serde::Deserialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::Instrument;

/// The only trigger that causes a save
const AUTO_TRIGGER: &str = "auto";

/// PreCompact hook payload. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreCompactInput {
    pub trigger: Option<String>,
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
}

/// How a PreCompact invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Manual compaction (or no trigger); nothing to do
    Skipped,
    /// The tail held no usable utterances
    NothingToSave,
    Saved,
    Failed,
}

impl SaveOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Skipped | Self::NothingToSave | Self::Saved => ExitCode::SUCCESS,
            Self::Failed => ExitCode::FAILURE,
        }
    }
}

/// Run the PreCompact hook: stdin in, nothing on stdout, exit 1 on failure
pub async fn run(config: &HookConfig) -> ExitCode {
    let _timer = HookTimer::start("precompact");
    let classifier = Classifier::new(&config.classifier);
    let bridge = CliBridge::from_config(&config.bridge);

    let outcome = async {
        let raw = read_stdin()?;
        handle(&raw, config, &classifier, &bridge).await
    }
    .instrument(tracing::info_span!("precompact"))
    .await;

    match outcome {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            tracing::error!(error = %e, "PreCompact hook failed");
            ExitCode::FAILURE
        }
    }
}

/// Process one raw PreCompact payload.
///
/// Decode and transcript errors are returned; a failed save is `SaveOutcome::Failed`.
pub async fn handle(
    raw: &str,
    config: &HookConfig,
    classifier: &Classifier,
    bridge: &dyn MemoryBridge,
) -> Result<SaveOutcome> {
    let input: PreCompactInput = parse_hook_input(raw)?;

    let trigger = input.trigger.as_deref().unwrap_or_default();
    if trigger != AUTO_TRIGGER {
        tracing::info!(trigger, "Skipping memory save for non-auto compaction");
        return Ok(SaveOutcome::Skipped);
    }

    let session_id = input
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let transcript_path = input.transcript_path.unwrap_or_default();

    tracing::info!(
        session = %short_session_id(&session_id),
        transcript = %transcript_path,
        "Auto-compact detected, saving conversation"
    );

    let tail = read_transcript_tail(Path::new(&transcript_path), config.transcript.window)?;
    let utterances = extract_utterances(&tail.records);
    let digest = render_digest(&utterances);
    if digest.is_empty() {
        tracing::warn!("No conversation content extracted, nothing to save");
        return Ok(SaveOutcome::NothingToSave);
    }

    let saved = save_memory(
        &session_id,
        &digest,
        &transcript_path,
        config,
        classifier,
        bridge,
    )
    .await;

    Ok(if saved {
        SaveOutcome::Saved
    } else {
        SaveOutcome::Failed
    })
}

/// Classify the digest, build the memory document and submit it once.
///
/// Returns `false` on any failure; the cause is logged.
pub async fn save_memory(
    session_id: &str,
    digest: &str,
    transcript_path: &str,
    config: &HookConfig,
    classifier: &Classifier,
    bridge: &dyn MemoryBridge,
) -> bool {
    if digest.trim().is_empty() {
        tracing::warn!("Refusing to save an empty digest");
        return false;
    }

    let project = ProjectContext::resolve(transcript_path, &config.project.markers);
    let classification = classifier.classify(digest);
    let record = MemoryRecord::build(session_id, digest, project, &classification, now_rfc3339());

    let document = match record.render_document(&config.memory_service.store_tool) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!(error = %e, "Failed to render memory document");
            return false;
        }
    };

    tracing::info!(
        chars = document.chars().count(),
        project = %record.project.name,
        languages = ?record.metadata.languages,
        tags = ?record.tags,
        "Memory document prepared"
    );
    tracing::debug!(
        preview = %truncate_for_log(&document, config.logging.max_preview),
        "Memory document preview"
    );

    match bridge.exchange(&document).await {
        Ok(reply) => {
            tracing::info!(
                elapsed_ms = reply.elapsed.as_millis() as u64,
                tags = ?record.tags,
                "Memory saved"
            );
            tracing::info!(
                response = %truncate_for_log(reply.text.trim(), config.logging.max_response_preview),
                "Memory service response"
            );
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save memory");
            false
        }
    }
}
