// src/cli/debug.rs
// Debug commands for troubleshooting

use crate::classify::Classifier;
use crate::config::HookConfig;
use crate::error::Result;
use crate::hooks::precompact::MemoryRecord;
use crate::project::ProjectContext;
use crate::transcript::{extract_utterances, read_transcript_tail, render_digest};
use crate::utils::now_rfc3339;
use std::path::Path;

/// Show what a PreCompact save would submit, without calling the bridge
pub fn run_debug_digest(transcript: &Path, window: Option<usize>, config: &HookConfig) -> Result<()> {
    let window = window.unwrap_or(config.transcript.window);
    println!("=== Debug Digest ===\n");
    println!("Transcript: {}", transcript.display());
    println!("Window: {window}\n");

    let tail = read_transcript_tail(transcript, window)?;
    println!(
        "Records: {} parsed, {} kept, {} skipped\n",
        tail.total_parsed,
        tail.records.len(),
        tail.skipped
    );

    let utterances = extract_utterances(&tail.records);
    let digest = render_digest(&utterances);
    if digest.is_empty() {
        println!("(no utterances extracted)");
        return Ok(());
    }

    let transcript_path = transcript.to_string_lossy();
    let project = ProjectContext::resolve(&transcript_path, &config.project.markers);
    let classifier = Classifier::new(&config.classifier);
    let classification = classifier.classify(&digest);
    let record = MemoryRecord::build("debug", &digest, project, &classification, now_rfc3339());

    println!("--- Digest ({} utterances) ---\n", utterances.len());
    println!("{digest}\n");
    println!("--- Tags ---\n");
    for tag in &record.tags {
        println!("{tag}");
    }
    println!("\n--- Metadata ---\n");
    println!("{}", serde_json::to_string_pretty(&record.metadata_envelope())?);

    Ok(())
}
