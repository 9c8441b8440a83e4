// src/transcript/mod.rs
// Context extraction: JSONL transcript -> bounded, role-tagged utterances

use crate::error::{HookError, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Kind of a normalized utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtteranceKind {
    Text,
    ToolUse,
}

/// One normalized unit of conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub role: String,
    /// Message text, or the tool name for `ToolUse`
    pub text: String,
    pub kind: UtteranceKind,
}

impl Utterance {
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
            kind: UtteranceKind::Text,
        }
    }

    pub fn tool_use(role: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: tool.into(),
            kind: UtteranceKind::ToolUse,
        }
    }

    /// Digest line: `[role]: text` or `[role-tool]: name`
    pub fn render(&self) -> String {
        match self.kind {
            UtteranceKind::Text => format!("[{}]: {}", self.role, self.text),
            UtteranceKind::ToolUse => format!("[{}-tool]: {}", self.role, self.text),
        }
    }
}

/// The trailing records of a transcript plus read statistics
#[derive(Debug, Default)]
pub struct TranscriptTail {
    /// At most `window` records, in file order
    pub records: Vec<Value>,
    /// Records that parsed, including those that fell out of the window
    pub total_parsed: usize,
    /// Non-blank lines that failed to parse
    pub skipped: usize,
}

/// Stream a JSONL transcript, keeping only the last `window` parsed records.
///
/// Malformed lines are skipped. A transcript that cannot be opened, or that
/// yields no parseable record at all, is `TranscriptUnavailable`.
pub fn read_transcript_tail(path: &Path, window: usize) -> Result<TranscriptTail> {
    let unavailable = |reason: String| HookError::TranscriptUnavailable {
        path: path.display().to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
    let tail = collect_tail(BufReader::new(file), window);

    tracing::info!(
        parsed = tail.total_parsed,
        kept = tail.records.len(),
        skipped = tail.skipped,
        "Read transcript records"
    );

    if tail.total_parsed == 0 {
        return Err(unavailable("no parseable records".to_string()));
    }
    Ok(tail)
}

/// Collect the tail window from any line source
pub fn collect_tail<R: BufRead>(reader: R, window: usize) -> TranscriptTail {
    let mut tail = TranscriptTail::default();
    let mut ring: VecDeque<Value> = VecDeque::with_capacity(window.min(1024));

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            // Invalid UTF-8 on one line: skip it like any other malformed record
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tail.skipped += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stopped reading transcript early");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Ok(entry) = serde_json::from_str::<Value>(line) else {
            tail.skipped += 1;
            continue;
        };

        tail.total_parsed += 1;
        if window == 0 {
            continue;
        }
        if ring.len() == window {
            ring.pop_front();
        }
        ring.push_back(entry);
    }

    tail.records = ring.into();
    tail
}

/// Normalize records into utterances, preserving order.
///
/// Only `user`/`assistant` records with a non-empty `message` object count.
pub fn extract_utterances(records: &[Value]) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    for record in records {
        extract_record(record, &mut utterances);
    }

    tracing::info!(
        utterances = utterances.len(),
        records = records.len(),
        "Extracted conversation parts"
    );
    if utterances.is_empty()
        && let Some(first) = records.first()
    {
        tracing::warn!(
            records = records.len(),
            "No conversation parts extracted from transcript"
        );
        tracing::debug!(
            keys = ?first.as_object().map(|o| o.keys().collect::<Vec<_>>()),
            "Sample record structure"
        );
    }
    utterances
}

fn extract_record(record: &Value, out: &mut Vec<Utterance>) {
    let record_type = record.get("type").and_then(Value::as_str).unwrap_or("");
    if record_type != "user" && record_type != "assistant" {
        return;
    }
    let Some(message) = record
        .get("message")
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
    else {
        return;
    };

    let role = message
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or(record_type);

    match message.get("content") {
        Some(Value::String(text)) if !text.trim().is_empty() => {
            out.push(Utterance::text(role, text.as_str()));
        }
        Some(Value::Array(blocks)) => {
            for block in blocks {
                match block.get("type").and_then(Value::as_str) {
                    Some("text") => {
                        if let Some(text) = block.get("text").and_then(Value::as_str)
                            && !text.trim().is_empty()
                        {
                            out.push(Utterance::text(role, text));
                        }
                    }
                    Some("tool_use") => {
                        let name = block
                            .get("name")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown_tool");
                        out.push(Utterance::tool_use(role, name));
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Render utterances as the newline-joined conversation digest
pub fn render_digest(utterances: &[Utterance]) -> String {
    utterances
        .iter()
        .map(Utterance::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Count digest lines that start an utterance
pub fn count_messages(digest: &str) -> usize {
    digest
        .lines()
        .filter(|line| line.trim_start().starts_with('['))
        .count()
}

#[cfg(test)]
mod tests;
