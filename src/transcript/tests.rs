// src/transcript/tests.rs
// Tests for transcript reading, tail windowing and utterance extraction.

use super::*;
use serde_json::json;
use std::io::{Cursor, Write};

fn user_line(text: &str) -> String {
    json!({"type": "user", "message": {"role": "user", "content": text}}).to_string()
}

// ── collect_tail / read_transcript_tail ────────────────────────────────

#[test]
fn keeps_all_records_under_window() {
    let src = (0..5).map(|i| user_line(&format!("msg {i}"))).collect::<Vec<_>>().join("\n");
    let tail = collect_tail(Cursor::new(src), 20);
    assert_eq!(tail.records.len(), 5);
    assert_eq!(tail.total_parsed, 5);
}

#[test]
fn keeps_exactly_last_window_records_in_order() {
    let src = (0..30).map(|i| user_line(&format!("msg {i}"))).collect::<Vec<_>>().join("\n");
    let tail = collect_tail(Cursor::new(src), 20);
    assert_eq!(tail.records.len(), 20);
    assert_eq!(tail.total_parsed, 30);
    let first = tail.records[0]["message"]["content"].as_str().unwrap();
    let last = tail.records[19]["message"]["content"].as_str().unwrap();
    assert_eq!(first, "msg 10");
    assert_eq!(last, "msg 29");
}

#[test]
fn skips_malformed_lines_without_failing() {
    let src = format!("{}\nnot json\n{{\"truncated\": \n{}", user_line("a"), user_line("b"));
    let tail = collect_tail(Cursor::new(src), 20);
    assert_eq!(tail.records.len(), 2);
    assert_eq!(tail.skipped, 2);
}

#[test]
fn skips_invalid_utf8_line() {
    let mut bytes = user_line("before").into_bytes();
    bytes.push(b'\n');
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    bytes.extend_from_slice(user_line("after").as_bytes());
    let tail = collect_tail(Cursor::new(bytes), 20);
    assert_eq!(tail.records.len(), 2);
    assert_eq!(tail.skipped, 1);
}

#[test]
fn ignores_blank_lines() {
    let src = format!("\n\n{}\n   \n", user_line("hello"));
    let tail = collect_tail(Cursor::new(src), 20);
    assert_eq!(tail.records.len(), 1);
    assert_eq!(tail.skipped, 0);
}

#[test]
fn zero_window_keeps_nothing_but_counts() {
    let tail = collect_tail(Cursor::new(user_line("x")), 0);
    assert!(tail.records.is_empty());
    assert_eq!(tail.total_parsed, 1);
}

#[test]
fn missing_file_is_transcript_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_transcript_tail(&dir.path().join("missing.jsonl"), 20).unwrap_err();
    assert!(matches!(err, HookError::TranscriptUnavailable { .. }));
}

#[test]
fn file_without_parseable_records_is_unavailable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "garbage").unwrap();
    let err = read_transcript_tail(file.path(), 20).unwrap_err();
    assert!(err.to_string().contains("no parseable records"));
}

#[test]
fn reads_tail_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..3 {
        writeln!(file, "{}", user_line(&format!("line {i}"))).unwrap();
    }
    let tail = read_transcript_tail(file.path(), 2).unwrap();
    assert_eq!(tail.records.len(), 2);
    assert_eq!(tail.total_parsed, 3);
}

// ── extract_utterances ─────────────────────────────────────────────────

#[test]
fn extracts_string_content() {
    let records = vec![json!({"type": "user", "message": {"role": "user", "content": "Fix the bug"}})];
    let utterances = extract_utterances(&records);
    assert_eq!(utterances, vec![Utterance::text("user", "Fix the bug")]);
}

#[test]
fn role_falls_back_to_record_type() {
    let records = vec![json!({"type": "assistant", "message": {"content": "Done."}})];
    let utterances = extract_utterances(&records);
    assert_eq!(utterances[0].role, "assistant");
}

#[test]
fn extracts_mixed_blocks_in_order() {
    let records = vec![json!({
        "type": "assistant",
        "message": {
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Let me check."},
                {"type": "tool_use", "id": "t1", "name": "Read", "input": {}},
                {"type": "text", "text": "   "},
                {"type": "tool_result", "content": "ignored"},
                {"type": "tool_use", "id": "t2", "input": {}}
            ]
        }
    })];
    let utterances = extract_utterances(&records);
    assert_eq!(
        utterances,
        vec![
            Utterance::text("assistant", "Let me check."),
            Utterance::tool_use("assistant", "Read"),
            Utterance::tool_use("assistant", "unknown_tool"),
        ]
    );
}

#[test]
fn skips_blank_string_content() {
    let records = vec![json!({"type": "user", "message": {"role": "user", "content": "  \n "}})];
    assert!(extract_utterances(&records).is_empty());
}

#[test]
fn skips_unrecognized_record_types() {
    let records = vec![
        json!({"type": "summary", "summary": "old stuff"}),
        json!({"type": "system", "message": {"role": "system", "content": "hi"}}),
        json!({"type": "user"}),
        json!({"type": "user", "message": {}}),
        json!({"type": "user", "message": "not an object"}),
        json!({"type": "user", "message": {"role": "user", "content": 42}}),
    ];
    assert!(extract_utterances(&records).is_empty());
}

// ── render_digest / count_messages ─────────────────────────────────────

#[test]
fn renders_digest_lines() {
    let digest = render_digest(&[
        Utterance::text("user", "Please implement the parser"),
        Utterance::tool_use("assistant", "Edit"),
    ]);
    assert_eq!(digest, "[user]: Please implement the parser\n[assistant-tool]: Edit");
}

#[test]
fn empty_digest_for_no_utterances() {
    assert_eq!(render_digest(&[]), "");
}

#[test]
fn counts_only_utterance_lines() {
    let digest = "[user]: first line\ncontinued line\n[assistant]: reply\n  [assistant-tool]: Bash";
    assert_eq!(count_messages(digest), 3);
}
