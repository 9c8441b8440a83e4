// src/utils.rs
// Utility functions module

use chrono::Utc;

// ============================================================================
// Timestamp utilities
// ============================================================================

/// Current UTC time as an RFC 3339 string
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

// ============================================================================
// String utilities
// ============================================================================

/// Truncate a string at a char boundary, never splitting a multi-byte char.
///
/// Returns a slice of at most `max_bytes` bytes.
pub fn truncate_at_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    &s[..s.floor_char_boundary(max_bytes)]
}

/// Truncate text for log previews, appending "..." when anything was cut.
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// First eight characters of a session id, used in queries and log lines
pub fn short_session_id(session_id: &str) -> String {
    session_id.chars().take(8).collect()
}
