// src/hooks/session_start/format.rs
// Restored-context report printed for the new session

use super::RestoredContext;
use std::fmt::{self, Write};

/// Render the report. Never fails; a formatting error becomes its own message.
pub fn format_restored_context(context: &RestoredContext) -> String {
    let mut out = String::new();
    match write_report(&mut out, context) {
        Ok(()) => out,
        Err(e) => {
            tracing::error!(error = %e, "Failed to format restored context");
            format!("Error formatting restored context: {e}")
        }
    }
}

fn write_report(out: &mut impl Write, context: &RestoredContext) -> fmt::Result {
    if !context.found {
        writeln!(out, "No previous context found in memory.")?;
        write_queries(out, &context.queries_used)?;
        return Ok(());
    }

    writeln!(out, "CONTEXT RESTORED FROM MEMORY")?;
    writeln!(out)?;
    writeln!(out, "Previous Session Summary:")?;
    writeln!(out, "- Session: {}", context.source_session)?;
    writeln!(out, "- Project: {}", context.project)?;
    writeln!(out, "- Last Updated: {}", context.last_updated)?;
    writeln!(out)?;
    writeln!(out, "Summary: {}", context.summary)?;
    writeln!(out)?;

    if let Some(raw) = &context.raw_response {
        writeln!(out, "Memory Content:")?;
        writeln!(out, "{raw}")?;
        writeln!(out)?;
    }

    if !context.queries_used.is_empty() {
        write_queries(out, &context.queries_used)?;
        writeln!(out)?;
    }

    if !context.tags.is_empty() {
        writeln!(out, "Context Tags: {}", context.tags.join(", "))?;
        writeln!(out)?;
    }

    write!(out, "You can now continue from where you left off!")
}

fn write_queries(out: &mut impl Write, queries: &[String]) -> fmt::Result {
    if queries.is_empty() {
        return Ok(());
    }
    writeln!(out, "Search Queries Used: {}", queries.join(", "))
}
