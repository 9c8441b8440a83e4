// src/hooks/session_start/query.rs
// Memory search queries and the search prompt

use crate::bridge::BridgeReply;
use crate::classify::{MARKER_TAG, Priority, ProjectStatus};
use crate::config::MemoryServiceConfig;
use crate::project::{ProjectContext, UNKNOWN};
use crate::utils::short_session_id;

/// Reply the search prompt asks for when nothing relevant exists
pub const NO_MEMORY_REPLY: &str = "no related memories";

/// Ordered candidate search strings, most specific first
pub type MemoryQuery = Vec<String>;

pub fn build_queries(session_id: &str, project: &ProjectContext) -> MemoryQuery {
    let mut queries = Vec::with_capacity(5);

    if !session_id.is_empty() && session_id != UNKNOWN {
        queries.push(format!("session-id:{} {MARKER_TAG}", short_session_id(session_id)));
    }

    if project.is_known() {
        queries.push(format!("project:{} status:{}", project.name, ProjectStatus::InProgress));
        queries.push(format!("project:{} priority:{}", project.name, Priority::High));
    }

    queries.push(format!("{MARKER_TAG} priority:{}", Priority::High));
    queries.push(format!("status:{} recent", ProjectStatus::InProgress));
    queries
}

/// Session label used in prompts and reports
pub fn session_label(session_id: &str) -> String {
    if session_id.is_empty() {
        UNKNOWN.to_string()
    } else {
        short_session_id(session_id)
    }
}

/// Prompt asking the Memory Service to search and summarize
pub fn search_prompt(
    query: &str,
    project: &ProjectContext,
    session_id: &str,
    tools: &MemoryServiceConfig,
) -> String {
    format!(
        "Restore memories with the following steps:\n\
         \n\
         1. Search using `{search}`:\n   \
            - Query: \"{query}\"\n   \
            - Project: {project}\n   \
            - Session: {session}\n\
         \n\
         2. If related memories are found, fetch the details using `{store}`\n\
         \n\
         3. Organize and return:\n   \
            - Ongoing tasks and goals\n   \
            - Technical context\n   \
            - Important decisions and findings\n\
         \n\
         If nothing is found, reply with \"{NO_MEMORY_REPLY}\".",
        search = tools.search_tool,
        store = tools.store_tool,
        project = project.name,
        session = session_label(session_id),
    )
}

/// Whether a reply carries memory rather than the empty-result sentinel
pub fn is_memory_reply(reply: &BridgeReply) -> bool {
    !reply.is_blank() && !reply.text.trim().eq_ignore_ascii_case(NO_MEMORY_REPLY)
}
