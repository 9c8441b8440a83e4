// src/hooks/precompact/record.rs
// Memory record assembly and document rendering

use crate::classify::{ClassificationResult, MARKER_TAG, ProjectStatus};
use crate::error::Result;
use crate::project::ProjectContext;
use crate::transcript::count_messages;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;

/// Trigger event recorded in the metadata envelope
const TRIGGER_EVENT: &str = "auto-compact";

/// Everything saved for one auto-compact event. Built once, submitted once.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryRecord {
    pub session_id: String,
    pub timestamp: String,
    pub project: ProjectContext,
    pub digest: String,
    pub tags: Vec<String>,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordMetadata {
    pub message_count: usize,
    pub working_directory: String,
    pub languages: Vec<String>,
    pub status: ProjectStatus,
}

impl MemoryRecord {
    /// Tags and metadata come from the same classification so they never disagree
    pub fn build(
        session_id: &str,
        digest: &str,
        project: ProjectContext,
        classification: &ClassificationResult,
        timestamp: String,
    ) -> Self {
        let tags = classification.tags(&project);
        let metadata = RecordMetadata {
            message_count: count_messages(digest),
            working_directory: project.path.clone(),
            languages: classification.languages.clone(),
            status: classification.status,
        };
        Self {
            session_id: session_id.to_string(),
            timestamp,
            project,
            digest: digest.to_string(),
            tags,
            metadata,
        }
    }

    /// camelCase envelope understood by the Memory Service
    pub fn metadata_envelope(&self) -> serde_json::Value {
        json!({
            "sessionId": self.session_id,
            "source": MARKER_TAG,
            "projectId": self.project.name,
            "timestamp": self.timestamp,
            "tags": self.tags,
            "context": {
                "triggerEvent": TRIGGER_EVENT,
                "messageCount": self.metadata.message_count,
                "workingDirectory": self.metadata.working_directory,
                "detectedLanguages": self.metadata.languages,
                "projectStatus": self.metadata.status,
            }
        })
    }

    /// Render the prompt submitted to the Memory Service.
    ///
    /// `store_tool` is the tool the service should use to persist the summary.
    pub fn render_document(&self, store_tool: &str) -> Result<String> {
        let envelope = serde_json::to_string_pretty(&self.metadata_envelope())?;
        let mut doc = String::with_capacity(self.digest.len() + envelope.len() + 1024);

        // Writing to a String cannot fail
        let _ = writeln!(doc, "Auto-Compact Memory Archive");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "# Session Context");
        let _ = writeln!(doc, "- Session ID: {}", self.session_id);
        let _ = writeln!(doc, "- Timestamp: {}", self.timestamp);
        let _ = writeln!(doc, "- Event: {TRIGGER_EVENT} triggered");
        let _ = writeln!(doc, "- Project: {}", self.project.name);
        let _ = writeln!(doc, "- Working Directory: {}", self.project.path);
        let _ = writeln!(doc);
        let _ = writeln!(doc, "# Summary Request");
        let _ = writeln!(
            doc,
            "From the conversation below, captured just before auto-compact, extract and \
             summarize what the next session needs to continue the work, then store it \
             using `{store_tool}`."
        );
        let _ = writeln!(doc);
        let _ = writeln!(doc, "{}", self.digest);
        let _ = writeln!(doc);
        let _ = writeln!(doc, "# Memory Extraction Instructions");
        let _ = writeln!(doc, "## Project Goals & Current Status");
        let _ = writeln!(doc, "- Record the purpose of the project and its current progress");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "## Active Tasks & Next Steps");
        let _ = writeln!(doc, "- List ongoing tasks and the next actions to take");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "## Technical Context");
        let _ = writeln!(doc, "- Keep important technical decisions and findings");
        let _ = writeln!(doc, "- Record the technology stack and approaches in use");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "## Important Context");
        let _ = writeln!(doc, "- Remember user requirements and constraints");
        let _ = writeln!(doc, "- Note caveats and known issues");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "## Classification Tags");
        let _ = writeln!(doc, "Tag the memory with:");
        for tag in &self.tags {
            let _ = writeln!(doc, "- {tag}");
        }
        let _ = writeln!(doc);
        let _ = writeln!(doc, "## Metadata");
        let _ = writeln!(doc, "```json");
        let _ = writeln!(doc, "{envelope}");
        let _ = write!(doc, "```");

        Ok(doc)
    }
}
