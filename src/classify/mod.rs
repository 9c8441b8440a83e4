// src/classify/mod.rs
// Content classification: languages, task type, priority and status tags

pub mod rules;
mod tables;

use crate::config::ClassifierConfig;
use crate::project::ProjectContext;
use rules::{Matcher, Rule, RuleTable};
use serde::Serialize;

/// Marker tag carried by every memory this tool writes
pub const MARKER_TAG: &str = "auto-compact";
/// Language reported when no language pattern matches
pub const GENERAL_LANGUAGE: &str = "general";

/// Kind of work the conversation was about
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskType {
    Implementation,
    Debugging,
    Analysis,
    Testing,
    Design,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Priority {
    High,
    Low,
    Medium,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Started,
    Planning,
    Active,
}

/// Everything the classifier derives from one digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Table order; `["general"]` when nothing matched
    pub languages: Vec<String>,
    pub task_type: Option<TaskType>,
    pub priority: Priority,
    pub status: ProjectStatus,
}

impl ClassificationResult {
    /// Ordered tag list: marker, project, languages, task, priority, status
    pub fn tags(&self, project: &ProjectContext) -> Vec<String> {
        let mut tags = vec![MARKER_TAG.to_string()];
        if project.is_known() {
            tags.push(format!("project:{}", project.name));
        }
        tags.extend(self.languages.iter().map(|l| format!("lang:{l}")));
        if let Some(task) = self.task_type {
            tags.push(format!("task:{task}"));
        }
        tags.push(format!("priority:{}", self.priority));
        tags.push(format!("status:{}", self.status));
        tags
    }
}

/// Pattern-table classifier. Pure and deterministic; never fails.
#[derive(Debug, Clone)]
pub struct Classifier {
    languages: RuleTable<String>,
    tasks: RuleTable<TaskType>,
    priorities: RuleTable<Priority>,
    statuses: RuleTable<ProjectStatus>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            languages: tables::BUILTIN_LANGUAGES.clone(),
            tasks: tables::keyword_table(tables::TASK_KEYWORDS),
            priorities: tables::keyword_table(tables::PRIORITY_KEYWORDS),
            statuses: tables::keyword_table(tables::STATUS_KEYWORDS),
        }
    }
}

impl Classifier {
    /// Built-in tables plus any extra language rules from config.
    ///
    /// An extra rule naming an existing language adds its patterns to that
    /// language. Extra patterns that fail to compile are logged and dropped.
    pub fn new(config: &ClassifierConfig) -> Self {
        let mut classifier = Self::default();
        for extra in &config.languages {
            let matchers: Vec<Matcher> = extra
                .patterns
                .iter()
                .filter_map(|p| match Matcher::pattern(p) {
                    Ok(m) => Some(m),
                    Err(e) => {
                        tracing::warn!(language = %extra.name, pattern = %p, error = %e, "Dropping invalid language pattern");
                        None
                    }
                })
                .collect();
            if matchers.is_empty() {
                continue;
            }
            classifier
                .languages
                .merge(Rule::new(extra.name.clone(), matchers));
        }
        classifier
    }

    pub fn detect_languages(&self, text: &str) -> Vec<String> {
        let languages = self.languages.all_matches(text);
        if languages.is_empty() {
            vec![GENERAL_LANGUAGE.to_string()]
        } else {
            languages
        }
    }

    pub fn detect_task_type(&self, text: &str) -> Option<TaskType> {
        self.tasks.first_match(text)
    }

    pub fn detect_priority(&self, text: &str) -> Priority {
        self.priorities.first_match(text).unwrap_or(Priority::Medium)
    }

    pub fn detect_status(&self, text: &str) -> ProjectStatus {
        self.statuses.first_match(text).unwrap_or(ProjectStatus::Active)
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        ClassificationResult {
            languages: self.detect_languages(text),
            task_type: self.detect_task_type(text),
            priority: self.detect_priority(text),
            status: self.detect_status(text),
        }
    }

    pub fn build_tags(&self, text: &str, project: &ProjectContext) -> Vec<String> {
        self.classify(text).tags(project)
    }
}
