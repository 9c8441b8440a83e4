// src/classify/tables.rs
// Built-in detection tables

use super::rules::{Matcher, Rule, RuleTable};
use super::{Priority, ProjectStatus, TaskType};
use std::sync::LazyLock;

// ═══════════════════════════════════════════════════════════════════════
// Languages (any match includes the language)
// ═══════════════════════════════════════════════════════════════════════

pub(super) const LANGUAGE_PATTERNS: &[(&str, &[&str])] = &[
    (
        "python",
        &[r"\.py\b", r"python", r"pip\s+install", r"def\s+\w+", r"import\s+\w+"],
    ),
    (
        "javascript",
        &[r"\.js\b", r"\.ts\b", r"npm\s+install", r"function\s+\w+", r"const\s+\w+"],
    ),
    (
        "java",
        &[r"\.java\b", r"public\s+class", r"package\s+\w+", r"import\s+java"],
    ),
    ("go", &[r"\.go\b", r"func\s+\w+", r"package\s+main", r#"import\s+""#]),
    ("rust", &[r"\.rs\b", r"fn\s+\w+", r"use\s+std::", r"cargo\s+"]),
    (
        "shell",
        &[r"\.sh\b", r"#!/bin/bash", r"chmod\s+\+x", r"\$\{.*\}"],
    ),
    ("json", &[r"\.json\b", r#"\{.*".*":"#, r"JSON"]),
    ("yaml", &[r"\.ya?ml\b", r"---\s*$", r"^\s*\w+:\s*$"]),
    ("markdown", &[r"\.md\b", r"##?\s+", r"\[.*\]\(.*\)"]),
];

/// Compiled built-in language table
pub(super) static BUILTIN_LANGUAGES: LazyLock<RuleTable<String>> = LazyLock::new(|| {
    RuleTable::new(
        LANGUAGE_PATTERNS
            .iter()
            .map(|(lang, patterns)| {
                let matchers = patterns
                    .iter()
                    .map(|p| {
                        // SAFETY: These are static literal regex patterns covered by tests;
                        // compilation cannot fail.
                        #[allow(clippy::expect_used)]
                        Matcher::pattern(p).expect("built-in language pattern")
                    })
                    .collect();
                Rule::new(lang.to_string(), matchers)
            })
            .collect(),
    )
});

// ═══════════════════════════════════════════════════════════════════════
// Task type / priority / status (first match wins)
// ═══════════════════════════════════════════════════════════════════════

pub(super) const TASK_KEYWORDS: &[(TaskType, &[&str])] = &[
    (TaskType::Implementation, &["implement", "実装", "作成", "build"]),
    (TaskType::Debugging, &["debug", "デバッグ", "修正", "fix", "error"]),
    (TaskType::Analysis, &["analyze", "分析", "調査", "review"]),
    (TaskType::Testing, &["test", "テスト", "検証"]),
    (TaskType::Design, &["design", "設計", "architecture"]),
];

/// `Medium` has no keywords; it is the fallback.
pub(super) const PRIORITY_KEYWORDS: &[(Priority, &[&str])] = &[
    (Priority::High, &["urgent", "critical", "important", "緊急", "重要"]),
    (Priority::Low, &["later", "後で", "低優先"]),
    (Priority::Medium, &[]),
];

/// `Active` has no keywords; it is the fallback.
pub(super) const STATUS_KEYWORDS: &[(ProjectStatus, &[&str])] = &[
    (ProjectStatus::Completed, &["完了", "completed", "finished", "done"]),
    (ProjectStatus::InProgress, &["進行中", "in progress", "working on"]),
    (ProjectStatus::Started, &["開始", "started", "beginning"]),
    (ProjectStatus::Planning, &["計画", "planning", "design"]),
    (ProjectStatus::Active, &[]),
];

pub(super) fn keyword_table<L: Copy>(entries: &[(L, &[&str])]) -> RuleTable<L> {
    RuleTable::new(
        entries
            .iter()
            .map(|(label, keywords)| Rule::keywords(*label, keywords))
            .collect(),
    )
}
