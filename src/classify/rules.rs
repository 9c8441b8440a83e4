// src/classify/rules.rs
// Generic label/matcher tables shared by every detector

use regex::{Regex, RegexBuilder};

/// A single way a rule can match text
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-insensitive substring (stored lowercased)
    Keyword(String),
    /// Case-insensitive, multi-line regex
    Pattern(Regex),
}

impl Matcher {
    pub fn keyword(keyword: &str) -> Self {
        Matcher::Keyword(keyword.to_lowercase())
    }

    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map(Matcher::Pattern)
    }

    /// `lower` must be `text.to_lowercase()`; it is computed once per table scan.
    fn is_match(&self, text: &str, lower: &str) -> bool {
        match self {
            Matcher::Keyword(kw) => lower.contains(kw.as_str()),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }
}

/// A label and the matchers that select it.
///
/// A rule with no matchers never matches; it documents a fallback label.
#[derive(Debug, Clone)]
pub struct Rule<L> {
    pub label: L,
    pub matchers: Vec<Matcher>,
}

impl<L> Rule<L> {
    pub fn new(label: L, matchers: Vec<Matcher>) -> Self {
        Self { label, matchers }
    }

    /// Build a rule from plain keywords
    pub fn keywords(label: L, keywords: &[&str]) -> Self {
        Self::new(label, keywords.iter().map(|k| Matcher::keyword(k)).collect())
    }

    fn matches(&self, text: &str, lower: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(text, lower))
    }
}

/// Ordered rules; order is precedence for `first_match`
#[derive(Debug, Clone)]
pub struct RuleTable<L> {
    rules: Vec<Rule<L>>,
}

impl<L: Clone> RuleTable<L> {
    pub fn new(rules: Vec<Rule<L>>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: Rule<L>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every label with at least one matching matcher, in table order
    pub fn all_matches(&self, text: &str) -> Vec<L> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .filter(|r| r.matches(text, &lower))
            .map(|r| r.label.clone())
            .collect()
    }

    /// The first label in table order with a matching matcher
    pub fn first_match(&self, text: &str) -> Option<L> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(text, &lower))
            .map(|r| r.label.clone())
    }
}

impl<L: Clone + PartialEq> RuleTable<L> {
    /// Add matchers to the rule with the same label, or append a new rule.
    ///
    /// A label appears at most once, so `all_matches` never repeats it.
    pub fn merge(&mut self, rule: Rule<L>) {
        match self.rules.iter_mut().find(|r| r.label == rule.label) {
            Some(existing) => existing.matchers.extend(rule.matchers),
            None => self.push(rule),
        }
    }
}
