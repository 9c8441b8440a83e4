// src/config/env.rs
// Environment overrides applied on top of the file config

use super::HookConfig;
use tracing::warn;

/// Bridge timeout in seconds
pub const ENV_BRIDGE_TIMEOUT: &str = "COMPACT_MEMORY_BRIDGE_TIMEOUT";
/// Bridge attempts per exchange
pub const ENV_BRIDGE_ATTEMPTS: &str = "COMPACT_MEMORY_BRIDGE_ATTEMPTS";
/// Bridge program (replaces the first element of the command)
pub const ENV_BRIDGE_PROGRAM: &str = "COMPACT_MEMORY_CLI";
/// Log level
pub const ENV_LOG_LEVEL: &str = "COMPACT_MEMORY_LOG_LEVEL";
/// Enable/disable the log file
pub const ENV_LOG_FILE: &str = "COMPACT_MEMORY_LOG_FILE";

/// An environment value that could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub var: &'static str,
    pub value: String,
}

impl IgnoredOverride {
    /// Log the rejected value; call once the subscriber is installed
    pub fn log(&self) {
        warn!(value = %self.value, "Ignoring invalid {}", self.var);
    }
}

impl HookConfig {
    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> (Self, Vec<IgnoredOverride>) {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides using the given variable lookup.
    ///
    /// Empty values are skipped; unparseable values are handed back, not applied.
    pub fn with_overrides<F>(mut self, lookup: F) -> (Self, Vec<IgnoredOverride>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut ignored = Vec::new();
        let mut reject = |var: &'static str, value: String| {
            ignored.push(IgnoredOverride { var, value });
        };

        if let Some(raw) = read(ENV_BRIDGE_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.bridge.timeout_secs = secs,
                Err(_) => reject(ENV_BRIDGE_TIMEOUT, raw),
            }
        }

        if let Some(raw) = read(ENV_BRIDGE_ATTEMPTS) {
            match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => self.bridge.max_attempts = n,
                _ => reject(ENV_BRIDGE_ATTEMPTS, raw),
            }
        }

        if let Some(program) = read(ENV_BRIDGE_PROGRAM) {
            let program = program.trim().to_string();
            match self.bridge.command.first_mut() {
                Some(first) => *first = program,
                None => self.bridge.command.push(program),
            }
        }

        if let Some(level) = read(ENV_LOG_LEVEL) {
            self.logging.level = level.trim().to_lowercase();
        }

        if let Some(raw) = read(ENV_LOG_FILE) {
            match parse_bool(&raw) {
                Some(enabled) => self.logging.file = enabled,
                None => reject(ENV_LOG_FILE, raw),
            }
        }

        (self, ignored)
    }
}

/// Parse a boolean flag value
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = HookConfig::default().with_overrides(lookup(&[])).0;
        assert_eq!(config.bridge.timeout_secs, 180);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file);
    }

    #[test]
    fn test_timeout_and_attempts_override() {
        let (config, ignored) = HookConfig::default().with_overrides(lookup(&[
            (ENV_BRIDGE_TIMEOUT, "45"),
            (ENV_BRIDGE_ATTEMPTS, "3"),
        ]));
        assert!(ignored.is_empty());
        assert_eq!(config.bridge.timeout_secs, 45);
        assert_eq!(config.bridge.max_attempts, 3);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let (config, ignored) = HookConfig::default().with_overrides(lookup(&[
            (ENV_BRIDGE_TIMEOUT, "soon"),
            (ENV_BRIDGE_ATTEMPTS, "0"),
            (ENV_LOG_FILE, "maybe"),
        ]));
        assert_eq!(config.bridge.timeout_secs, 180);
        assert_eq!(config.bridge.max_attempts, 1);
        assert!(config.logging.file);
        let vars: Vec<&str> = ignored.iter().map(|i| i.var).collect();
        assert_eq!(vars, vec![ENV_BRIDGE_TIMEOUT, ENV_BRIDGE_ATTEMPTS, ENV_LOG_FILE]);
        assert_eq!(ignored[0].value, "soon");
    }

    #[test]
    fn test_program_override_replaces_first_arg() {
        let config = HookConfig::default()
            .with_overrides(lookup(&[(ENV_BRIDGE_PROGRAM, "/opt/bin/claude")]))
            .0;
        assert_eq!(config.bridge.command[0], "/opt/bin/claude");
        assert_eq!(config.bridge.command[1], "--print");
    }

    #[test]
    fn test_program_override_on_empty_command() {
        let mut base = HookConfig::default();
        base.bridge.command.clear();
        let config = base.with_overrides(lookup(&[(ENV_BRIDGE_PROGRAM, "mem")])).0;
        assert_eq!(config.bridge.command, vec!["mem"]);
    }

    #[test]
    fn test_empty_value_ignored() {
        let config = HookConfig::default().with_overrides(lookup(&[(ENV_LOG_LEVEL, "  ")])).0;
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_log_overrides() {
        let config = HookConfig::default()
            .with_overrides(lookup(&[(ENV_LOG_LEVEL, "DEBUG"), (ENV_LOG_FILE, "off")]))
            .0;
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("nah"), None);
    }
}
