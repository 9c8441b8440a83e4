// src/config/file.rs
// File-based configuration from ~/.compact-memory/config.toml

use super::{
    DEFAULT_BRIDGE_ATTEMPTS, DEFAULT_BRIDGE_TIMEOUT_SECS, DEFAULT_MAX_PREVIEW,
    DEFAULT_MAX_QUERIES, DEFAULT_MAX_RESPONSE_PREVIEW, DEFAULT_TRANSCRIPT_WINDOW, data_dir,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Top-level config structure, passed explicitly into every hook component
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct HookConfig {
    pub bridge: BridgeConfig,
    pub memory_service: MemoryServiceConfig,
    pub transcript: TranscriptConfig,
    pub project: ProjectConfig,
    pub reader: ReaderConfig,
    pub logging: LoggingConfig,
    pub classifier: ClassifierConfig,
}

/// How to reach the Memory Service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Program and arguments; the prompt is written to stdin
    pub command: Vec<String>,
    pub timeout_secs: u64,
    /// Total attempts per exchange (1 = no retry)
    pub max_attempts: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "claude".to_string(),
                "--print".to_string(),
                "--dangerously-skip-permissions".to_string(),
            ],
            timeout_secs: DEFAULT_BRIDGE_TIMEOUT_SECS,
            max_attempts: DEFAULT_BRIDGE_ATTEMPTS,
        }
    }
}

impl BridgeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Tool names the receiving agent is asked to call
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryServiceConfig {
    pub store_tool: String,
    pub search_tool: String,
}

impl Default for MemoryServiceConfig {
    fn default() -> Self {
        Self {
            store_tool: "ask_cipher".to_string(),
            search_tool: "cipher_memory_search".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Number of trailing records considered for the digest
    pub window: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_TRANSCRIPT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Path segments that precede a project directory
    pub markers: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            markers: ["Documents", "Projects", "workspace", "code"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub max_queries: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_queries: DEFAULT_MAX_QUERIES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace | debug | info | warn | error
    pub level: String,
    /// Also append to `<dir>/hook.log`
    pub file: bool,
    pub dir: Option<PathBuf>,
    pub max_preview: usize,
    pub max_response_preview: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
            dir: None,
            max_preview: DEFAULT_MAX_PREVIEW,
            max_response_preview: DEFAULT_MAX_RESPONSE_PREVIEW,
        }
    }
}

impl LoggingConfig {
    /// Resolved log directory (defaults to ~/.compact-memory/logs)
    pub fn log_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| data_dir().join("logs"))
    }
}

/// Additional language rules appended after the built-in table
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ClassifierConfig {
    pub languages: Vec<LanguageRuleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageRuleConfig {
    pub name: String,
    pub patterns: Vec<String>,
}

/// What happened when the config file was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, reason: String },
}

impl ConfigSource {
    /// Log the outcome; call once the subscriber is installed
    pub fn log(&self) {
        match self {
            Self::File(path) => debug!(path = %path.display(), "Loaded config from file"),
            Self::Missing(path) => {
                debug!(path = %path.display(), "Config file not found, using defaults")
            }
            Self::Invalid { path, reason } => {
                warn!(path = %path.display(), error = %reason, "Failed to parse config file, using defaults")
            }
        }
    }
}

impl HookConfig {
    /// Load config from the given path, or ~/.compact-memory/config.toml.
    ///
    /// Never fails: a missing or malformed file falls back to defaults. The
    /// outcome is returned for logging once the subscriber is up.
    pub fn load_with_source(path: Option<&Path>) -> (Self, ConfigSource) {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => (config, ConfigSource::File(path)),
                Err(e) => (
                    Self::default(),
                    ConfigSource::Invalid {
                        path,
                        reason: e.to_string(),
                    },
                ),
            },
            Err(_) => (Self::default(), ConfigSource::Missing(path)),
        }
    }

    /// Parse a TOML document into a config
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        data_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = HookConfig::parse("").unwrap();
        assert_eq!(config.transcript.window, 20);
        assert_eq!(config.bridge.timeout_secs, 180);
        assert_eq!(config.bridge.max_attempts, 1);
        assert_eq!(config.reader.max_queries, 2);
        assert_eq!(config.bridge.command[0], "claude");
    }

    #[test]
    fn test_parse_partial_section_keeps_other_defaults() {
        let toml = r#"
[bridge]
timeout_secs = 30
"#;
        let config = HookConfig::parse(toml).unwrap();
        assert_eq!(config.bridge.timeout_secs, 30);
        assert_eq!(config.bridge.max_attempts, 1);
        assert_eq!(config.bridge.command.len(), 3);
        assert_eq!(config.bridge.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[bridge]
command = ["mem-cli", "--stdin"]
max_attempts = 3

[memory_service]
store_tool = "store_memory"
search_tool = "search_memory"

[transcript]
window = 50

[project]
markers = ["src", "repos"]

[reader]
max_queries = 1

[logging]
level = "debug"
file = false
dir = "/tmp/hook-logs"

[[classifier.languages]]
name = "kotlin"
patterns = ['\.kt\b', 'fun\s+\w+']
"#;
        let config = HookConfig::parse(toml).unwrap();
        assert_eq!(config.bridge.command, vec!["mem-cli", "--stdin"]);
        assert_eq!(config.bridge.max_attempts, 3);
        assert_eq!(config.memory_service.store_tool, "store_memory");
        assert_eq!(config.memory_service.search_tool, "search_memory");
        assert_eq!(config.transcript.window, 50);
        assert_eq!(config.project.markers, vec!["src", "repos"]);
        assert_eq!(config.reader.max_queries, 1);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
        assert_eq!(config.logging.log_dir(), PathBuf::from("/tmp/hook-logs"));
        assert_eq!(config.classifier.languages.len(), 1);
        assert_eq!(config.classifier.languages[0].name, "kotlin");
        assert_eq!(config.classifier.languages[0].patterns.len(), 2);
    }

    #[test]
    fn test_parse_invalid_config_is_error() {
        assert!(HookConfig::parse("[bridge]\ntimeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let (config, source) = HookConfig::load_with_source(Some(&path));
        assert_eq!(config.transcript.window, 20);
        assert_eq!(source, ConfigSource::Missing(path));
    }

    #[test]
    fn test_load_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        let (config, source) = HookConfig::load_with_source(Some(&path));
        assert_eq!(config.reader.max_queries, 2);
        assert!(matches!(source, ConfigSource::Invalid { .. }));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[transcript]\nwindow = 5\n").unwrap();
        let (config, source) = HookConfig::load_with_source(Some(&path));
        assert_eq!(config.transcript.window, 5);
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_default_project_markers() {
        let config = ProjectConfig::default();
        assert_eq!(
            config.markers,
            vec!["Documents", "Projects", "workspace", "code"]
        );
    }
}
