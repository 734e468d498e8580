//! Configuration management utilities
//!
//! Configuration is read from an optional JSON file and then overridden by
//! environment variables. Every field has a default, so an empty object (or
//! no file at all) yields a working mock-backed setup.
//!
//! # Example
//!
//! ```json
//! {
//!   "appName": "research-graph",
//!   "logging": { "level": "DEBUG", "file": "logs/agent.log" },
//!   "provider": { "kind": "mock", "defaultResponse": "fixed answer" }
//! }
//! ```

use crate::logging::{LogLevel, LoggingConfig};
use crate::{Result, UtilsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "AGENT_LOG_LEVEL";
/// Environment variable overriding the log file
pub const ENV_LOG_FILE: &str = "AGENT_LOG_FILE";
/// Environment variable overriding the provider kind
pub const ENV_PROVIDER: &str = "AGENT_PROVIDER";
/// Environment variable overriding the model identifier
pub const ENV_MODEL: &str = "AGENT_MODEL";
/// Environment variable setting the mock provider's fixed response
pub const ENV_MOCK_RESPONSE: &str = "AGENT_MOCK_RESPONSE";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Log routing
    pub logging: LoggingSettings,
    /// Completion backend selection
    pub provider: ProviderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "agent-rs".to_string(),
            environment: "development".to_string(),
            logging: LoggingSettings::default(),
            provider: ProviderSettings::default(),
        }
    }
}

/// Logging section of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingSettings {
    /// Level name (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    pub level: String,
    /// Optional log file
    pub file: Option<PathBuf>,
    /// Prefix lines with a timestamp
    pub include_timestamp: bool,
    /// Emit JSON lines
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info.as_str().to_string(),
            file: None,
            include_timestamp: true,
            json: false,
        }
    }
}

impl LoggingSettings {
    /// Validate the level and produce a [`LoggingConfig`]
    pub fn to_logging_config(&self) -> Result<LoggingConfig> {
        Ok(LoggingConfig {
            level: self.level.parse()?,
            log_file: self.file.clone(),
            include_timestamp: self.include_timestamp,
            json: self.json,
            ..LoggingConfig::default()
        })
    }
}

/// Provider section of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderSettings {
    /// Backend kind ("mock")
    pub kind: String,
    /// Model identifier reported in responses
    pub model: Option<String>,
    /// Fixed response returned by the mock backend
    pub default_response: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: "mock".to_string(),
            model: None,
            default_response: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            UtilsError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| UtilsError::Config(format!("Failed to parse config file: {e}")))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            self.logging.file = Some(PathBuf::from(file));
        }
        if let Some(kind) = lookup(ENV_PROVIDER) {
            self.provider.kind = kind;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.provider.model = Some(model);
        }
        if let Some(response) = lookup(ENV_MOCK_RESPONSE) {
            self.provider.default_response = Some(response);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.app_name, "agent-rs");
        assert_eq!(config.provider.kind, "mock");
        assert_eq!(config.logging.level, "INFO");
        assert!(config.provider.default_response.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"logging": {"level": "DEBUG"}, "provider": {"defaultResponse": "fixed"}}"#,
        )
        .unwrap();

        assert_eq!(config.environment, "development");
        assert_eq!(config.logging.level, "DEBUG");
        assert!(config.logging.include_timestamp);
        assert_eq!(config.provider.kind, "mock");
        assert_eq!(config.provider.default_response.as_deref(), Some("fixed"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, r#"{"appName": "graph", "provider": {"model": "m-1"}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.app_name, "graph");
        assert_eq!(config.provider.model.as_deref(), Some("m-1"));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let broken = Config::from_file(&path).unwrap_err();
        assert!(broken.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let vars = HashMap::from([
            (ENV_LOG_LEVEL, "warning"),
            (ENV_LOG_FILE, "/tmp/agent.log"),
            (ENV_MOCK_RESPONSE, "canned"),
        ]);
        let config =
            Config::default().apply_env_from(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.logging.level, "warning");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/agent.log")));
        assert_eq!(config.provider.default_response.as_deref(), Some("canned"));
        assert_eq!(config.provider.kind, "mock");
        assert!(config.provider.model.is_none());
    }

    #[test]
    fn test_to_logging_config() {
        let settings = LoggingSettings {
            level: "error".to_string(),
            ..LoggingSettings::default()
        };
        let logging = settings.to_logging_config().unwrap();
        assert_eq!(logging.level, LogLevel::Error);

        let invalid = LoggingSettings {
            level: "VERBOSE".to_string(),
            ..LoggingSettings::default()
        };
        assert!(invalid.to_logging_config().is_err());
    }
}
