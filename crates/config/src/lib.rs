//! Configuration loading, validation, and management for Colloquy.
//!
//! Loads configuration from `~/.colloquy/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.colloquy/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the completion endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Completion provider name
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Override the provider's base URL (e.g. a local Ollama endpoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Context chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("chunking", &self.chunking)
            .finish()
    }
}

/// Token-budget settings for chunk building and chaining.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Token budget for a single generation call's context window
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Cross-batch continuity tokens for sequential chaining
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,

    /// Section priority order; empty means the built-in order
    #[serde(default)]
    pub priority_order: Vec<String>,
}

fn default_max_tokens() -> usize {
    120_000
}
fn default_overlap_tokens() -> usize {
    2_000
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap_tokens(),
            priority_order: vec![],
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.colloquy/config.toml).
    ///
    /// Also checks environment variables:
    /// - `COLLOQUY_API_KEY` (highest priority), then `OPENROUTER_API_KEY`,
    ///   then `OPENAI_API_KEY`
    /// - `COLLOQUY_PROVIDER` and `COLLOQUY_MODEL` override their fields
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("COLLOQUY_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENROUTER_API_KEY").ok())
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(provider) = std::env::var("COLLOQUY_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("COLLOQUY_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".colloquy")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.chunking.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "chunking.max_tokens must be greater than 0".into(),
            ));
        }

        if self.chunking.overlap_tokens >= self.chunking.max_tokens {
            return Err(ConfigError::ValidationError(
                "chunking.overlap_tokens must be smaller than chunking.max_tokens".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            base_url: None,
            model: default_model(),
            chunking: ChunkingConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.chunking.max_tokens, 120_000);
        assert_eq!(config.chunking.overlap_tokens, 2_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.provider, config.provider);
        assert_eq!(parsed.chunking.max_tokens, config.chunking.max_tokens);
    }

    #[test]
    fn zero_max_tokens_rejected() {
        let config = AppConfig {
            chunking: ChunkingConfig {
                max_tokens: 0,
                ..ChunkingConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn overlap_must_be_smaller_than_budget() {
        let config = AppConfig {
            chunking: ChunkingConfig {
                max_tokens: 1_000,
                overlap_tokens: 1_000,
                ..ChunkingConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().model, "gpt-4o");
    }

    #[test]
    fn loads_and_validates_a_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_key = "sk-test"
model = "gpt-4o-mini"

[chunking]
max_tokens = 60000
overlap_tokens = 1000
priority_order = ["project_summary", "question_answers"]
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.has_api_key());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.chunking.max_tokens, 60_000);
        assert_eq!(config.chunking.priority_order.len(), 2);
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_the_api_key() {
        let config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
