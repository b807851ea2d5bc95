//! Optional TOML configuration for the CLI.
//!
//! All fields have defaults so the tool works with no config file at all;
//! a partial file overrides only the sections it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use llmbatch_core::RetryConfig;

/// Resolved CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub completion: CompletionSettings,
    pub retry: RetrySettings,
}

/// Settings for the synchronous completion endpoint used by `template --execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompletionSettings {
    /// OpenAI-compatible chat-completions URL.
    pub api_url: String,
    /// Environment variable holding the bearer token for that endpoint.
    pub api_key_env: String,
}

/// Backoff settings for retried completion calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_secs: u64,
    pub max_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completion: CompletionSettings::default(),
            retry: RetrySettings::default(),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        let defaults = RetryConfig::default();
        Self {
            max_attempts: defaults.max_attempts,
            base_delay_secs: defaults.base_delay.as_secs(),
            max_delay_secs: defaults.max_delay.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `~/.llm-batch/config.toml`
    /// when no path is given. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };
        if !path.is_file() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.retry.max_attempts,
            base_delay: Duration::from_secs(self.retry.base_delay_secs),
            max_delay: Duration::from_secs(self.retry.max_delay_secs),
            ..RetryConfig::default()
        }
    }
}

/// Per-user application directory (`~/.llm-batch`).
pub(crate) fn app_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".llm-batch"))
        .unwrap_or_else(|| PathBuf::from(".llm-batch"))
}

fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}
