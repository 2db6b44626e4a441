//! Application configuration loaded from TOML.
//!
//! Only the retrieval tunables live in the file. The operator credential
//! and endpoint URLs always come from the environment so they never end
//! up in a checked-in config.

use std::path::{Path, PathBuf};

use law_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Precedent web search settings.
    pub web_search: WebSearchConfig,
}

/// `[web_search]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchConfig {
    /// Number of list results requested per search.
    pub display: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum detail fetches in flight at once.
    pub max_concurrent_fetches: usize,
    /// Upper bound in seconds for one batch of detail fetches.
    pub batch_deadline_seconds: u64,
    /// Optional User-Agent override.
    pub user_agent: Option<String>,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        let defaults = SearchConfig::default();
        Self {
            display: defaults.display,
            timeout_seconds: defaults.timeout_seconds,
            max_concurrent_fetches: defaults.max_concurrent_fetches,
            batch_deadline_seconds: defaults.batch_deadline_seconds,
            user_agent: defaults.user_agent,
        }
    }
}

impl WebSearchConfig {
    /// The tunables as a [`SearchConfig`] with no credential or endpoints.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            display: self.display,
            timeout_seconds: self.timeout_seconds,
            max_concurrent_fetches: self.max_concurrent_fetches,
            batch_deadline_seconds: self.batch_deadline_seconds,
            user_agent: self.user_agent.clone(),
            ..SearchConfig::default()
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::info!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "config file not found; using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/precedent-retrieval/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("precedent-retrieval")
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("precedent-retrieval")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/precedent-retrieval/config.toml")
        }
    }

    /// Build a validated [`SearchConfig`] from this file plus the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required environment variable is missing or
    /// the combined configuration is invalid.
    pub fn search_config(&self) -> Result<SearchConfig> {
        self.search_config_from(|key| std::env::var(key).ok())
    }

    /// [`AppConfig::search_config`] with a custom environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::search_config`].
    pub fn search_config_from<F>(&self, lookup: F) -> Result<SearchConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = self.web_search.to_search_config().with_env_from(lookup)?;
        config.validate()?;
        Ok(config)
    }
}
