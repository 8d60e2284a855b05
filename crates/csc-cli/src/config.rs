//! Console configuration
//!
//! Loaded from a TOML file when one is given, then overridden by
//! environment variables:
//!
//! - `CS_CONSOLE_STORE`: path of the JSON store file
//! - `CS_CONSOLE_LOG_LEVEL`: default log level

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment override for [`ConsoleConfig::store_path`]
pub const STORE_ENV: &str = "CS_CONSOLE_STORE";

/// Environment override for [`ConsoleConfig::log_level`]
pub const LOG_LEVEL_ENV: &str = "CS_CONSOLE_LOG_LEVEL";

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// JSON file holding persisted client state
    pub store_path: PathBuf,
    /// Default log level when no log env var is set
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("cs-console-store.json"),
            log_level: "warn".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// Fails on malformed TOML or unknown keys.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid console config")
    }

    /// Load from `path`, or defaults when no path is given
    ///
    /// # Errors
    /// Fails if an explicit file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Apply environment overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(STORE_ENV).filter(|v| !v.is_empty()) {
            self.store_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
        self
    }
}
