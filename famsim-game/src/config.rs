//! Client configuration and save-name validation.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides the engine URL.
pub const ENGINE_URL_ENV: &str = "FAMSIM_ENGINE_URL";
pub const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOCALE: &str = "zh";
pub const DEFAULT_SAVE_NAME: &str = "autosave";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

static SAVE_NAME: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[\p{Han}A-Za-z0-9_-]{1,64}$").ok());

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the game engine, without a trailing slash.
    pub engine_url: String,
    pub locale: String,
    pub default_save_name: String,
    /// Upper bound on a single engine round-trip.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            default_save_name: DEFAULT_SAVE_NAME.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Apply environment overrides through `lookup`, usually
    /// `|key| std::env::var(key).ok()`.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENGINE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            log::debug!("engine url overridden by {ENGINE_URL_ENV}");
            self.engine_url = url;
        }
        self
    }

    #[must_use]
    pub fn with_engine_url(mut self, url: impl Into<String>) -> Self {
        self.engine_url = url.into();
        self
    }

    /// Engine URL joined with an API path such as `/api/game_state`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.engine_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Check a save name typed by the user; blank input picks the default name.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidSaveName`] for names with path separators,
/// spaces or other characters the engine would refuse.
pub fn validate_save_name(input: &str, default: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    let name = if name.is_empty() { default } else { name };
    let valid = SAVE_NAME
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name));
    if valid {
        Ok(name.to_string())
    } else {
        Err(ValidationError::InvalidSaveName(name.to_string()))
    }
}
