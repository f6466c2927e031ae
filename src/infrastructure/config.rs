//! Configuration management
//!
//! Settings come from defaults, then an optional YAML file, then the
//! `JENKINS_URL`, `JENKINS_USER` and `JENKINS_API_TOKEN` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::TransportError;

/// Environment variable overriding [`Config::base_url`]
pub const ENV_URL: &str = "JENKINS_URL";
/// Environment variable overriding [`Config::username`]
pub const ENV_USER: &str = "JENKINS_USER";
/// Environment variable overriding [`Config::api_token`]
pub const ENV_TOKEN: &str = "JENKINS_API_TOKEN";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),

    /// The timeout is zero
    #[error("Invalid timeout: must be positive")]
    InvalidTimeout,

    /// The transport could not be built from this configuration
    #[error("Transport setup failed: {0}")]
    Transport(#[from] TransportError),
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Jenkins base URL, including any context path
    pub base_url: String,
    /// User for basic auth
    pub username: Option<String>,
    /// API token or password for basic auth
    pub api_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            username: None,
            api_token: None,
            timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads a YAML configuration file; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_yaml::from_str(&content)?)
    }

    /// Default configuration with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_URL) {
            self.base_url = url;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.username = Some(user);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.api_token = Some(token);
        }
        self
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error for a non-http(s) URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Basic auth credentials, when both user and token are set
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.api_token) {
            (Some(user), Some(token)) => Some((user.as_str(), token.as_str())),
            _ => None,
        }
    }
}
