//! Client configuration.
//!
//! Base URL selection by environment (a developer-local backend versus the
//! deployed one) plus the transport timeout. Loaded from a JSON file under
//! the platform config directory; missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Default URL for a developer-local backend.
const LOCAL_URL: &str = "http://localhost:2222";

/// Default URL for the deployed backend.
const PRODUCTION_URL: &str = "https://api.spendtrack.app";

// ============================================================================
// Config Error
// ============================================================================

/// Error type for configuration loading/saving.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading or writing the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Environment
// ============================================================================

/// Which backend the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Developer-local backend.
    #[default]
    Local,
    /// Deployed backend.
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("Unknown environment: {other}")),
        }
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Selected environment.
    #[serde(default)]
    pub environment: Environment,
    /// Base URL of the developer-local backend.
    #[serde(default = "default_local_url")]
    pub local_url: String,
    /// Base URL of the deployed backend.
    #[serde(default = "default_production_url")]
    pub production_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_local_url() -> String {
    LOCAL_URL.to_string()
}

fn default_production_url() -> String {
    PRODUCTION_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            local_url: default_local_url(),
            production_url: default_production_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Returns the base URL for the selected environment.
    pub fn base_url(&self) -> &str {
        match self.environment {
            Environment::Local => &self.local_url,
            Environment::Production => &self.production_url,
        }
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spendtrack")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path; missing file means
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&content)?;

        info!(path = %path.display(), environment = %config.environment, "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Saves configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_follows_environment() {
        let mut config = ClientConfig::default();
        assert_eq!(config.base_url(), LOCAL_URL);

        config.environment = Environment::Production;
        assert_eq!(config.base_url(), PRODUCTION_URL);
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!(
            "PROD".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "environment": "production" }"#).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.local_url, LOCAL_URL);
    }
}
