//! Remote API configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public demo API the dashboard reads from by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const ENV_BASE_URL: &str = "DASHKIT_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "DASHKIT_TIMEOUT_SECS";

/// Settings for the HTTP resource source.
///
/// ```
/// use dashkit::ApiConfig;
///
/// let config = ApiConfig::from_toml_str(r#"base_url = "http://localhost:3000""#).unwrap();
/// assert_eq!(config.base_url, "http://localhost:3000");
/// assert_eq!(config.timeout_secs, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the resource endpoints are appended to.
    pub base_url: String,
    /// Request timeout. `None` leaves the transport without one.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Parse a config from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Apply `DASHKIT_BASE_URL` and `DASHKIT_TIMEOUT_SECS` if set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }

    /// Full URL for an endpoint path such as `/posts`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
