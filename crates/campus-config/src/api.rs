//! Backend API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g., `http://localhost:3000/api`).
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The base URL, if set and usable.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NotConfigured` if no base URL is set
    /// - `ConfigError::InvalidValue` if it is not an http(s) URL or the
    ///   timeout is zero
    pub fn require(&self) -> Result<&str, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "api".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(matches!(
            config.require(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn require_checks_scheme() {
        let config = ApiConfig {
            base_url: "localhost:3000".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.require(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.base_url"
        ));
    }

    #[test]
    fn require_rejects_zero_timeout() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/api".into(),
            timeout_secs: 0,
        };
        assert!(matches!(
            config.require(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.timeout_secs"
        ));
    }

    #[test]
    fn require_returns_base_url() {
        let config = ApiConfig {
            base_url: "https://school.example/api".into(),
            ..Default::default()
        };
        assert_eq!(config.require().unwrap(), "https://school.example/api");
    }
}
