//! Token cache configuration.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Token cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenCacheConfig {
    /// Seconds subtracted from the identity provider's `expires_in`
    pub refresh_skew_secs: u64,
    /// HTTP request timeout for the token endpoint, in seconds
    pub request_timeout_secs: u64,
    /// TCP connect timeout for the token endpoint, in seconds
    pub connect_timeout_secs: u64,
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            refresh_skew_secs: 10,
            request_timeout_secs: 10,
            connect_timeout_secs: 3,
        }
    }
}

impl TokenCacheConfig {
    /// Create configuration from environment variables, falling back to defaults.
    ///
    /// - `SD_TOKEN_REFRESH_SKEW_SECS`
    /// - `SD_TOKEN_REQUEST_TIMEOUT_SECS`
    /// - `SD_TOKEN_CONNECT_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            refresh_skew_secs: env_u64("SD_TOKEN_REFRESH_SKEW_SECS", defaults.refresh_skew_secs)?,
            request_timeout_secs: env_u64(
                "SD_TOKEN_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            connect_timeout_secs: env_u64(
                "SD_TOKEN_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout_secs cannot be 0".into(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "connect_timeout_secs cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Refresh skew as a chrono duration.
    pub fn refresh_skew(&self) -> chrono::Duration {
        i64::try_from(self.refresh_skew_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(chrono::Duration::zero)
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TokenCacheConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_skew(), chrono::Duration::seconds(10));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = TokenCacheConfig {
            request_timeout_secs: 0,
            ..TokenCacheConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: TokenCacheConfig = serde_json::from_str(r#"{"refresh_skew_secs":0}"#).unwrap();
        assert_eq!(config.refresh_skew_secs, 0);
        assert_eq!(config.request_timeout_secs, 10);
    }
}
