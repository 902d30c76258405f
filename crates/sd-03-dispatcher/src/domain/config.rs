//! Dispatcher configuration.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Outbound delivery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Whole-request timeout, in seconds
    pub request_timeout_secs: u64,
    /// TCP connect timeout, in seconds
    pub connect_timeout_secs: u64,
    /// `User-Agent` sent with every delivery
    pub user_agent: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 5,
            user_agent: format!("secure-dispatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DispatchConfig {
    /// Create configuration from environment variables, falling back to defaults.
    ///
    /// - `SD_DISPATCH_REQUEST_TIMEOUT_SECS`
    /// - `SD_DISPATCH_CONNECT_TIMEOUT_SECS`
    /// - `SD_DISPATCH_USER_AGENT`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            request_timeout_secs: env_u64(
                "SD_DISPATCH_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            connect_timeout_secs: env_u64(
                "SD_DISPATCH_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            user_agent: env::var("SD_DISPATCH_USER_AGENT").unwrap_or(defaults.user_agent),
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
        if self.connect_timeout_secs > self.request_timeout_secs {
            return Err(ConfigError::InvalidTimeout(
                "connect_timeout_secs cannot exceed request_timeout_secs".into(),
            ));
        }
        Ok(())
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
