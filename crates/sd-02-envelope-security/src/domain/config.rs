//! Security configuration.
//!
//! Read once at startup and passed to the engine by value; never mutated
//! afterwards.

use serde::{Deserialize, Serialize};
use shared_crypto::SecretKey;
use std::env;

use crate::domain::errors::EnvelopeError;
use crate::domain::policy::SecurityPolicy;

/// Signing/encryption switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Attach a signature to outbound envelopes
    pub sign_enabled: bool,
    /// Encrypt outbound message bodies
    pub encrypt_enabled: bool,
}

impl SecurityConfig {
    /// Create a configuration with explicit switches.
    pub fn new(sign_enabled: bool, encrypt_enabled: bool) -> Self {
        Self {
            sign_enabled,
            encrypt_enabled,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// - `SD_CRYPTO_SUPPORT_SIGNATURE`
    /// - `SD_CRYPTO_SUPPORT_ENCRYPTION`
    ///
    /// Unset variables default to `false`.
    pub fn from_env() -> Self {
        Self {
            sign_enabled: env_flag("SD_CRYPTO_SUPPORT_SIGNATURE"),
            encrypt_enabled: env_flag("SD_CRYPTO_SUPPORT_ENCRYPTION"),
        }
    }

    /// The policy branch these switches select.
    pub fn policy(&self) -> SecurityPolicy {
        SecurityPolicy::from_flags(self.sign_enabled, self.encrypt_enabled)
    }
}

/// Key material for message encryption.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Hex-encoded 256-bit secret key
    pub secret_key_hex: Option<String>,
}

impl CryptoConfig {
    /// Read `SD_CRYPTO_SECRET_KEY`.
    pub fn from_env() -> Self {
        Self {
            secret_key_hex: env::var("SD_CRYPTO_SECRET_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Decode the configured key, if any.
    pub fn secret_key(&self) -> Result<Option<SecretKey>, EnvelopeError> {
        self.secret_key_hex
            .as_deref()
            .map(SecretKey::from_hex)
            .transpose()
            .map_err(EnvelopeError::from)
    }
}

impl std::fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoConfig")
            .field(
                "secret_key_hex",
                &self.secret_key_hex.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "true" || v == "1" || v == "yes"
        })
        .unwrap_or(false)
}
