//! # Envelope Security Service
//!
//! Application services implementing the inbound ports:
//! - `SecurityPolicyEngine` secures outbound envelopes
//! - `EnvelopeVerifier` opens envelopes secured by a peer with the same policy
//!
//! ## Ordering
//!
//! Encryption is applied before signing, and the signature covers the final
//! message text and the final header (encrypted flag included). Any failure
//! aborts the whole operation; no partially secured envelope is returned.

use std::sync::Arc;

use shared_crypto::{CryptoProvider, SecretKey};
use shared_types::{Envelope, Message};
use tracing::{debug, warn};

use crate::domain::config::SecurityConfig;
use crate::domain::errors::EnvelopeError;
use crate::domain::policy::SecurityPolicy;
use crate::domain::signing::signing_input;
use crate::ports::inbound::{EnvelopeOpenApi, EnvelopeSecurityApi};

/// Applies one of the four sign/encrypt branches to every envelope.
pub struct SecurityPolicyEngine {
    policy: SecurityPolicy,
    provider: Arc<dyn CryptoProvider>,
    key: Option<SecretKey>,
}

impl SecurityPolicyEngine {
    /// Create an engine bound to `config`.
    ///
    /// # Errors
    ///
    /// `EnvelopeError::MissingKey` if encryption is enabled without a key.
    pub fn new(
        config: SecurityConfig,
        provider: Arc<dyn CryptoProvider>,
        key: Option<SecretKey>,
    ) -> Result<Self, EnvelopeError> {
        let policy = config.policy();
        if policy.encrypts() && key.is_none() {
            return Err(EnvelopeError::MissingKey);
        }
        Ok(Self {
            policy,
            provider,
            key,
        })
    }

    fn key(&self) -> Result<&SecretKey, EnvelopeError> {
        self.key.as_ref().ok_or(EnvelopeError::MissingKey)
    }
}

impl EnvelopeSecurityApi for SecurityPolicyEngine {
    fn policy(&self) -> SecurityPolicy {
        self.policy
    }

    fn secure(&self, envelope: Envelope) -> Result<Envelope, EnvelopeError> {
        let (header, message, _) = envelope.into_parts();
        if message.is_ciphertext() {
            return Err(EnvelopeError::AlreadyEncrypted);
        }

        let message = if self.policy.encrypts() {
            let ciphertext = self.provider.encrypt(message.as_str(), self.key()?)?;
            Message::Ciphertext(ciphertext)
        } else {
            message
        };

        let secured = Envelope::from_parts(header, message, None);
        if !self.policy.signs() {
            debug!(
                message_id = %secured.header().message_id,
                policy = %self.policy,
                "Envelope secured"
            );
            return Ok(secured);
        }

        let input = signing_input(secured.message(), secured.header())?;
        let signature = self.provider.hash(&input)?;
        let (header, message, _) = secured.into_parts();

        debug!(
            message_id = %header.message_id,
            policy = %self.policy,
            "Envelope secured"
        );
        Ok(Envelope::from_parts(header, message, Some(signature)))
    }
}

/// Inverse of [`SecurityPolicyEngine`] for the receiving side.
pub struct EnvelopeVerifier {
    policy: SecurityPolicy,
    provider: Arc<dyn CryptoProvider>,
    key: Option<SecretKey>,
}

impl EnvelopeVerifier {
    /// Create a verifier expecting envelopes secured under `config`.
    pub fn new(
        config: SecurityConfig,
        provider: Arc<dyn CryptoProvider>,
        key: Option<SecretKey>,
    ) -> Self {
        Self {
            policy: config.policy(),
            provider,
            key,
        }
    }
}

impl EnvelopeOpenApi for EnvelopeVerifier {
    fn open(&self, envelope: &Envelope) -> Result<Message, EnvelopeError> {
        if self.policy.signs() {
            let attached = envelope.signature().ok_or(EnvelopeError::SignatureMissing)?;
            let input = signing_input(envelope.message(), envelope.header())?;
            let expected = self.provider.hash(&input)?;
            if attached != expected {
                warn!(
                    message_id = %envelope.header().message_id,
                    "Envelope signature mismatch"
                );
                return Err(EnvelopeError::SignatureMismatch);
            }
        }

        match envelope.message() {
            Message::Ciphertext(ciphertext) => {
                let key = self.key.as_ref().ok_or(EnvelopeError::MissingKey)?;
                let plaintext = self.provider.decrypt(ciphertext, key)?;
                Ok(Message::plaintext(plaintext)?)
            }
            Message::Plaintext(_) if self.policy.encrypts() => Err(EnvelopeError::NotEncrypted),
            Message::Plaintext(_) => Ok(envelope.message().clone()),
        }
    }
}
