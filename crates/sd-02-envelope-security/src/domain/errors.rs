//! # Envelope Errors

use shared_crypto::CryptoError;
use shared_types::TypesError;
use thiserror::Error;

/// Errors raised while building, securing or opening an envelope.
///
/// Crypto failures mean misconfiguration or tampering and are never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Encryption, decryption, hashing or key decoding failed
    #[error("Crypto failure: {0}")]
    Crypto(#[from] CryptoError),

    /// Payload or header could not be serialized
    #[error("Serialization failure: {0}")]
    Serialization(String),

    /// The message is not a usable plaintext, or the header flag disagrees
    #[error("Invalid envelope: {0}")]
    Invalid(#[from] TypesError),

    /// `secure()` was given an envelope whose message is already ciphertext
    #[error("Envelope message is already encrypted")]
    AlreadyEncrypted,

    /// Encryption is required but no secret key is configured
    #[error("Encryption enabled but no secret key configured")]
    MissingKey,

    /// The policy requires a signature and the envelope has none
    #[error("Envelope signature missing")]
    SignatureMissing,

    /// The recomputed signature differs from the attached one
    #[error("Envelope signature mismatch")]
    SignatureMismatch,

    /// The policy requires an encrypted message and the envelope is plaintext
    #[error("Envelope message must be encrypted under the active policy")]
    NotEncrypted,
}

impl EnvelopeError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EnvelopeError::Crypto(_) => "err.crypto.failed",
            EnvelopeError::Serialization(_) => "err.envelope.serialization",
            EnvelopeError::Invalid(_) => "err.envelope.invalid",
            EnvelopeError::AlreadyEncrypted => "err.envelope.already_encrypted",
            EnvelopeError::MissingKey => "err.crypto.missing_key",
            EnvelopeError::SignatureMissing => "err.signature.missing",
            EnvelopeError::SignatureMismatch => "err.signature.mismatch",
            EnvelopeError::NotEncrypted => "err.envelope.not_encrypted",
        }
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        EnvelopeError::Serialization(err.to_string())
    }
}
