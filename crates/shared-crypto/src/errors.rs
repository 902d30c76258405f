//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// All variants indicate misconfiguration or corrupted input, never a
/// transient condition; callers must not retry them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Key material is not valid hex
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Ciphertext is malformed (bad hex, too short)
    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// Hashing failed
    #[error("Hashing failed: {0}")]
    HashingFailed(String),
}
