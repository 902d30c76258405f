//! # Crypto Provider
//!
//! The seam between envelope security and concrete algorithms. Both
//! operations are pure functions of their inputs.

use crate::{hashing, symmetric, CryptoError, SecretKey};

/// Symmetric encryption and hashing used to secure envelopes.
pub trait CryptoProvider: Send + Sync {
    /// Encrypt `plaintext` under `key`, returning a printable ciphertext.
    fn encrypt(&self, plaintext: &str, key: &SecretKey) -> Result<String, CryptoError>;

    /// Inverse of [`encrypt`](Self::encrypt).
    fn decrypt(&self, ciphertext: &str, key: &SecretKey) -> Result<String, CryptoError>;

    /// Digest of `input`, printable.
    fn hash(&self, input: &str) -> Result<String, CryptoError>;
}

/// AES-256-GCM (synthetic nonce) + SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmSha256Provider;

impl CryptoProvider for AesGcmSha256Provider {
    fn encrypt(&self, plaintext: &str, key: &SecretKey) -> Result<String, CryptoError> {
        symmetric::encrypt(key, plaintext.as_bytes())
    }

    fn decrypt(&self, ciphertext: &str, key: &SecretKey) -> Result<String, CryptoError> {
        let bytes = symmetric::decrypt(key, ciphertext)?;
        String::from_utf8(bytes).map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
    }

    fn hash(&self, input: &str) -> Result<String, CryptoError> {
        Ok(hashing::sha256_hex(input.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_round_trip() {
        let provider = AesGcmSha256Provider;
        let key = SecretKey::from_bytes([42; 32]);

        let ciphertext = provider.encrypt(r#"{"a":1}"#, &key).unwrap();
        assert_ne!(ciphertext, r#"{"a":1}"#);
        assert_eq!(provider.decrypt(&ciphertext, &key).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_provider_hash_is_sha256_hex() {
        let provider = AesGcmSha256Provider;
        let digest = provider.hash("abc").unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hashing::sha256_hex(b"abc"));
    }
}
