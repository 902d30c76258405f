//! # Symmetric Encryption
//!
//! AES-256-GCM with a synthetic nonce.
//!
//! The 96-bit nonce is derived as `HMAC-SHA256(key, NONCE_LABEL || plaintext)`
//! truncated to 12 bytes, so encryption is a deterministic function of
//! `(key, plaintext)`. Equal plaintexts produce equal ciphertexts under the
//! same key; distinct plaintexts never share a nonce.
//!
//! ## Ciphertext Encoding
//!
//! `hex(nonce || ciphertext || tag)`, lowercase.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce as GcmNonce,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes (GCM standard nonce).
pub const NONCE_LEN: usize = 12;

/// Domain separation label for nonce derivation.
const NONCE_LABEL: &[u8] = b"secure-dispatch.siv-nonce.v1";

/// Secret key (256-bit).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded key.
    ///
    /// # Errors
    ///
    /// `InvalidKeyEncoding` if the input is not hex, `InvalidKeyLength` if it
    /// does not decode to exactly 32 bytes.
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let mut decoded = hex::decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
        if decoded.len() != KEY_LEN {
            let actual = decoded.len();
            decoded.zeroize();
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual,
            });
        }
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self(bytes))
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

fn derive_nonce(key: &SecretKey, plaintext: &[u8]) -> Result<[u8; NONCE_LEN], CryptoError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    mac.update(NONCE_LABEL);
    mac.update(plaintext);
    let tag = mac.finalize().into_bytes();

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&tag[..NONCE_LEN]);
    Ok(nonce)
}

/// Encrypt plaintext with AES-256-GCM.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails.
pub fn encrypt(key: &SecretKey, plaintext: &[u8]) -> Result<String, CryptoError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let nonce = derive_nonce(key, plaintext)?;

    let ciphertext = cipher
        .encrypt(GcmNonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut framed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    framed.extend_from_slice(&nonce);
    framed.extend_from_slice(&ciphertext);
    Ok(hex::encode(framed))
}

/// Decrypt a hex-framed AES-256-GCM ciphertext.
///
/// # Errors
///
/// `InvalidCiphertext` for malformed framing, `DecryptionFailed` on
/// authentication failure (wrong key or tampering).
pub fn decrypt(key: &SecretKey, encoded: &str) -> Result<Vec<u8>, CryptoError> {
    let framed =
        hex::decode(encoded).map_err(|e| CryptoError::InvalidCiphertext(e.to_string()))?;
    if framed.len() <= NONCE_LEN {
        return Err(CryptoError::InvalidCiphertext(format!(
            "expected more than {} bytes, got {}",
            NONCE_LEN,
            framed.len()
        )));
    }
    let (nonce, ciphertext) = framed.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    cipher
        .decrypt(GcmNonce::from_slice(nonce), ciphertext)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}
