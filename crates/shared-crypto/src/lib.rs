//! # Shared Crypto - Envelope Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | AES-256-GCM, synthetic nonce | Message encryption |
//! | `hashing` | SHA-256 | Envelope signatures |
//! | `provider` | `CryptoProvider` trait | Seam used by the policy engine |
//!
//! ## Security Properties
//!
//! - **Deterministic encryption**: the nonce is an HMAC of the plaintext, so
//!   retransmitting the same message yields the same ciphertext.
//! - **Authenticated**: tampering or a wrong key fails decryption.
//! - **Key hygiene**: `SecretKey` is zeroized on drop and redacted in `Debug`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod provider;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::sha256_hex;
pub use provider::{AesGcmSha256Provider, CryptoProvider};
pub use symmetric::{decrypt, encrypt, SecretKey, KEY_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
