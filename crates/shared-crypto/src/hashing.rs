//! # SHA-256 Hashing
//!
//! Envelope signatures are lowercase hex SHA-256 digests.

use sha2::{Digest, Sha256};

/// Hash data with SHA-256 (one-shot) and hex-encode the digest.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
