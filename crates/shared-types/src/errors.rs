//! # Error Types
//!
//! Model-level errors and the error payloads exchanged with remote parties.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing or decoding wire types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypesError {
    /// The plaintext message is not a JSON value that can be embedded.
    #[error("Invalid plaintext message: {0}")]
    InvalidPlaintext(String),

    /// The encrypted flag in the header disagrees with the message variant.
    #[error("Header is_msg_encrypted={flag} but message is {actual}")]
    EncryptionFlagMismatch {
        /// Flag as found in the header
        flag: bool,
        /// "ciphertext" or "plaintext"
        actual: &'static str,
    },
}

/// Machine-readable error carried in a remote party's error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Stable error code (e.g. "err.request.bad")
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorPayload {
    /// Create a new payload.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error body returned by a remote party (e.g. on 401).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The wrapped error.
    #[serde(rename = "g2pcError", alias = "g2PcError", alias = "error")]
    pub error: ErrorPayload,
}
