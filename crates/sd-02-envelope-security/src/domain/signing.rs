//! Signature input construction.
//!
//! `input = message_text || JCS(header)`
//!
//! The header is canonicalised with RFC 8785 (JSON Canonicalization Scheme):
//! keys sorted, no insignificant whitespace, so a verifier in any language
//! can reproduce the exact bytes. The message text is used as held, which for
//! ciphertext is the hex string and for plaintext is the exact JSON text.

use shared_types::{Header, Message};

use crate::domain::errors::EnvelopeError;

/// Canonical serialization of `header`.
pub fn canonical_header(header: &Header) -> Result<String, EnvelopeError> {
    serde_jcs::to_string(header).map_err(|e| EnvelopeError::Serialization(e.to_string()))
}

/// The string a signature is computed over.
pub fn signing_input(message: &Message, header: &Header) -> Result<String, EnvelopeError> {
    let canonical = canonical_header(header)?;
    let text = message.as_str();
    let mut input = String::with_capacity(text.len() + canonical.len());
    input.push_str(text);
    input.push_str(&canonical);
    Ok(input)
}
