//! # Outbound Envelope
//!
//! The wrapper transmitted to a remote party.
//!
//! ## Invariants
//!
//! - `header.is_msg_encrypted == message.is_ciphertext()`, always. The flag is
//!   derived from the message variant on construction and checked again on
//!   deserialization.
//! - `signature` is present iff the sender's signing policy was active.
//!
//! ## Wire Format
//!
//! ```json
//! { "signature": "…", "header": { … }, "message": { … } | "…" }
//! ```
//!
//! `signature` is omitted when unset.

use serde::{Deserialize, Serialize};

use crate::errors::TypesError;
use crate::header::Header;
use crate::message::Message;

/// A header + message pair with an optional signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEnvelope")]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
    header: Header,
    message: Message,
}

impl Envelope {
    /// Create an unsigned envelope.
    pub fn new(header: Header, message: Message) -> Self {
        Self::from_parts(header, message, None)
    }

    /// Assemble an envelope from its parts, syncing the header's encrypted
    /// flag with the message variant.
    pub fn from_parts(header: Header, message: Message, signature: Option<String>) -> Self {
        let header = header.with_encrypted(message.is_ciphertext());
        Self {
            signature,
            header,
            message,
        }
    }

    /// Header of this envelope.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Message body of this envelope.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Signature, if the envelope was signed.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Split into `(header, message, signature)`.
    pub fn into_parts(self) -> (Header, Message, Option<String>) {
        (self.header, self.message, self.signature)
    }
}

/// Unchecked wire shape used during deserialization.
#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    signature: Option<String>,
    header: Header,
    message: Message,
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = TypesError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        let actual = wire.message.is_ciphertext();
        if wire.header.is_msg_encrypted != actual {
            return Err(TypesError::EncryptionFlagMismatch {
                flag: wire.header.is_msg_encrypted,
                actual: if actual { "ciphertext" } else { "plaintext" },
            });
        }
        Ok(Self {
            signature: wire.signature,
            header: wire.header,
            message: wire.message,
        })
    }
}
