//! # Inbound Ports (Driving Ports / API)

use shared_types::{Envelope, Message};

use crate::domain::errors::EnvelopeError;
use crate::domain::policy::SecurityPolicy;

/// Applies the configured security policy to outbound envelopes.
///
/// All operations are synchronous CPU-bound work.
pub trait EnvelopeSecurityApi: Send + Sync {
    /// The policy branch this instance applies.
    fn policy(&self) -> SecurityPolicy;

    /// Encrypt and/or sign `envelope` per the active policy.
    ///
    /// # Errors
    /// * `EnvelopeError::AlreadyEncrypted` - message is already ciphertext
    /// * `EnvelopeError::MissingKey` - encryption needs a key and none is set
    /// * `EnvelopeError::Crypto` - encryption or hashing failed
    /// * `EnvelopeError::Serialization` - header could not be canonicalised
    fn secure(&self, envelope: Envelope) -> Result<Envelope, EnvelopeError>;
}

/// Checks and unwraps inbound envelopes secured by a peer.
pub trait EnvelopeOpenApi: Send + Sync {
    /// Verify the signature (when the policy signs), decrypt (when the
    /// envelope is flagged encrypted) and return the plaintext message.
    fn open(&self, envelope: &Envelope) -> Result<Message, EnvelopeError>;
}
