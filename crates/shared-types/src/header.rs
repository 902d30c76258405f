//! # Envelope Header
//!
//! The header travels in clear text next to the (possibly encrypted) message.
//! Field declaration order is the wire order; signing never depends on it
//! because the signer canonicalises the header separately.

use serde::{Deserialize, Serialize};

/// Header of an outbound envelope.
///
/// Every field is copied verbatim from the message tracker. The only field
/// that changes after construction is `is_msg_encrypted`, and only
/// [`Envelope`](crate::envelope::Envelope) construction writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Protocol version (e.g. "1.0.0").
    pub version: String,
    /// Unique message identifier.
    pub message_id: String,
    /// Message timestamp as recorded by the tracker.
    pub message_ts: String,
    /// Action this message answers (e.g. "search", "on-search").
    pub action: String,
    /// Sender party identifier.
    pub sender_id: String,
    /// Receiver party identifier.
    pub receiver_id: String,
    /// True iff the message body is ciphertext.
    pub is_msg_encrypted: bool,
    /// Processing status (e.g. "succ", "rjct", "pdng").
    pub status: String,
    /// Machine-readable reason for the status, if any.
    pub status_reason_code: Option<String>,
    /// Human-readable reason for the status, if any.
    pub status_reason_message: Option<String>,
    /// Total number of records in the transaction.
    pub total_count: Option<u32>,
    /// Number of records completed so far.
    pub completed_count: Option<u32>,
}

impl Header {
    /// Returns a copy of this header with the encrypted flag set to `encrypted`.
    pub(crate) fn with_encrypted(mut self, encrypted: bool) -> Self {
        self.is_msg_encrypted = encrypted;
        self
    }
}

/// Message-tracking record a response header is built from.
///
/// The tracker is persisted elsewhere; this is only the in-memory view the
/// header builder needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    pub version: String,
    pub message_id: String,
    pub message_ts: String,
    pub action: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub is_msg_encrypted: bool,
    pub status: String,
    pub status_reason_code: Option<String>,
    pub status_reason_message: Option<String>,
    pub total_count: Option<u32>,
    pub completed_count: Option<u32>,
}

impl From<&TrackerState> for Header {
    fn from(tracker: &TrackerState) -> Self {
        Self {
            version: tracker.version.clone(),
            message_id: tracker.message_id.clone(),
            message_ts: tracker.message_ts.clone(),
            action: tracker.action.clone(),
            sender_id: tracker.sender_id.clone(),
            receiver_id: tracker.receiver_id.clone(),
            is_msg_encrypted: tracker.is_msg_encrypted,
            status: tracker.status.clone(),
            status_reason_code: tracker.status_reason_code.clone(),
            status_reason_message: tracker.status_reason_message.clone(),
            total_count: tracker.total_count,
            completed_count: tracker.completed_count,
        }
    }
}
