//! # Response Message Body
//!
//! Plaintext body of an `on-search` style response before any encryption.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of generated correlation identifiers.
pub const CORRELATION_ID_PREFIX: &str = "C";

/// Body of a search response.
///
/// `search_response` entries are opaque to this layer; the registry that
/// produced them owns their schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Transaction this response belongs to.
    pub transaction_id: String,
    /// Identifier correlating this response with the sender's bookkeeping.
    pub correlation_id: String,
    /// One entry per search request in the transaction.
    pub search_response: Vec<serde_json::Value>,
}

impl ResponseMessage {
    /// Create a response with a freshly generated correlation id.
    pub fn new(transaction_id: impl Into<String>, search_response: Vec<serde_json::Value>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            correlation_id: generate_unique_id(CORRELATION_ID_PREFIX),
            search_response,
        }
    }
}

/// Generate a unique identifier with the given prefix.
pub fn generate_unique_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_ids_are_prefixed_and_unique() {
        let a = ResponseMessage::new("T1", vec![]);
        let b = ResponseMessage::new("T1", vec![]);
        assert!(a.correlation_id.starts_with(CORRELATION_ID_PREFIX));
        assert_ne!(a.correlation_id, b.correlation_id);
        assert_eq!(a.transaction_id, "T1");
    }
}
