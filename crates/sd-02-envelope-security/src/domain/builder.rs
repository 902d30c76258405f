//! # Envelope Builder
//!
//! Assembles headers, message bodies and envelopes. Pure data copying; no
//! cryptography happens here.

use serde::Serialize;
use shared_types::{Envelope, Header, Message, ResponseMessage, TrackerState};

use crate::domain::errors::EnvelopeError;

/// Builds outbound envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeBuilder;

impl EnvelopeBuilder {
    /// Copy every tracker field into a new header.
    pub fn build_header(tracker: &TrackerState) -> Header {
        Header::from(tracker)
    }

    /// Pair a header with a message. The envelope starts unsigned.
    pub fn build_envelope(header: Header, message: Message) -> Envelope {
        Envelope::new(header, message)
    }

    /// Response body with a freshly generated correlation id.
    pub fn build_response_message(
        transaction_id: impl Into<String>,
        search_responses: Vec<serde_json::Value>,
    ) -> ResponseMessage {
        ResponseMessage::new(transaction_id, search_responses)
    }

    /// Serialize `value` into a plaintext message.
    pub fn plaintext<T: Serialize>(value: &T) -> Result<Message, EnvelopeError> {
        let json = serde_json::to_string(value)?;
        Ok(Message::plaintext(json)?)
    }

    /// Wire form of `envelope`, compact or pretty-printed.
    ///
    /// A plaintext message is embedded exactly as held, in both forms.
    pub fn render(envelope: &Envelope, pretty: bool) -> Result<String, EnvelopeError> {
        let rendered = if pretty {
            serde_json::to_string_pretty(envelope)?
        } else {
            serde_json::to_string(envelope)?
        };
        Ok(rendered)
    }
}
