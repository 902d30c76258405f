//! # Dispatcher Service
//!
//! Secures an envelope, obtains a bearer token, delivers the envelope and
//! classifies the remote party's answer.
//!
//! Each `send` makes exactly one transport call. Nothing is deduplicated:
//! sending the same envelope twice delivers it twice.

use std::sync::Arc;

use sd_01_token_cache::{ClientCredentials, TokenProvider};
use sd_02_envelope_security::{EnvelopeBuilder, EnvelopeSecurityApi};
use shared_types::Envelope;
use tracing::{debug, info, warn};

use crate::domain::errors::DispatchError;
use crate::domain::status::map_status;
use crate::ports::outbound::Transport;

/// Outbound envelope dispatcher.
pub struct Dispatcher {
    security: Arc<dyn EnvelopeSecurityApi>,
    tokens: Arc<dyn TokenProvider>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Create a dispatcher.
    ///
    /// # Arguments
    /// * `security` - Policy engine applied to every envelope
    /// * `tokens` - Bearer token source
    /// * `transport` - HTTP transport
    pub fn new(
        security: Arc<dyn EnvelopeSecurityApi>,
        tokens: Arc<dyn TokenProvider>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            security,
            tokens,
            transport,
        }
    }

    /// Secure `envelope` and deliver it to `destination_uri`.
    ///
    /// Returns the remote status on success (always 200).
    ///
    /// # Errors
    /// * `DispatchError::Envelope` - securing or serializing failed; nothing sent
    /// * `DispatchError::Token` - no token could be obtained; nothing sent
    /// * `DispatchError::TransportUnreachable` - no status received
    /// * `ServiceUnavailable` / `Unauthorized` / `BadRequest` - remote status
    pub async fn send(
        &self,
        envelope: Envelope,
        destination_uri: &str,
        credentials: &ClientCredentials,
    ) -> Result<u16, DispatchError> {
        let message_id = envelope.header().message_id.clone();

        let secured = self.security.secure(envelope)?;
        let body = EnvelopeBuilder::render(&secured, false)?;
        let token = self.tokens.get_or_refresh(credentials).await?;

        let headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", token)),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];

        debug!(
            message_id = %message_id,
            destination = %destination_uri,
            encrypted = secured.header().is_msg_encrypted,
            signed = secured.signature().is_some(),
            "Dispatching envelope"
        );

        let response = self
            .transport
            .post(destination_uri, &headers, body)
            .await
            .map_err(|e| {
                warn!(
                    message_id = %message_id,
                    destination = %destination_uri,
                    error = %e,
                    "Transport failure"
                );
                DispatchError::from(e)
            })?;

        if let Err(err) = map_status(response.status, &response.body) {
            warn!(
                message_id = %message_id,
                status = response.status,
                code = err.code(),
                "Remote rejected envelope"
            );
            return Err(err);
        }

        info!(message_id = %message_id, status = response.status, "Envelope delivered");
        Ok(response.status)
    }
}
