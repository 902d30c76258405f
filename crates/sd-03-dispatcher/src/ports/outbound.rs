//! # Outbound Ports (Driven Ports / SPI)
//!
//! The token cache and the security engine are consumed through their own
//! inbound ports (`TokenProvider`, `EnvelopeSecurityApi`). The only port
//! owned here is the HTTP transport.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::TransportError;

/// Response received from the remote party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

/// Sends one POST request and returns whatever status and body came back.
///
/// Must not interpret the status; classification happens in the dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `uri` with `headers`.
    async fn post(
        &self,
        uri: &str,
        headers: &[(String, String)],
        body: String,
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(
        &self,
        uri: &str,
        headers: &[(String, String)],
        body: String,
    ) -> Result<TransportResponse, TransportError> {
        (**self).post(uri, headers, body).await
    }
}
