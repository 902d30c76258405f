//! # Inbound Ports (Driving Ports / API)

use async_trait::async_trait;

use crate::domain::entities::ClientCredentials;
use crate::domain::errors::TokenError;

/// Hands out valid bearer tokens.
///
/// Implementations must never return an expired token and must not issue
/// more than one concurrent identity provider call per client id.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a valid token for `credentials.client_id`, refreshing it if the
    /// cached one is absent or expired.
    async fn get_or_refresh(&self, credentials: &ClientCredentials) -> Result<String, TokenError>;
}
