//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the token cache needs: an identity provider, a key-value
//! backing store and a clock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{ClientCredentials, IssuedToken};
use crate::domain::errors::{StoreError, TokenError};

/// Identity provider that issues access tokens for client credentials.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Fetch a new token from `credentials.token_endpoint`.
    ///
    /// # Errors
    /// * `TokenError::Unreachable` - endpoint could not be reached
    /// * `TokenError::Rejected` - bad credentials or other non-success status
    /// * `TokenError::InvalidResponse` - body is not a token response
    async fn fetch_token(&self, credentials: &ClientCredentials) -> Result<IssuedToken, TokenError>;
}

/// Key-value backing store for serialized token records.
///
/// May be in-process or networked; a networked store adds its own latency to
/// every lookup.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Get the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Keys matching `pattern` (`*` matches any run of characters).
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
impl<T: TokenIssuer + ?Sized> TokenIssuer for Arc<T> {
    async fn fetch_token(&self, credentials: &ClientCredentials) -> Result<IssuedToken, TokenError> {
        (**self).fetch_token(credentials).await
    }
}

#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        (**self).keys(pattern).await
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
