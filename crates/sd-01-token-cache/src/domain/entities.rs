//! # Domain Entities
//!
//! Core data structures for the token cache.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::TokenError;

/// Credentials used to obtain a token for one client.
///
/// Passed per call; never persisted beyond the cache.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// Client identifier, also the cache key
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
    /// Identity provider token endpoint
    pub token_endpoint: String,
}

impl ClientCredentials {
    /// Create a new credential set.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: token_endpoint.into(),
        }
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_endpoint", &self.token_endpoint)
            .finish()
    }
}

/// Token as returned by the identity provider.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct IssuedToken {
    /// Bearer token
    pub access_token: String,
    /// Lifetime in seconds from issuance
    pub expires_in: u64,
    /// Token type, usually "Bearer"
    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Cached token and its validity window.
///
/// Owned by the cache; callers always receive clones.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Bearer token
    pub token: String,
    /// When the token was obtained
    pub issued_at: DateTime<Utc>,
    /// First instant at which the token is no longer handed out
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Build a record from an issued token.
    ///
    /// The record expires `refresh_skew` before the identity provider's
    /// expiry so that a token is never handed out on the edge of its
    /// lifetime. When the lifetime is shorter than the skew, the skew is
    /// ignored.
    ///
    /// # Errors
    ///
    /// `TokenError::InvalidResponse` if the token has no lifetime at all.
    pub fn from_issued(
        issued: IssuedToken,
        issued_at: DateTime<Utc>,
        refresh_skew: Duration,
    ) -> Result<Self, TokenError> {
        if issued.expires_in == 0 {
            return Err(TokenError::InvalidResponse(
                "issued token has no remaining lifetime".into(),
            ));
        }
        let lifetime = i64::try_from(issued.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                TokenError::InvalidResponse(format!("expires_in out of range: {}", issued.expires_in))
            })?;
        let effective = if lifetime > refresh_skew {
            lifetime - refresh_skew
        } else {
            lifetime
        };

        let expires_at = issued_at.checked_add_signed(effective).ok_or_else(|| {
            TokenError::InvalidResponse(format!("expires_in out of range: {}", issued.expires_in))
        })?;

        Ok(Self {
            token: issued.access_token,
            issued_at,
            expires_at,
        })
    }

    /// True if the record must not be handed out at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl std::fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRecord")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Expiry decision: true if `record` is absent or `now >= expires_at`.
pub fn is_expired(record: Option<&TokenRecord>, now: DateTime<Utc>) -> bool {
    record.map_or(true, |record| record.is_expired_at(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued(expires_in: u64) -> IssuedToken {
        IssuedToken {
            access_token: "tok".into(),
            expires_in,
            token_type: Some("Bearer".into()),
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_absent_record_is_expired() {
        assert!(is_expired(None, t0()));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let record = TokenRecord::from_issued(issued(60), t0(), Duration::zero()).unwrap();
        assert!(!is_expired(Some(&record), t0() + Duration::seconds(59)));
        assert!(is_expired(Some(&record), t0() + Duration::seconds(60)));
        assert!(is_expired(Some(&record), t0() + Duration::seconds(61)));
    }

    #[test]
    fn test_skew_shortens_lifetime() {
        let record = TokenRecord::from_issued(issued(300), t0(), Duration::seconds(30)).unwrap();
        assert_eq!(record.expires_at, t0() + Duration::seconds(270));
    }

    #[test]
    fn test_skew_ignored_for_short_lifetimes() {
        let record = TokenRecord::from_issued(issued(10), t0(), Duration::seconds(30)).unwrap();
        assert_eq!(record.expires_at, t0() + Duration::seconds(10));
    }

    #[test]
    fn test_zero_lifetime_rejected() {
        let result = TokenRecord::from_issued(issued(0), t0(), Duration::zero());
        assert!(matches!(result, Err(TokenError::InvalidResponse(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = ClientCredentials::new("client-a", "s3cr3t", "http://idp/token");
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("client-a"));

        let record = TokenRecord::from_issued(issued(60), t0(), Duration::zero()).unwrap();
        assert!(!format!("{:?}", record).contains("\"tok\""));
    }
}
