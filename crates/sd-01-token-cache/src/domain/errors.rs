//! # Token Errors
//!
//! Error types for token acquisition and caching. Every variant carries a
//! stable machine-readable code via [`TokenError::code`].
//!
//! Errors are `Clone` because a single refresh outcome is delivered to every
//! caller waiting on it.

use thiserror::Error;

/// Errors that can occur while obtaining a token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The identity provider could not be reached
    #[error("Identity provider unreachable: {0}")]
    Unreachable(String),

    /// The identity provider refused the credentials
    #[error("Identity provider rejected credentials (status {status}): {body}")]
    Rejected {
        /// HTTP status returned by the identity provider
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// The identity provider answered with something that is not a usable token
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// The backing store failed
    #[error("Token store error: {0}")]
    Store(String),
}

impl TokenError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Unreachable(_) => "err.token.unreachable",
            TokenError::Rejected { .. } => "err.token.rejected",
            TokenError::InvalidResponse(_) => "err.token.invalid_response",
            TokenError::Store(_) => "err.token.store",
        }
    }
}

/// Errors from a key-value backing store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The key pattern is not supported
    #[error("Invalid key pattern: {0}")]
    InvalidPattern(String),
}

impl From<StoreError> for TokenError {
    fn from(err: StoreError) -> Self {
        TokenError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(TokenError::Unreachable("x".into()).code(), "err.token.unreachable");
        assert_eq!(
            TokenError::Rejected {
                status: 401,
                body: String::new()
            }
            .code(),
            "err.token.rejected"
        );
        assert_eq!(
            TokenError::from(StoreError::Unavailable("down".into())).code(),
            "err.token.store"
        );
    }
}
