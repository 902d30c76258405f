//! Dispatch error taxonomy.
//!
//! Every error carries a stable machine-readable code (see [`codes`]) and a
//! human-readable `Display`.

use sd_01_token_cache::TokenError;
use sd_02_envelope_security::EnvelopeError;
use shared_types::ErrorPayload;
use thiserror::Error;

/// Stable error codes produced by the dispatcher itself.
pub mod codes {
    /// Remote returned 500 or another unexpected non-200 status
    pub const SERVICE_UNAVAILABLE: &str = "err.service.unavailable";
    /// Remote returned 400
    pub const BAD_REQUEST: &str = "err.request.bad";
    /// Remote returned 401 with a body that is not an error payload
    pub const UNAUTHORIZED: &str = "err.unauthorized";
    /// No status was received at all
    pub const TRANSPORT_UNREACHABLE: &str = "err.transport.unreachable";
}

/// Transport-level failure: no HTTP status was obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other failure before a status was received
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors returned by [`Dispatcher::send`](crate::Dispatcher::send).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Remote answered 500 or an unexpected non-200 status
    #[error("Remote service unavailable (status {status}): {body}")]
    ServiceUnavailable {
        /// Status returned by the remote party
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Remote answered 401
    #[error("Unauthorized: {} ({})", .0.message, .0.code)]
    Unauthorized(ErrorPayload),

    /// Remote answered 400
    #[error("Bad request: {body}")]
    BadRequest {
        /// Response body, verbatim
        body: String,
    },

    /// No status code was received
    #[error("Transport unreachable: {0}")]
    TransportUnreachable(#[from] TransportError),

    /// A bearer token could not be obtained
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The envelope could not be secured or serialized
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl DispatchError {
    /// Stable machine-readable error code.
    ///
    /// For `Unauthorized` this is the code the remote party supplied.
    pub fn code(&self) -> &str {
        match self {
            DispatchError::ServiceUnavailable { .. } => codes::SERVICE_UNAVAILABLE,
            DispatchError::Unauthorized(payload) => &payload.code,
            DispatchError::BadRequest { .. } => codes::BAD_REQUEST,
            DispatchError::TransportUnreachable(_) => codes::TRANSPORT_UNREACHABLE,
            DispatchError::Token(err) => err.code(),
            DispatchError::Envelope(err) => err.code(),
        }
    }

    /// Error payload for reporting this error to a caller.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload::new(self.code(), self.to_string())
    }
}
