//! Remote status classification.
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 200 | delivered |
//! | 500 | `ServiceUnavailable` |
//! | 401 | `Unauthorized` with the parsed error payload |
//! | 400 | `BadRequest` |
//! | anything else | `ServiceUnavailable` |

use shared_types::{ErrorPayload, ErrorResponse};

use crate::domain::errors::{codes, DispatchError};

/// Classify a remote response.
pub fn map_status(status: u16, body: &str) -> Result<(), DispatchError> {
    match status {
        200 => Ok(()),
        500 => Err(DispatchError::ServiceUnavailable {
            status,
            body: body.to_string(),
        }),
        401 => Err(DispatchError::Unauthorized(parse_unauthorized(body))),
        400 => Err(DispatchError::BadRequest {
            body: body.to_string(),
        }),
        _ => Err(DispatchError::ServiceUnavailable {
            status,
            body: body.to_string(),
        }),
    }
}

fn parse_unauthorized(body: &str) -> ErrorPayload {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => response.error,
        Err(_) => ErrorPayload::new(codes::UNAUTHORIZED, body),
    }
}
