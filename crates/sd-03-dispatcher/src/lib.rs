//! # Dispatcher Subsystem (SD-03)
//!
//! Delivers secured envelopes to remote parties over HTTP with bearer
//! authorization and translates their status codes into [`DispatchError`].
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Error taxonomy, status mapping, config
//! - **Ports Layer** (`ports/`): `Transport` outbound
//! - **Adapters Layer** (`adapters/`): `reqwest` transport
//! - **Service Layer** (`service.rs`): `Dispatcher`
//!
//! ## Flow
//!
//! ```text
//! Envelope ─► SecurityPolicyEngine ─► render ─► TokenProvider ─► Transport ─► map_status
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::ReqwestTransport;
pub use domain::config::{ConfigError, DispatchConfig};
pub use domain::errors::{codes, DispatchError, TransportError};
pub use domain::status::map_status;
pub use ports::outbound::{Transport, TransportResponse};
pub use service::Dispatcher;
