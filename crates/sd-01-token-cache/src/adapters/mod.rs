//! # Adapters Module
//!
//! Infrastructure adapters implementing the outbound ports.

pub mod clock;
pub mod http_issuer;
pub mod memory_store;

pub use clock::{ManualClock, SystemClock};
pub use http_issuer::HttpTokenIssuer;
pub use memory_store::InMemoryTokenStore;
