//! # Ports Layer
//!
//! - **Inbound (Driving)**: `EnvelopeSecurityApi`, used by the dispatcher
//! - **Outbound (Driven)**: `CryptoProvider`

pub mod inbound;
pub mod outbound;
