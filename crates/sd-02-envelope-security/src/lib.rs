//! # Envelope Security Subsystem (SD-02)
//!
//! Builds outbound envelopes and secures them under one of four
//! sign/encrypt policies.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Builder, policy matrix, signature input,
//!   config, errors
//! - **Ports Layer** (`ports/`): `EnvelopeSecurityApi` / `EnvelopeOpenApi`
//!   inbound; `CryptoProvider` outbound
//! - **Service Layer** (`service.rs`): `SecurityPolicyEngine`, `EnvelopeVerifier`
//!
//! ## Security Notes
//!
//! - Encrypt-then-sign: the signature always covers the transmitted bytes
//! - The header's encrypted flag is derived from the message variant and is
//!   part of the signed header
//! - Encryption is deterministic; resending a message reproduces its envelope

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::builder::EnvelopeBuilder;
pub use domain::config::{CryptoConfig, SecurityConfig};
pub use domain::errors::EnvelopeError;
pub use domain::policy::SecurityPolicy;
pub use domain::signing::{canonical_header, signing_input};
pub use ports::inbound::{EnvelopeOpenApi, EnvelopeSecurityApi};
pub use ports::outbound::{CryptoProvider, SecretKey};
pub use service::{EnvelopeVerifier, SecurityPolicyEngine};
