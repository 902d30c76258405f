//! # Outbound Ports (Driven Ports / SPI)
//!
//! Symmetric encryption and hashing are consumed through
//! [`CryptoProvider`], defined next to its implementations in
//! `shared-crypto`.

pub use shared_crypto::{CryptoProvider, SecretKey};
