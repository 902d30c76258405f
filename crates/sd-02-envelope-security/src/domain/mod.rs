//! # Domain Layer
//!
//! Envelope assembly, the policy matrix and the signature input. No I/O.

pub mod builder;
pub mod config;
pub mod errors;
pub mod policy;
pub mod signing;
