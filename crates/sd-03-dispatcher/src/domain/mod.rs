//! # Domain Layer
//!
//! Error taxonomy, status mapping and configuration.

pub mod config;
pub mod errors;
pub mod status;
