//! # Domain Layer
//!
//! Token records, expiry rules and errors. No I/O.

pub mod config;
pub mod entities;
pub mod errors;
