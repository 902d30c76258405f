//! # Shared Types Crate
//!
//! Wire model for the secure dispatch pipeline, shared by every subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: header, message and envelope are defined once.
//! - **Encryption State in the Type**: [`Message`] is a tagged union; the
//!   header's `is_msg_encrypted` flag is derived from it, never set by hand.
//! - **Byte-Exact Bodies**: plaintext JSON is kept as text so that what is
//!   signed is exactly what is sent.

pub mod envelope;
pub mod errors;
pub mod header;
pub mod message;
pub mod response;

pub use envelope::Envelope;
pub use errors::*;
pub use header::{Header, TrackerState};
pub use message::{Message, PlainJson};
pub use response::{generate_unique_id, ResponseMessage};
