//! # Secure Dispatch Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (secure(), crypto primitives)
//! └── src/
//!     └── integration/  # Cross-subsystem flows against local HTTP peers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sd-tests
//! cargo bench -p sd-tests
//! ```

pub mod integration;
