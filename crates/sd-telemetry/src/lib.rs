//! # Secure Dispatch Telemetry
//!
//! Structured logging setup shared by the dispatch binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sd_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SD_SERVICE_NAME` | `secure-dispatch` | Service name in logs |
//! | `SD_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SD_JSON_LOGS` | `false` | JSON log output |
//! | `SD_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    /// Configuration could not be interpreted
    #[error("Invalid configuration: {0}")]
    Config(String),
}
