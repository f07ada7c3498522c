//! # Quill Telemetry
//!
//! Logging setup shared by every binary that embeds the bridge.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quill_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QUILL_SERVICE_NAME` | `quill` | Service name stamped on startup log |
//! | `QUILL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `QUILL_JSON_LOGS` | `false` | JSON output instead of pretty output |
//! | `QUILL_CONSOLE_OUTPUT` | `true` | Emit logs at all |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}
