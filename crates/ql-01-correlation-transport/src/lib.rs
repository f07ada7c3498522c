//! QL-01 Correlation Transport - request/response calls over the host's
//! one-way message channel.
//!
//! The desktop host exposes a single `postMessage`-like send primitive and
//! delivers replies through a callback, with no pairing between the two.
//! This crate adds the pairing.
//!
//! # Architecture
//!
//! ```text
//! caller ──invoke(channel, data)──▶ ┌───────────────────────────┐
//!                                   │   CorrelationTransport    │
//!                                   │  ┌─────────────────────┐  │
//!                                   │  │  PendingCallTable   │  │
//!                                   │  │ (CorrelationId →    │  │
//!                                   │  │   oneshot sender)   │  │
//!                                   │  └─────────────────────┘  │
//!                                   └──────┬─────────────▲──────┘
//!                     post_message(request)│             │handle_reply(callbackId, reply)
//!                                          ▼             │
//!                                   ┌───────────────────────────┐
//!                                   │  Host (HostChannel port)  │
//!                                   └───────────────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Exactly one raw send per call.
//! - At most one settlement per call; duplicate and late replies are no-ops.
//! - Replies may arrive in any order.
//! - Unknown or already settled IDs are logged and dropped, never raised.
//! - No timeout unless configured (`BridgeConfig::default_timeout`).

pub mod adapters;
pub mod config;
pub mod error;
pub mod pending;
pub mod ports;
pub mod transport;

pub use config::{BridgeConfig, ConfigError};
pub use error::{BridgeError, BridgeResult, UNKNOWN_HOST_ERROR};
pub use pending::{PendingCallTable, PendingStats, SettleOutcome, Settlement};
pub use ports::{HostChannel, HostError, HostReceiver};
pub use transport::{sweep_task, CorrelationTransport};

// Re-export wire types so callers need only this crate.
pub use shared_types::{CorrelationId, HostMessage, Reply, RequestEnvelope};
