//! # Shared Types Crate
//!
//! Wire-level types shared by the correlation transport, the command facade
//! and host-side adapters.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: request, reply and event shapes are defined
//!   here and nowhere else.
//! - **Opaque Correlation**: the host never interprets a `callbackId`; it
//!   only echoes it back.

pub mod correlation;
pub mod envelope;

pub use correlation::CorrelationId;
pub use envelope::{HostMessage, Reply, RequestEnvelope, STATUS_ERROR, STATUS_SUCCESS};
