//! Bridge error types.
//!
//! Every error is local to the call that produced it. Nothing here marks the
//! transport as globally failed, except `Closed` which follows an explicit
//! shutdown.

use std::time::Duration;

/// Message used when the host rejects a call without saying why.
pub const UNKNOWN_HOST_ERROR: &str = "unknown host error";

/// Errors surfaced to the caller of a bridge call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The host answered with `status: "error"`.
    #[error("{0}")]
    Remote(String),

    /// The host answered with something that is neither a success nor an
    /// error envelope.
    #[error("invalid response from host")]
    InvalidResponse,

    /// The host channel does not exist in the current environment.
    #[error("bridge unavailable in this host")]
    Unavailable,

    /// Empty operation name.
    #[error("channel name must not be empty")]
    InvalidChannel,

    /// The argument bag was not a JSON object.
    #[error("arguments for '{channel}' must be a JSON object")]
    InvalidArguments { channel: String },

    /// The raw send primitive refused the request.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// No reply arrived within the configured timeout.
    #[error("call '{channel}' timed out after {}ms", .after.as_millis())]
    Timeout { channel: String, after: Duration },

    /// The transport was shut down while the call was pending.
    #[error("bridge closed")]
    Closed,

    /// A successful result did not match the type the caller asked for.
    #[error("failed to decode result: {0}")]
    Decode(String),
}

impl BridgeError {
    /// Whether the host itself produced this error (as opposed to the
    /// transport or the caller).
    pub fn is_remote(&self) -> bool {
        matches!(self, BridgeError::Remote(_) | BridgeError::InvalidResponse)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::Decode(e.to_string())
    }
}

/// Result type for bridge calls
pub type BridgeResult<T> = Result<T, BridgeError>;
