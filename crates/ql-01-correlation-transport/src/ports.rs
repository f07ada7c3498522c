//! Outbound ports: the host primitives the transport depends on.

use async_trait::async_trait;
use shared_types::{HostMessage, RequestEnvelope};

/// One-way send primitive supplied by the host.
///
/// Mirrors a `postMessage` entry point: no delivery acknowledgement and no
/// backpressure. Implementations must not block.
pub trait HostChannel: Send + Sync {
    /// Whether the bridge exists in the current host at all.
    fn is_available(&self) -> bool;

    /// Hand a request to the host. An `Ok` only means the message left;
    /// the reply arrives later through reply intake.
    fn post_message(&self, request: &RequestEnvelope) -> Result<(), HostError>;
}

/// Single inbound stream carrying both replies and event pushes.
#[async_trait]
pub trait HostReceiver: Send + Sync {
    /// Receive next message (waits until one is available)
    async fn receive(&self) -> Result<HostMessage, HostError>;
}

/// Host boundary errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("host channel closed")]
    ChannelClosed,
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}
