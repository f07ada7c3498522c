//! In-memory host channel built on tokio mpsc.
//!
//! Stands in for the webview host in tests and demos: requests posted by the
//! transport come out of an unbounded receiver, and whatever plays the host
//! pushes `HostMessage`s back through the inbound pair.

use crate::ports::{HostChannel, HostError, HostReceiver};
use async_trait::async_trait;
use shared_types::{HostMessage, RequestEnvelope};
use tokio::sync::{mpsc, Mutex};

/// Outbound half: what the transport posts into.
pub struct ChannelHost(pub mpsc::UnboundedSender<RequestEnvelope>);

impl HostChannel for ChannelHost {
    fn is_available(&self) -> bool {
        !self.0.is_closed()
    }

    fn post_message(&self, request: &RequestEnvelope) -> Result<(), HostError> {
        self.0
            .send(request.clone())
            .map_err(|_| HostError::ChannelClosed)
    }
}

/// Inbound half: replies and events coming back from the host.
pub struct ChannelReceiver(pub Mutex<mpsc::UnboundedReceiver<HostMessage>>);

#[async_trait]
impl HostReceiver for ChannelReceiver {
    async fn receive(&self) -> Result<HostMessage, HostError> {
        let mut guard = self.0.lock().await;
        guard.recv().await.ok_or(HostError::ChannelClosed)
    }
}

/// Create the outbound pair: the host end reads posted requests.
pub fn create_host_channel() -> (ChannelHost, mpsc::UnboundedReceiver<RequestEnvelope>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelHost(tx), rx)
}

/// Create the inbound pair: the host end pushes replies and events.
pub fn create_inbound_channel() -> (mpsc::UnboundedSender<HostMessage>, ChannelReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, ChannelReceiver(Mutex::new(rx)))
}
