//! Inbound message pump.
//!
//! Drains a [`HostReceiver`] and routes every message through
//! [`CommandFacade::handle_message`]. Hosts that call back into the facade
//! directly do not need a listener.

use crate::facade::CommandFacade;
use ql_01_correlation_transport::{HostError, HostReceiver};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Background task feeding host replies and events into the facade.
pub struct BridgeListener {
    facade: Arc<CommandFacade>,
    receiver: Arc<dyn HostReceiver>,
}

impl BridgeListener {
    pub fn new(facade: Arc<CommandFacade>, receiver: Arc<dyn HostReceiver>) -> Self {
        Self { facade, receiver }
    }

    /// Run the listener loop until the inbound stream closes.
    pub async fn run(self) {
        info!("Bridge listener started");
        loop {
            match self.receiver.receive().await {
                Ok(message) => {
                    self.facade.handle_message(message);
                }
                Err(HostError::ChannelClosed) => {
                    warn!("Host inbound channel closed, stopping listener");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Error receiving host message");
                }
            }
        }
    }

    /// Spawn the loop onto the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
