//! QL Bridge Simulator
//!
//! An in-process desktop host wired to a full bridge stack, for demos and
//! end-to-end tests.

pub mod host;

pub use host::SimulatedHost;

use ql_01_correlation_transport::adapters::{create_host_channel, create_inbound_channel};
use ql_01_correlation_transport::{sweep_task, BridgeConfig, CorrelationTransport};
use ql_02_command_facade::{BridgeListener, CommandFacade};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A running bridge talking to a simulated host.
pub struct SimulatedBridge {
    pub facade: Arc<CommandFacade>,
    pub host: Arc<SimulatedHost>,
    tasks: Vec<JoinHandle<()>>,
}

impl SimulatedBridge {
    /// Wire transport, facade, listener and host together.
    pub fn start(config: BridgeConfig, latency: Duration) -> Self {
        let (channel, requests) = create_host_channel();
        let (inbound, receiver) = create_inbound_channel();

        let host = Arc::new(SimulatedHost::new(inbound, latency));
        let sweep_interval = config.sweep_interval;
        let sweeps = config.default_timeout.is_some();

        let transport = Arc::new(CorrelationTransport::new(Arc::new(channel), config));
        let facade = Arc::new(CommandFacade::new(Arc::clone(&transport)));

        let mut tasks = vec![
            host.spawn(requests),
            BridgeListener::new(Arc::clone(&facade), Arc::new(receiver)).spawn(),
        ];
        if sweeps {
            tasks.push(tokio::spawn(sweep_task(transport, sweep_interval)));
        }

        Self { facade, host, tasks }
    }

    /// Close the transport and stop every background task.
    ///
    /// Returns the number of calls that were still pending.
    pub fn shutdown(self) -> usize {
        let rejected = self.facade.transport().close();
        for task in self.tasks {
            task.abort();
        }
        rejected
    }
}
