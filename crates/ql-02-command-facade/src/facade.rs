//! Command Facade: named remote operations and the event registry behind
//! one handle.

use crate::events::EventRegistry;
use ql_01_correlation_transport::{
    BridgeError, BridgeResult, CorrelationTransport, HostMessage, SettleOutcome,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Thin call-site layer over the correlation transport.
///
/// Adds no correlation logic of its own and assumes nothing about the order
/// in which distinct calls settle.
pub struct CommandFacade {
    transport: Arc<CorrelationTransport>,
    events: Arc<EventRegistry>,
}

impl CommandFacade {
    pub fn new(transport: Arc<CorrelationTransport>) -> Self {
        Self::with_registry(transport, Arc::new(EventRegistry::new()))
    }

    pub fn with_registry(transport: Arc<CorrelationTransport>, events: Arc<EventRegistry>) -> Self {
        Self { transport, events }
    }

    /// Whether the bridge exists in this host. Check before calling.
    pub fn is_available(&self) -> bool {
        self.transport.is_available()
    }

    /// Untyped call: JSON arguments in, JSON result out.
    pub async fn invoke(&self, channel: &str, data: Value) -> BridgeResult<Value> {
        self.transport.invoke(channel, data).await
    }

    /// Typed call: `args` is serialized into the argument bag and the
    /// result is deserialized into `T`.
    pub async fn call<A, T>(&self, channel: &str, args: &A) -> BridgeResult<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let data = serde_json::to_value(args).map_err(|_| BridgeError::InvalidArguments {
            channel: channel.to_string(),
        })?;
        let result = self.transport.invoke(channel, data).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Call whose result carries nothing the caller needs.
    pub async fn send<A>(&self, channel: &str, args: &A) -> BridgeResult<()>
    where
        A: Serialize + ?Sized,
    {
        self.call::<A, Value>(channel, args).await.map(|_| ())
    }

    /// Register the sole handler for `event_name`, replacing any prior one.
    pub fn on<F>(&self, event_name: impl Into<String>, handler: F) -> bool
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        self.events.on(event_name, handler)
    }

    /// Remove the handler for `event_name`.
    pub fn off(&self, event_name: &str) -> bool {
        self.events.off(event_name)
    }

    /// Route one inbound host message to reply intake or event dispatch.
    pub fn handle_message(&self, message: HostMessage) {
        match message {
            HostMessage::Reply { callback_id, reply } => {
                let outcome = self.transport.handle_reply(&callback_id, reply);
                if outcome == SettleOutcome::Abandoned {
                    debug!(callback_id = %callback_id, "Reply arrived after caller stopped waiting");
                }
            }
            HostMessage::Event { name, data } => {
                self.events.dispatch(&name, data);
            }
        }
    }

    pub fn transport(&self) -> &Arc<CorrelationTransport> {
        &self.transport
    }

    pub fn events(&self) -> &Arc<EventRegistry> {
        &self.events
    }
}
