//! Correlation Transport: request/response calls over a one-way channel.

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult, UNKNOWN_HOST_ERROR};
use crate::pending::{PendingCallTable, PendingStats, SettleOutcome, Settlement};
use crate::ports::HostChannel;
use serde_json::Value;
use shared_types::{CorrelationId, Reply, RequestEnvelope};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Pairs fire-and-forget sends with asynchronous, out-of-order replies.
///
/// The host calls [`CorrelationTransport::handle_reply`] whenever a reply is
/// ready; callers await [`CorrelationTransport::invoke`]. Each call settles
/// exactly once, no matter how many replies the host sends for its ID.
pub struct CorrelationTransport {
    /// Raw send primitive
    host: Arc<dyn HostChannel>,
    /// Calls awaiting settlement
    pending: PendingCallTable,
    /// Timeout policy
    config: BridgeConfig,
    /// Set by `close()`
    closed: AtomicBool,
}

impl CorrelationTransport {
    pub fn new(host: Arc<dyn HostChannel>, config: BridgeConfig) -> Self {
        Self {
            host,
            pending: PendingCallTable::new(),
            config,
            closed: AtomicBool::new(false),
        }
    }

    /// Availability probe: whether calls can be issued in this host.
    pub fn is_available(&self) -> bool {
        !self.closed.load(Ordering::Acquire) && self.host.is_available()
    }

    /// Issue a remote call using the configured default timeout.
    pub async fn invoke(&self, channel: &str, data: Value) -> BridgeResult<Value> {
        self.invoke_with_timeout(channel, data, self.config.default_timeout)
            .await
    }

    /// Issue a remote call with an explicit timeout (`None` waits until the
    /// host answers).
    pub async fn invoke_with_timeout(
        &self,
        channel: &str,
        data: Value,
        timeout: Option<Duration>,
    ) -> BridgeResult<Value> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BridgeError::Closed);
        }
        if channel.is_empty() {
            return Err(BridgeError::InvalidChannel);
        }
        if !matches!(data, Value::Null | Value::Object(_)) {
            return Err(BridgeError::InvalidArguments {
                channel: channel.to_string(),
            });
        }
        if !self.host.is_available() {
            warn!(channel = channel, "Bridge call issued while host channel is unavailable");
            return Err(BridgeError::Unavailable);
        }

        let (correlation_id, rx) = self.pending.register(channel, timeout);

        // A close() that ran after the first check has already drained the
        // table; this entry would never be rejected.
        if self.closed.load(Ordering::Acquire) {
            self.pending.cancel(&correlation_id);
            return Err(BridgeError::Closed);
        }

        let request = RequestEnvelope::new(channel, data, correlation_id);

        if let Err(e) = self.host.post_message(&request) {
            self.pending.cancel(&correlation_id);
            return Err(BridgeError::SendFailed(e.to_string()));
        }

        debug!(
            correlation_id = %correlation_id,
            channel = channel,
            "Posted bridge request"
        );

        let settled = match timeout {
            None => rx.await,
            Some(after) => match tokio::time::timeout(after, rx).await {
                Ok(settled) => settled,
                Err(_) => {
                    self.pending.expire(&correlation_id, after);
                    return Err(BridgeError::Timeout {
                        channel: channel.to_string(),
                        after,
                    });
                }
            },
        };

        // The sender only disappears unsettled when the table is torn down.
        settled.unwrap_or(Err(BridgeError::Closed))
    }

    /// Reply intake, called by the host adapter with `(callbackId, reply)`.
    ///
    /// Unknown, foreign and already settled IDs are logged and ignored.
    pub fn handle_reply(&self, callback_id: &str, reply: Value) -> SettleOutcome {
        let Some(correlation_id) = CorrelationId::parse(callback_id) else {
            self.pending.record_orphan(callback_id);
            return SettleOutcome::Orphaned;
        };

        self.pending.settle(correlation_id, interpret_reply(reply))
    }

    /// Reply intake for hosts that hand over the reply as JSON text.
    pub fn handle_raw_reply(&self, callback_id: &str, raw: &str) -> SettleOutcome {
        let reply = serde_json::from_str(raw).unwrap_or_else(|e| {
            debug!(callback_id = callback_id, error = %e, "Unparsable reply body");
            Value::Null
        });
        self.handle_reply(callback_id, reply)
    }

    /// Shut the transport down, rejecting every pending call.
    ///
    /// Returns the number of calls rejected.
    pub fn close(&self) -> usize {
        self.closed.store(true, Ordering::Release);
        self.pending.close_all()
    }

    /// Whether `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Reject calls older than their timeout. See [`sweep_task`].
    pub fn remove_expired(&self) -> usize {
        self.pending.remove_expired()
    }

    /// Get number of calls awaiting a reply
    pub fn pending_count(&self) -> usize {
        self.pending.pending_count()
    }

    /// Check if a correlation ID is still awaiting its reply
    pub fn is_pending(&self, correlation_id: &CorrelationId) -> bool {
        self.pending.is_pending(correlation_id)
    }

    /// Get statistics
    pub fn stats(&self) -> &PendingStats {
        self.pending.stats()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

fn interpret_reply(reply: Value) -> Settlement {
    match Reply::from_value(reply) {
        Reply::Success(data) => Ok(data),
        Reply::Error(message) => Err(BridgeError::Remote(
            message.unwrap_or_else(|| UNKNOWN_HOST_ERROR.to_string()),
        )),
        Reply::Malformed => Err(BridgeError::InvalidResponse),
    }
}

/// Background task rejecting expired calls until the transport closes.
///
/// Only needed for calls whose caller dropped the future; a caller that is
/// still awaiting enforces its own timeout.
pub async fn sweep_task(transport: Arc<CorrelationTransport>, interval: Duration) {
    let mut sweep_interval = tokio::time::interval(interval);
    sweep_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        sweep_interval.tick().await;
        if transport.is_closed() {
            break;
        }
        let removed = transport.remove_expired();
        if removed > 0 {
            debug!(removed = removed, "Swept expired pending calls");
        }
    }
}
