//! Pending Call Table - pairs one-way sends with out-of-order replies.
//!
//! Maps correlation IDs to the oneshot sender of the caller waiting on them.
//! An entry is removed by the first thing that settles it: a reply, a
//! timeout, or shutdown. Whatever arrives afterwards for the same ID is an
//! orphan.

use crate::error::BridgeError;
use dashmap::DashMap;
use serde_json::Value;
use shared_types::CorrelationId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// What a pending caller eventually receives.
pub type Settlement = Result<Value, BridgeError>;

/// A call waiting for its reply
struct PendingCall {
    /// Channel to settle the caller
    sender: oneshot::Sender<Settlement>,
    /// When the call was registered
    created_at: Instant,
    /// Operation name (for logging)
    channel: String,
    /// Expiry for the sweeper, if any
    timeout: Option<Duration>,
}

/// Result of trying to settle a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The waiting caller received the settlement.
    Delivered,
    /// The entry existed but its caller had already dropped the future.
    Abandoned,
    /// No entry for this ID: unknown, foreign or already settled.
    Orphaned,
}

impl SettleOutcome {
    /// Whether a pending entry was consumed.
    pub fn matched(self) -> bool {
        !matches!(self, SettleOutcome::Orphaned)
    }
}

/// Statistics for the pending call table
#[derive(Debug, Default)]
pub struct PendingStats {
    /// Total calls registered
    pub total_registered: AtomicU64,
    /// Total calls settled by a host reply
    pub total_completed: AtomicU64,
    /// Replies that matched no pending call
    pub total_orphaned: AtomicU64,
    /// Calls removed because their timeout elapsed
    pub total_timeouts: AtomicU64,
    /// Replies for calls whose caller stopped listening
    pub total_abandoned: AtomicU64,
    /// Calls rejected by shutdown
    pub total_closed: AtomicU64,
}

/// Pending call table.
///
/// Flow:
/// 1. `invoke` calls `register()` and gets the correlation ID plus a receiver
/// 2. `invoke` posts the request carrying that ID
/// 3. Reply intake calls `settle()` with the interpreted reply
/// 4. `invoke` awaits the receiver
pub struct PendingCallTable {
    /// Map of correlation ID to pending call
    pending: DashMap<CorrelationId, PendingCall>,
    /// Statistics
    stats: PendingStats,
}

impl PendingCallTable {
    pub fn new() -> Self {
        Self {
            pending: DashMap::new(),
            stats: PendingStats::default(),
        }
    }

    /// Register a call and get a receiver for its settlement.
    pub fn register(
        &self,
        channel: &str,
        timeout: Option<Duration>,
    ) -> (CorrelationId, oneshot::Receiver<Settlement>) {
        let (tx, rx) = oneshot::channel();

        // v7 IDs are unique by construction; the loop only guards the map
        // invariant that a live ID is never reused.
        let mut correlation_id = CorrelationId::new();
        while self.pending.contains_key(&correlation_id) {
            correlation_id = CorrelationId::new();
        }

        self.pending.insert(
            correlation_id,
            PendingCall {
                sender: tx,
                created_at: Instant::now(),
                channel: channel.to_string(),
                timeout,
            },
        );
        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);

        debug!(
            correlation_id = %correlation_id,
            channel = channel,
            "Registered pending call"
        );

        (correlation_id, rx)
    }

    /// Settle a pending call with the host's answer.
    pub fn settle(&self, correlation_id: CorrelationId, result: Settlement) -> SettleOutcome {
        let Some((_, call)) = self.pending.remove(&correlation_id) else {
            self.record_orphan(&correlation_id.to_string());
            return SettleOutcome::Orphaned;
        };

        let response_time = call.created_at.elapsed();
        let is_ok = result.is_ok();

        match call.sender.send(result) {
            Ok(()) => {
                self.stats.total_completed.fetch_add(1, Ordering::Relaxed);
                debug!(
                    correlation_id = %correlation_id,
                    channel = call.channel,
                    success = is_ok,
                    response_time_ms = response_time.as_millis(),
                    "Settled pending call"
                );
                SettleOutcome::Delivered
            }
            Err(_) => {
                self.stats.total_abandoned.fetch_add(1, Ordering::Relaxed);
                debug!(
                    correlation_id = %correlation_id,
                    channel = call.channel,
                    "Pending call receiver dropped"
                );
                SettleOutcome::Abandoned
            }
        }
    }

    /// Count and log a reply that matched nothing.
    pub fn record_orphan(&self, callback_id: &str) {
        self.stats.total_orphaned.fetch_add(1, Ordering::Relaxed);
        warn!(
            callback_id = callback_id,
            "Reply for unknown or already settled correlation ID"
        );
    }

    /// Remove a call without settling it (its caller is no longer waiting).
    pub fn cancel(&self, correlation_id: &CorrelationId) -> bool {
        self.pending.remove(correlation_id).is_some()
    }

    /// Remove a call whose caller gave up waiting after `after`.
    pub fn expire(&self, correlation_id: &CorrelationId, after: Duration) -> bool {
        let Some((_, call)) = self.pending.remove(correlation_id) else {
            return false;
        };
        self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
        warn!(
            correlation_id = %correlation_id,
            channel = call.channel,
            timeout_ms = after.as_millis(),
            "Pending call timed out"
        );
        true
    }

    /// Reject every call older than its own timeout.
    ///
    /// Returns the number of calls removed.
    pub fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<CorrelationId> = self
            .pending
            .iter()
            .filter(|entry| {
                entry
                    .timeout
                    .is_some_and(|timeout| now.duration_since(entry.created_at) > timeout)
            })
            .map(|entry| *entry.key())
            .collect();

        let mut removed = 0;
        for id in expired {
            let Some((_, call)) = self.pending.remove(&id) else {
                continue;
            };
            let after = call.timeout.unwrap_or_default();
            warn!(
                correlation_id = %id,
                channel = call.channel,
                elapsed_ms = now.duration_since(call.created_at).as_millis(),
                timeout_ms = after.as_millis(),
                "Removing expired pending call"
            );
            let _ = call.sender.send(Err(BridgeError::Timeout {
                channel: call.channel,
                after,
            }));
            self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
            removed += 1;
        }

        removed
    }

    /// Reject every pending call with `BridgeError::Closed`.
    ///
    /// Returns the number of calls rejected.
    pub fn close_all(&self) -> usize {
        let ids: Vec<CorrelationId> = self.pending.iter().map(|entry| *entry.key()).collect();

        let mut closed = 0;
        for id in ids {
            if let Some((_, call)) = self.pending.remove(&id) {
                let _ = call.sender.send(Err(BridgeError::Closed));
                self.stats.total_closed.fetch_add(1, Ordering::Relaxed);
                closed += 1;
            }
        }

        if closed > 0 {
            debug!(closed = closed, "Rejected pending calls on shutdown");
        }
        closed
    }

    /// Get number of currently pending calls
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if a correlation ID is pending
    pub fn is_pending(&self, correlation_id: &CorrelationId) -> bool {
        self.pending.contains_key(correlation_id)
    }

    /// Get statistics
    pub fn stats(&self) -> &PendingStats {
        &self.stats
    }
}

impl Default for PendingCallTable {
    fn default() -> Self {
        Self::new()
    }
}
