//! Event registry for host-initiated pushes.
//!
//! One handler per event name. Registering again for the same name replaces
//! the previous handler; there is no multicast. Existing callers depend on
//! that replace-on-register behaviour.

use dashmap::DashMap;
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

/// Names of the pushes the desktop host emits.
pub mod names {
    /// User settings changed outside the current window.
    pub const SETTINGS_CHANGED: &str = "settings-changed";
    /// A watched note file changed on disk.
    pub const FILE_CHANGED: &str = "file-changed";
    /// A native menu item was activated.
    pub const MENU_ACTION: &str = "menu-action";
    /// OAuth redirect landed back in the app.
    pub const AUTH_CALLBACK: &str = "auth-callback";
}

/// Handler invoked with the push payload.
pub type EventHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Dispatch counters
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Pushes delivered to a handler
    pub total_dispatched: AtomicU64,
    /// Pushes with no handler registered
    pub total_dropped: AtomicU64,
    /// Pushes whose handler panicked
    pub total_panicked: AtomicU64,
}

/// Mapping from event name to its single active handler.
#[derive(Default)]
pub struct EventRegistry {
    handlers: DashMap<String, EventHandler>,
    stats: DispatchStats,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` as the sole receiver for `event_name`.
    ///
    /// Returns `true` when a previous handler was replaced.
    pub fn on<F>(&self, event_name: impl Into<String>, handler: F) -> bool
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        let event_name = event_name.into();
        let replaced = self
            .handlers
            .insert(event_name.clone(), Arc::new(handler))
            .is_some();

        debug!(
            event = %event_name,
            replaced = replaced,
            "Registered event handler"
        );
        replaced
    }

    /// Remove the handler for `event_name`.
    pub fn off(&self, event_name: &str) -> bool {
        let removed = self.handlers.remove(event_name).is_some();
        if removed {
            debug!(event = %event_name, "Removed event handler");
        }
        removed
    }

    /// Deliver a host push. Returns `false` when it was dropped.
    ///
    /// A panicking handler is contained here: replies share the inbound
    /// stream with pushes, so it must not take the caller down with it.
    pub fn dispatch(&self, event_name: &str, data: Value) -> bool {
        // Clone the handler out so it runs without holding the shard lock;
        // a handler may call `on`/`off` itself.
        let handler = self.handlers.get(event_name).map(|h| Arc::clone(h.value()));

        match handler {
            Some(handler) => {
                self.stats.total_dispatched.fetch_add(1, Ordering::Relaxed);
                if catch_unwind(AssertUnwindSafe(|| handler(data))).is_err() {
                    self.stats.total_panicked.fetch_add(1, Ordering::Relaxed);
                    error!(event = %event_name, "Event handler panicked");
                }
                true
            }
            None => {
                self.stats.total_dropped.fetch_add(1, Ordering::Relaxed);
                debug!(event = %event_name, "No handler for event, dropping");
                false
            }
        }
    }

    /// Check if `event_name` has a handler
    pub fn has_handler(&self, event_name: &str) -> bool {
        self.handlers.contains_key(event_name)
    }

    /// Get number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Get statistics
    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }
}
