//! Adapters for the Correlation Transport.
//!
//! Concrete host channels: an in-memory pair for tests and demos, and a
//! detached host for environments without the bridge.

pub mod channel;
pub mod detached;

pub use channel::{create_host_channel, create_inbound_channel, ChannelHost, ChannelReceiver};
pub use detached::DetachedHost;
