//! QL-02 Command Facade - the call-site layer the application talks to.
//!
//! Wraps the correlation transport with typed host commands and owns the
//! event registry for host-initiated pushes.
//!
//! # Architecture
//!
//! ```text
//! app ──get_settings()/call()/on()──▶ ┌──────────────────────┐
//!                                     │    CommandFacade     │
//!                                     │  ┌────────────────┐  │
//!                                     │  │ EventRegistry  │  │
//!                                     │  └────────────────┘  │
//!                                     └───┬──────────▲───────┘
//!                                invoke() │          │ handle_message()
//!                                         ▼          │
//!                          CorrelationTransport   BridgeListener ◀── HostReceiver
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ql_01_correlation_transport::adapters::{create_host_channel, create_inbound_channel};
//! use ql_01_correlation_transport::{BridgeConfig, CorrelationTransport};
//! use ql_02_command_facade::{names, BridgeListener, CommandFacade};
//!
//! # async fn demo() -> Result<(), ql_01_correlation_transport::BridgeError> {
//! let (host, _requests) = create_host_channel();
//! let (_inbound, receiver) = create_inbound_channel();
//!
//! let transport = Arc::new(CorrelationTransport::new(Arc::new(host), BridgeConfig::default()));
//! let facade = Arc::new(CommandFacade::new(transport));
//! BridgeListener::new(Arc::clone(&facade), Arc::new(receiver)).spawn();
//!
//! facade.on(names::SETTINGS_CHANGED, |settings| println!("settings now {settings}"));
//! let settings = facade.get_settings().await?;
//! # let _ = settings;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod events;
pub mod facade;
pub mod listener;

pub use commands::{channels, FileFilter, OpenDialogOptions};
pub use events::{names, DispatchStats, EventHandler, EventRegistry};
pub use facade::CommandFacade;
pub use listener::BridgeListener;
