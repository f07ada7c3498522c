//! # Quill Bridge Test Suite
//!
//! Unified test crate for behaviour that spans crates.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── bridge_benchmarks.rs  # Settle and round-trip throughput
//! └── src/integration/
//!     ├── bridge_flows.rs       # Transport + facade + listener + simulated host
//!     ├── ordering.rs           # Out-of-order settlement, property based
//!     └── ambient.rs            # Configuration and logging setup
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ql-tests
//! cargo test -p ql-tests integration::bridge_flows
//! cargo bench -p ql-tests
//! ```

#![allow(dead_code)]

pub mod integration;
