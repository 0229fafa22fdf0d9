// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational logging goes through message structs in
//! [`messages`]. Each message implements `Display` for the human readable
//! line and [`StructuredLog`](messages::StructuredLog) for emitting it with
//! structured fields at the level that fits the event.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::forwarding` - translation and forwarding decisions
//! * `messages::engine` - simulated build lifecycle
//! * `messages::validation` - build definition validation failures
//! * `messages::report` - report rendering and output
//!
//! # Usage
//!
//! ```rust
//! use progress_forwarder::observability::messages::forwarding::DependencyDropped;
//! use progress_forwarder::observability::messages::StructuredLog;
//!
//! DependencyDropped {
//!     unit: ":app:jar",
//!     dependency: &":app:compileJava (4)",
//! }
//! .log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Installing twice is
/// a no-op, so tests and the binary can both call it.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
