// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for consistent, human-readable
//! output and [`StructuredLog`] to emit itself with structured fields.
//!
//! # Organization
//!
//! * `forwarding` - notification translation, dependency resolution, chain assembly
//! * `engine` - simulated build lifecycle and scheduling
//! * `validation` - build definition validation errors
//! * `report` - report rendering and output
//!
//! # Usage Pattern
//!
//! ```rust
//! use progress_forwarder::observability::messages::engine::BuildStarted;
//!
//! let msg = BuildStarted {
//!     unit_count: 5,
//!     transform_count: 2,
//!     max_concurrency: 4,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod engine;
pub mod forwarding;
pub mod report;
pub mod validation;

use tracing::Span;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emits the message as a single event.
    fn log(&self);

    /// Opens a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
