// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the simulated build lifecycle.
//!
//! This module contains message types for logging events related to:
//! * Build start and completion
//! * Level scheduling
//! * Units that never start because an upstream failed

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Build started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use progress_forwarder::observability::messages::engine::BuildStarted;
///
/// let msg = BuildStarted {
///     unit_count: 5,
///     transform_count: 1,
///     max_concurrency: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BuildStarted {
    pub unit_count: usize,
    pub transform_count: usize,
    pub max_concurrency: usize,
}

impl Display for BuildStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting build: {} units, {} transforms, max_concurrency={}",
            self.unit_count, self.transform_count, self.max_concurrency
        )
    }
}

impl StructuredLog for BuildStarted {
    fn log(&self) {
        tracing::info!(
            unit_count = self.unit_count,
            transform_count = self.transform_count,
            max_concurrency = self.max_concurrency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "build",
            span_name = name,
            unit_count = self.unit_count,
            transform_count = self.transform_count,
            max_concurrency = self.max_concurrency,
        )
    }
}

/// Build finished, whatever the outcome of its units.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use progress_forwarder::observability::messages::engine::BuildCompleted;
/// use std::time::Duration;
///
/// let msg = BuildCompleted {
///     executed: 4,
///     failed: 1,
///     blocked: 1,
///     duration: Duration::from_millis(250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BuildCompleted {
    pub executed: usize,
    pub failed: usize,
    pub blocked: usize,
    pub duration: std::time::Duration,
}

impl Display for BuildCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Build completed in {:?}: {} units run, {} failed, {} not started",
            self.duration, self.executed, self.failed, self.blocked
        )
    }
}

impl StructuredLog for BuildCompleted {
    fn log(&self) {
        tracing::info!(
            executed = self.executed,
            failed = self.failed,
            blocked = self.blocked,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "build_completed",
            span_name = name,
            executed = self.executed,
            failed = self.failed,
            duration = ?self.duration,
        )
    }
}

/// Level computation completed.
///
/// # Log Level
/// `debug!` - Scheduling detail
pub struct LevelComputationCompleted {
    pub level_count: usize,
    pub unit_count: usize,
}

impl Display for LevelComputationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Computed {} levels for {} units",
            self.level_count, self.unit_count
        )
    }
}

impl StructuredLog for LevelComputationCompleted {
    fn log(&self) {
        tracing::debug!(
            level_count = self.level_count,
            unit_count = self.unit_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "level_computation",
            span_name = name,
            level_count = self.level_count,
            unit_count = self.unit_count,
        )
    }
}

/// A unit is not started because something it needs failed.
///
/// # Log Level
/// `warn!` - Degraded build
///
/// # Example
/// ```
/// use progress_forwarder::observability::messages::engine::UnitBlocked;
///
/// let msg = UnitBlocked { unit_id: "dist", blocked_by: "test" };
/// assert_eq!(msg.to_string(), "Not starting 'dist': 'test' did not succeed");
/// ```
pub struct UnitBlocked<'a> {
    pub unit_id: &'a str,
    pub blocked_by: &'a str,
}

impl Display for UnitBlocked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Not starting '{}': '{}' did not succeed",
            self.unit_id, self.blocked_by
        )
    }
}

impl StructuredLog for UnitBlocked<'_> {
    fn log(&self) {
        tracing::warn!(
            unit_id = self.unit_id,
            blocked_by = self.blocked_by,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unit_blocked",
            span_name = name,
            unit_id = self.unit_id,
            blocked_by = self.blocked_by,
        )
    }
}

/// A unit finished running.
///
/// # Log Level
/// `debug!` - Once per unit
pub struct UnitFinished<'a> {
    pub unit_id: &'a str,
    pub outcome: &'a str,
    pub duration_ms: u64,
}

impl Display for UnitFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unit '{}' finished {} after {}ms",
            self.unit_id, self.outcome, self.duration_ms
        )
    }
}

impl StructuredLog for UnitFinished<'_> {
    fn log(&self) {
        tracing::debug!(
            unit_id = self.unit_id,
            outcome = self.outcome,
            duration_ms = self.duration_ms,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "unit_finished",
            span_name = name,
            unit_id = self.unit_id,
            outcome = self.outcome,
        )
    }
}
