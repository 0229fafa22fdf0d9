// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for report output.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// A report was written to disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ReportWritten<'a> {
    pub report: &'a str,
    pub destination: &'a Path,
    pub operation_count: usize,
}

impl Display for ReportWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wrote '{}' report with {} operations to {}",
            self.report,
            self.operation_count,
            self.destination.display()
        )
    }
}

impl StructuredLog for ReportWritten<'_> {
    fn log(&self) {
        tracing::info!(
            report = self.report,
            destination = %self.destination.display(),
            operation_count = self.operation_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "report_written",
            span_name = name,
            report = self.report,
            destination = %self.destination.display(),
        )
    }
}

/// Events that could not be matched to a report row.
///
/// # Log Level
/// `warn!` - Usually a build that was aborted midway
pub struct UnfinishedOperations {
    pub count: usize,
}

impl Display for UnfinishedOperations {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} operations started but never finished", self.count)
    }
}

impl StructuredLog for UnfinishedOperations {
    fn log(&self) {
        tracing::warn!(count = self.count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("unfinished_operations", span_name = name, count = self.count)
    }
}
