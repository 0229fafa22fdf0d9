// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::BTreeMap;

use crate::operations::Timestamp;

/// Status message carried by every successfully executed task.
pub const SUCCESS_STATUS: &str = "SUCCESS";

/// Structured rendering of a captured fault and its causes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureInfo {
    pub message: String,
    /// Detailed rendering of the fault.
    pub description: String,
    pub causes: Vec<FailureInfo>,
}

impl FailureInfo {
    /// Renders an error and its `source()` chain.
    ///
    /// # Example
    /// ```
    /// use progress_forwarder::events::FailureInfo;
    ///
    /// let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    /// let info = FailureInfo::from_error(&error);
    ///
    /// assert_eq!(info.message, "disk full");
    /// assert!(info.causes.is_empty());
    /// ```
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            message: error.to_string(),
            description: format!("{error:?}"),
            causes: error.source().map(Self::from_error).into_iter().collect(),
        }
    }
}

/// Terminal outcome of a task, see [`classify_task_result`](crate::forwarding::classify_task_result).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskOutcome {
    UpToDate {
        /// Outputs came from a shared result cache rather than being re-verified.
        from_cache: bool,
        skip_message: Option<String>,
    },
    Skipped {
        skip_message: Option<String>,
    },
    Success {
        status_message: String,
        execution_reasons: Vec<String>,
    },
    Failure {
        failures: Vec<FailureInfo>,
        execution_reasons: Vec<String>,
    },
}

impl TaskOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failure { .. })
    }

    /// Short label for reports, e.g. `UP-TO-DATE`.
    pub fn label(&self) -> &'static str {
        match self {
            TaskOutcome::UpToDate { from_cache: true, .. } => "FROM-CACHE",
            TaskOutcome::UpToDate { .. } => "UP-TO-DATE",
            TaskOutcome::Skipped { .. } => "SKIPPED",
            TaskOutcome::Success { .. } => "SUCCESS",
            TaskOutcome::Failure { .. } => "FAILED",
        }
    }
}

/// Final result of a task, computed once when the task finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskResult {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub incremental: bool,
    pub outcome: TaskOutcome,
    /// Values attached by result post-processors, keyed by attachment name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attachments: BTreeMap<String, serde_json::Value>,
}

/// Terminal outcome of a transformation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformOutcome {
    Success,
    Failure { failures: Vec<FailureInfo> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub outcome: TransformOutcome,
}

/// Result carried by a finish event.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Task(TaskResult),
    Transform(TransformResult),
}

impl OperationResult {
    pub fn is_failure(&self) -> bool {
        match self {
            OperationResult::Task(r) => r.outcome.is_failure(),
            OperationResult::Transform(r) => matches!(r.outcome, TransformOutcome::Failure { .. }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperationResult::Task(r) => r.outcome.label(),
            OperationResult::Transform(r) => match r.outcome {
                TransformOutcome::Success => "SUCCESS",
                TransformOutcome::Failure { .. } => "FAILED",
            },
        }
    }

    pub fn duration_ms(&self) -> u64 {
        let (start, end) = match self {
            OperationResult::Task(r) => (r.start_time, r.end_time),
            OperationResult::Transform(r) => (r.start_time, r.end_time),
        };
        end.saturating_sub(start)
    }
}
