// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operation metadata, details payloads and lifecycle notifications.

use std::sync::{Arc, RwLock};

use super::identity::{OperationId, TransformIdentity, WorkUnitIdentity};

/// Milliseconds since the Unix epoch, as stamped by the engine.
pub type Timestamp = u64;

/// A fault captured while executing an operation.
///
/// Shared so the engine can keep its own copy while listeners render it.
pub type Fault = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Metadata the engine attaches to every operation it runs.
#[derive(Debug, Clone)]
pub struct BuildOperation {
    pub id: OperationId,
    /// The enclosing operation, whether or not a client ever sees it.
    pub parent_id: Option<OperationId>,
    /// Stable name of the operation, e.g. the identity path of a task.
    pub name: String,
    pub display_name: String,
    /// Category specific payload. `None` for bookkeeping operations.
    pub details: Option<OperationDetails>,
}

impl BuildOperation {
    pub fn new(id: OperationId, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            name: name.into(),
            display_name: display_name.into(),
            details: None,
        }
    }

    pub fn with_parent(mut self, parent_id: OperationId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_details(mut self, details: OperationDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// The runtime shape of an operation's details payload.
#[derive(Debug, Clone)]
pub enum OperationDetails {
    ExecuteTask(ExecuteTaskDetails),
    ExecuteTransform(ExecuteTransformDetails),
    /// Any operation kind the forwarding pipeline has no translator for.
    Custom { kind: String },
}

/// Details of a task execution operation.
#[derive(Debug, Clone)]
pub struct ExecuteTaskDetails {
    pub identity: WorkUnitIdentity,
    /// User facing task path, e.g. `:app:compileJava`.
    pub task_path: String,
    /// Live task state; the engine updates it while the task runs.
    pub state: TaskStateHandle,
}

/// Details of a scheduled transformation step.
#[derive(Debug, Clone)]
pub struct ExecuteTransformDetails {
    pub identity: TransformIdentity,
    pub transformer_name: String,
    pub subject_name: String,
}

/// Final state flags of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub up_to_date: bool,
    pub skipped: bool,
    /// Outputs were loaded from a shared result cache.
    pub from_cache: bool,
    pub skip_message: Option<String>,
}

/// Shared, engine-owned handle to a task's state.
#[derive(Debug, Clone, Default)]
pub struct TaskStateHandle(Arc<RwLock<TaskState>>);

impl TaskStateHandle {
    pub fn new(state: TaskState) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    /// Applies `change` to the state. A poisoned lock is recovered, the state
    /// is plain data and stays consistent.
    pub fn update(&self, change: impl FnOnce(&mut TaskState)) {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        change(&mut guard);
    }

    pub fn snapshot(&self) -> TaskState {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Delivered when an operation starts.
#[derive(Debug, Clone, Copy)]
pub struct StartNotification {
    pub start_time: Timestamp,
}

/// Delivered when an operation finishes, successfully or not.
#[derive(Debug, Clone, Default)]
pub struct FinishNotification {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Result payload, absent when the operation never reached execution.
    pub result: Option<ResultPayload>,
    /// Captured faults in the order they were recorded. Empty on success.
    pub failures: Vec<Fault>,
}

/// Result payload attached to a finish notification.
#[derive(Debug, Clone)]
pub enum ResultPayload {
    ExecuteTask(ExecuteTaskResult),
    /// Opaque result of an operation kind this pipeline does not interpret.
    Custom(serde_json::Value),
}

/// Result payload of an executed task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteTaskResult {
    /// The task did partial rather than full work.
    pub incremental: bool,
    /// Why the task was out of date, e.g. `Input property 'source' has changed`.
    pub execution_reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_state_handle_is_shared() {
        let handle = TaskStateHandle::default();
        let engine_side = handle.clone();

        engine_side.update(|state| {
            state.up_to_date = true;
            state.skip_message = Some("UP-TO-DATE".to_string());
        });

        let snapshot = handle.snapshot();
        assert!(snapshot.up_to_date);
        assert_eq!(snapshot.skip_message.as_deref(), Some("UP-TO-DATE"));
    }

    #[test]
    fn test_build_operation_builder() {
        let op = BuildOperation::new(OperationId(4), ":app:jar", "Task :app:jar")
            .with_parent(OperationId(1))
            .with_details(OperationDetails::Custom {
                kind: "configure".to_string(),
            });

        assert_eq!(op.parent_id, Some(OperationId(1)));
        assert!(matches!(op.details, Some(OperationDetails::Custom { .. })));
    }
}
