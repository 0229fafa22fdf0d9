//! Narrow read-only capabilities the forwarding pipeline consumes.
//!
//! Each is injected explicitly rather than looked up globally, so the pipeline
//! can be exercised in isolation with fakes. Every lookup may come back empty;
//! callers treat "none" as a normal answer.

use crate::events::TaskResult;
use crate::operations::{
    BuildOperation, OperationId, PluginId, TransformIdentity, WorkUnitIdentity,
};

/// Finds the nearest ancestor of an operation that the client already knows about.
pub trait ParentIdResolver: Send + Sync {
    fn find_started_parent_id(&self, operation: &BuildOperation) -> Option<OperationId>;
}

/// Attributes a unit of work to the plugin that registered it.
pub trait OriginPluginLookup: Send + Sync {
    fn origin_plugin(&self, identity: &WorkUnitIdentity) -> Option<PluginId>;
}

/// Maps a transformation step to the operation id it was forwarded under.
pub trait TransformOperationTracker: Send + Sync {
    fn find_operation_id(&self, identity: &TransformIdentity) -> Option<OperationId>;
}

/// Upstream work a unit declared in the execution graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionDependencies {
    pub tasks: Vec<WorkUnitIdentity>,
    pub transforms: Vec<TransformIdentity>,
}

/// Answers execution graph queries for a unit of work.
pub trait ExecutionGraphTracker: Send + Sync {
    /// Unknown units have no dependencies.
    fn execution_dependencies(&self, identity: &WorkUnitIdentity) -> ExecutionDependencies;
}

/// Augments a task result before it is published, keyed by operation id.
pub trait OperationResultPostProcessor: Send + Sync {
    fn process(&self, result: TaskResult, operation_id: OperationId) -> TaskResult;
}
