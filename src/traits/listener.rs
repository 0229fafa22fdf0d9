use crate::operations::{BuildOperation, FinishNotification, StartNotification};

/// Receives raw lifecycle notifications from the orchestration engine.
///
/// Called concurrently from the engine's worker threads, strictly
/// start-before-finish for any single operation. Implementations must return
/// quickly and must not block.
pub trait OperationListener: Send + Sync {
    fn started(&self, operation: &BuildOperation, start: &StartNotification);

    fn finished(&self, operation: &BuildOperation, finish: &FinishNotification);
}

/// End of a listener chain: drops every notification it is handed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl OperationListener for NoopListener {
    fn started(&self, _operation: &BuildOperation, _start: &StartNotification) {}

    fn finished(&self, _operation: &BuildOperation, _finish: &FinishNotification) {}
}
