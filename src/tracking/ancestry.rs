// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use dashmap::DashMap;
use std::sync::Arc;

use crate::operations::{BuildOperation, FinishNotification, OperationId, StartNotification};
use crate::traits::OperationListener;

/// Parent links of operations that have started and not yet finished.
#[derive(Debug, Default)]
pub struct AncestryTracker {
    parents: DashMap<OperationId, Option<OperationId>>,
}

impl AncestryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, operation: &BuildOperation) {
        self.parents.insert(operation.id, operation.parent_id);
    }

    pub fn forget(&self, id: OperationId) {
        self.parents.remove(&id);
    }

    pub fn parent_of(&self, id: OperationId) -> Option<OperationId> {
        self.parents.get(&id).and_then(|entry| *entry.value())
    }

    /// Walks from `start` towards the root and returns the first id, `start`
    /// included, that satisfies `matches`.
    ///
    /// The walk is bounded by the number of tracked operations, so a corrupt
    /// parent link cannot loop forever.
    pub fn find_closest_matching_ancestor(
        &self,
        start: OperationId,
        matches: impl Fn(OperationId) -> bool,
    ) -> Option<OperationId> {
        let mut current = Some(start);
        let mut remaining = self.parents.len() + 1;

        while let Some(id) = current {
            if matches(id) {
                return Some(id);
            }
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            current = self.parent_of(id);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Head of a listener chain: records ancestry before anyone translates a
/// start, and drops it after everyone handled the finish.
pub struct AncestryTrackingListener {
    tracker: Arc<AncestryTracker>,
    delegate: Arc<dyn OperationListener>,
}

impl AncestryTrackingListener {
    pub fn new(tracker: Arc<AncestryTracker>, delegate: Arc<dyn OperationListener>) -> Self {
        Self { tracker, delegate }
    }
}

impl OperationListener for AncestryTrackingListener {
    fn started(&self, operation: &BuildOperation, start: &StartNotification) {
        self.tracker.record(operation);
        self.delegate.started(operation, start);
    }

    fn finished(&self, operation: &BuildOperation, finish: &FinishNotification) {
        self.delegate.finished(operation, finish);
        self.tracker.forget(operation.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NoopListener;

    fn op(id: u64, parent: Option<u64>) -> BuildOperation {
        let op = BuildOperation::new(OperationId(id), format!("op{id}"), format!("Op {id}"));
        match parent {
            Some(p) => op.with_parent(OperationId(p)),
            None => op,
        }
    }

    #[test]
    fn test_walks_to_closest_match() {
        let tracker = AncestryTracker::new();
        tracker.record(&op(1, None));
        tracker.record(&op(2, Some(1)));
        tracker.record(&op(3, Some(2)));

        assert_eq!(
            tracker.find_closest_matching_ancestor(OperationId(3), |id| id.as_u64() < 3),
            Some(OperationId(2))
        );
        assert_eq!(
            tracker.find_closest_matching_ancestor(OperationId(3), |id| id == OperationId(1)),
            Some(OperationId(1))
        );
        assert_eq!(tracker.find_closest_matching_ancestor(OperationId(3), |_| false), None);
    }

    #[test]
    fn test_cycle_terminates() {
        let tracker = AncestryTracker::new();
        tracker.record(&op(1, Some(2)));
        tracker.record(&op(2, Some(1)));

        assert_eq!(tracker.find_closest_matching_ancestor(OperationId(1), |_| false), None);
    }

    #[test]
    fn test_listener_records_and_forgets() {
        let tracker = Arc::new(AncestryTracker::new());
        let listener = AncestryTrackingListener::new(tracker.clone(), Arc::new(NoopListener));
        let child = op(2, Some(1));

        listener.started(&child, &StartNotification { start_time: 0 });
        assert_eq!(tracker.parent_of(OperationId(2)), Some(OperationId(1)));

        listener.finished(&child, &FinishNotification::default());
        assert!(tracker.is_empty());
    }
}
