// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Post-processing of task results before they are forwarded.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::events::TaskResult;
use crate::operations::OperationId;
use crate::traits::OperationResultPostProcessor;

/// Values recorded against a running operation and merged into its result.
///
/// Entries are consumed by [`process`](OperationResultPostProcessor::process),
/// so each value reaches exactly one result.
#[derive(Debug, Default)]
pub struct ResultAttachments {
    pending: DashMap<OperationId, BTreeMap<String, serde_json::Value>>,
}

impl ResultAttachments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, id: OperationId, key: impl Into<String>, value: serde_json::Value) {
        self.pending.entry(id).or_default().insert(key.into(), value);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl OperationResultPostProcessor for ResultAttachments {
    fn process(&self, mut result: TaskResult, id: OperationId) -> TaskResult {
        if let Some((_, values)) = self.pending.remove(&id) {
            result.attachments.extend(values);
        }
        result
    }
}

/// Applies post-processors in registration order.
#[derive(Default)]
pub struct CompositeResultPostProcessor {
    processors: Vec<Arc<dyn OperationResultPostProcessor>>,
}

impl CompositeResultPostProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, processor: Arc<dyn OperationResultPostProcessor>) -> Self {
        self.processors.push(processor);
        self
    }
}

impl OperationResultPostProcessor for CompositeResultPostProcessor {
    fn process(&self, result: TaskResult, id: OperationId) -> TaskResult {
        self.processors
            .iter()
            .fold(result, |result, processor| processor.process(result, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{TaskOutcome, SUCCESS_STATUS};
    use serde_json::json;

    fn result() -> TaskResult {
        TaskResult {
            start_time: 0,
            end_time: 1,
            incremental: false,
            outcome: TaskOutcome::Success {
                status_message: SUCCESS_STATUS.to_string(),
                execution_reasons: vec![],
            },
            attachments: BTreeMap::new(),
        }
    }

    struct Overwrite;

    impl OperationResultPostProcessor for Overwrite {
        fn process(&self, mut result: TaskResult, _id: OperationId) -> TaskResult {
            result.attachments.insert("tests".to_string(), json!("overwritten"));
            result
        }
    }

    #[test]
    fn test_attachments_consumed_once() {
        let attachments = ResultAttachments::new();
        attachments.attach(OperationId(4), "tests", json!({ "passed": 12, "failed": 0 }));

        let first = attachments.process(result(), OperationId(4));
        let second = attachments.process(result(), OperationId(4));

        assert_eq!(first.attachments["tests"]["passed"], 12);
        assert!(second.attachments.is_empty());
        assert_eq!(attachments.pending_count(), 0);
    }

    #[test]
    fn test_other_operations_untouched() {
        let attachments = ResultAttachments::new();
        attachments.attach(OperationId(4), "tests", json!(1));

        assert!(attachments.process(result(), OperationId(5)).attachments.is_empty());
        assert_eq!(attachments.pending_count(), 1);
    }

    #[test]
    fn test_composite_runs_in_order() {
        let attachments = Arc::new(ResultAttachments::new());
        attachments.attach(OperationId(1), "tests", json!("original"));

        let composite = CompositeResultPostProcessor::new()
            .with(attachments)
            .with(Arc::new(Overwrite));

        let processed = composite.process(result(), OperationId(1));
        assert_eq!(processed.attachments["tests"], json!("overwritten"));
    }
}
