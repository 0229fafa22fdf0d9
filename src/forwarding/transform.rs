// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Translation of scheduled transformation steps.
//!
//! Besides forwarding transform events, the translator remembers which
//! operation ran each transform, which lets task descriptors list transforms
//! among their dependencies.

use std::sync::Arc;

use crate::events::{
    Descriptor, FailureInfo, FinishedEvent, OperationCategory, OperationResult, StartedEvent,
    TransformDescriptor, TransformOutcome, TransformResult,
};
use crate::forwarding::cache::DescriptorCache;
use crate::forwarding::strategy::TranslationStrategy;
use crate::observability::messages::forwarding::DescriptorCreated;
use crate::observability::messages::StructuredLog;
use crate::operations::{
    BuildOperation, ExecuteTransformDetails, FinishNotification, OperationDetails, OperationId,
    StartNotification, TransformIdentity,
};
use crate::traits::{ParentIdResolver, TransformOperationTracker};

pub struct TransformTranslation {
    descriptors: DescriptorCache<TransformIdentity, TransformDescriptor>,
    parents: Arc<dyn ParentIdResolver>,
}

impl TransformTranslation {
    pub fn new(parents: Arc<dyn ParentIdResolver>) -> Self {
        Self {
            descriptors: DescriptorCache::new(),
            parents,
        }
    }

    fn descriptor(
        &self,
        operation: &BuildOperation,
        details: &ExecuteTransformDetails,
    ) -> Arc<TransformDescriptor> {
        self.descriptors.get_or_create(details.identity, || {
            let descriptor = TransformDescriptor {
                id: operation.id,
                display_name: operation.display_name.clone(),
                parent_id: self.parents.find_started_parent_id(operation),
                transformer_name: details.transformer_name.clone(),
                subject_name: details.subject_name.clone(),
            };
            DescriptorCreated {
                category: OperationCategory::Transform,
                operation_id: descriptor.id,
                display_name: &descriptor.display_name,
                dependency_count: 0,
            }
            .log();
            descriptor
        })
    }
}

impl TransformOperationTracker for TransformTranslation {
    fn find_operation_id(&self, identity: &TransformIdentity) -> Option<OperationId> {
        self.descriptors.get(identity).map(|descriptor| descriptor.id)
    }
}

impl TranslationStrategy for TransformTranslation {
    type Details = ExecuteTransformDetails;

    fn category(&self) -> OperationCategory {
        OperationCategory::Transform
    }

    fn details<'a>(&self, details: &'a OperationDetails) -> Option<&'a ExecuteTransformDetails> {
        match details {
            OperationDetails::ExecuteTransform(details) => Some(details),
            _ => None,
        }
    }

    fn translate_start(
        &self,
        operation: &BuildOperation,
        start: &StartNotification,
        details: &ExecuteTransformDetails,
    ) -> StartedEvent {
        StartedEvent {
            id: operation.id,
            descriptor: Descriptor::Transform(self.descriptor(operation, details)),
            timestamp: start.start_time,
        }
    }

    fn translate_finish(
        &self,
        operation: &BuildOperation,
        finish: &FinishNotification,
        details: &ExecuteTransformDetails,
    ) -> FinishedEvent {
        let outcome = if finish.failures.is_empty() {
            TransformOutcome::Success
        } else {
            TransformOutcome::Failure {
                failures: finish
                    .failures
                    .iter()
                    .map(|fault| FailureInfo::from_error(fault.as_ref()))
                    .collect(),
            }
        };

        FinishedEvent {
            id: operation.id,
            descriptor: Descriptor::Transform(self.descriptor(operation, details)),
            result: OperationResult::Transform(TransformResult {
                start_time: finish.start_time,
                end_time: finish.end_time,
                outcome,
            }),
            timestamp: finish.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Fault;

    struct FixedParent(Option<OperationId>);

    impl ParentIdResolver for FixedParent {
        fn find_started_parent_id(&self, _operation: &BuildOperation) -> Option<OperationId> {
            self.0
        }
    }

    fn transform(id: u64, identity: u64) -> (BuildOperation, ExecuteTransformDetails) {
        let details = ExecuteTransformDetails {
            identity: TransformIdentity(identity),
            transformer_name: "ClasspathUnzip".to_string(),
            subject_name: "guava.jar".to_string(),
        };
        let op = BuildOperation::new(OperationId(id), "transform", "Unzip guava.jar")
            .with_details(OperationDetails::ExecuteTransform(details.clone()));
        (op, details)
    }

    #[test]
    fn test_tracks_operation_id_once_started() {
        let translation = TransformTranslation::new(Arc::new(FixedParent(Some(OperationId(1)))));
        let (op, details) = transform(12, 4);

        assert_eq!(translation.find_operation_id(&TransformIdentity(4)), None);
        let started = translation.translate_start(&op, &StartNotification { start_time: 3 }, &details);

        assert_eq!(translation.find_operation_id(&TransformIdentity(4)), Some(OperationId(12)));
        assert_eq!(started.descriptor.parent_id(), Some(OperationId(1)));
        assert!(started.descriptor.dependencies().is_none());
    }

    #[test]
    fn test_failure_outcome() {
        let translation = TransformTranslation::new(Arc::new(FixedParent(None)));
        let (op, details) = transform(13, 5);
        let finish = FinishNotification {
            start_time: 1,
            end_time: 9,
            result: None,
            failures: vec![Arc::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "corrupt archive",
            )) as Fault],
        };

        let finished = translation.translate_finish(&op, &finish, &details);

        assert!(finished.result.is_failure());
        assert_eq!(finished.result.duration_ms(), 8);
    }
}
