// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Translation of task execution operations.

use std::sync::Arc;

use crate::events::{
    Descriptor, FinishedEvent, OperationCategory, OperationResult, StartedEvent, TaskDescriptor,
};
use crate::forwarding::cache::DescriptorCache;
use crate::forwarding::dependencies::DependencySetComputer;
use crate::forwarding::outcome::classify_task_result;
use crate::forwarding::strategy::TranslationStrategy;
use crate::observability::messages::forwarding::DescriptorCreated;
use crate::observability::messages::StructuredLog;
use crate::operations::{
    BuildOperation, ExecuteTaskDetails, FinishNotification, OperationDetails, StartNotification,
    WorkUnitIdentity,
};
use crate::traits::{
    ExecutionGraphTracker, OperationResultPostProcessor, OriginPluginLookup, ParentIdResolver,
    TransformOperationTracker,
};

/// Builds task descriptors on first observation and classifies finished tasks.
///
/// Descriptors are keyed by [`WorkUnitIdentity`], so every event for a task
/// carries the same descriptor instance. The dependency set is resolved while
/// the descriptor is built, which happens at the task's start.
pub struct TaskTranslation {
    descriptors: DescriptorCache<WorkUnitIdentity, TaskDescriptor>,
    parents: Arc<dyn ParentIdResolver>,
    origins: Arc<dyn OriginPluginLookup>,
    dependencies: DependencySetComputer,
    post_processor: Option<Arc<dyn OperationResultPostProcessor>>,
}

impl TaskTranslation {
    /// `transforms` is `None` when transformation steps are not forwarded.
    pub fn new(
        parents: Arc<dyn ParentIdResolver>,
        graph: Arc<dyn ExecutionGraphTracker>,
        origins: Arc<dyn OriginPluginLookup>,
        transforms: Option<Arc<dyn TransformOperationTracker>>,
        post_processor: Option<Arc<dyn OperationResultPostProcessor>>,
    ) -> Self {
        Self {
            descriptors: DescriptorCache::new(),
            parents,
            origins,
            dependencies: DependencySetComputer::new(graph, transforms),
            post_processor,
        }
    }

    /// The descriptor already built for `identity`, if any.
    pub fn descriptor_for(&self, identity: &WorkUnitIdentity) -> Option<Arc<TaskDescriptor>> {
        self.descriptors.get(identity)
    }

    fn descriptor(
        &self,
        operation: &BuildOperation,
        details: &ExecuteTaskDetails,
    ) -> Arc<TaskDescriptor> {
        self.descriptors
            .get_or_create(details.identity.clone(), || {
                let descriptor = TaskDescriptor {
                    id: operation.id,
                    identity_path: operation.name.clone(),
                    task_path: details.task_path.clone(),
                    display_name: operation.display_name.clone(),
                    parent_id: self.parents.find_started_parent_id(operation),
                    dependencies: self.dependencies.compute(&details.identity, &self.descriptors),
                    origin_plugin: self.origins.origin_plugin(&details.identity),
                };
                DescriptorCreated {
                    category: OperationCategory::Task,
                    operation_id: descriptor.id,
                    display_name: &descriptor.display_name,
                    dependency_count: descriptor.dependencies.len(),
                }
                .log();
                descriptor
            })
    }
}

impl TranslationStrategy for TaskTranslation {
    type Details = ExecuteTaskDetails;

    fn category(&self) -> OperationCategory {
        OperationCategory::Task
    }

    fn details<'a>(&self, details: &'a OperationDetails) -> Option<&'a ExecuteTaskDetails> {
        match details {
            OperationDetails::ExecuteTask(details) => Some(details),
            _ => None,
        }
    }

    fn translate_start(
        &self,
        operation: &BuildOperation,
        start: &StartNotification,
        details: &ExecuteTaskDetails,
    ) -> StartedEvent {
        StartedEvent {
            id: operation.id,
            descriptor: Descriptor::Task(self.descriptor(operation, details)),
            timestamp: start.start_time,
        }
    }

    fn translate_finish(
        &self,
        operation: &BuildOperation,
        finish: &FinishNotification,
        details: &ExecuteTaskDetails,
    ) -> FinishedEvent {
        let descriptor = self.descriptor(operation, details);
        let mut result = classify_task_result(&details.state.snapshot(), finish);
        if let Some(post_processor) = &self.post_processor {
            result = post_processor.process(result, operation.id);
        }

        FinishedEvent {
            id: operation.id,
            descriptor: Descriptor::Task(descriptor),
            result: OperationResult::Task(result),
            timestamp: finish.end_time,
        }
    }
}
