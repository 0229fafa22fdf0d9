// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolves a unit's upstream execution dependencies into operation ids.
//!
//! Only dependencies the client has already been told about make it into the
//! set. A dependency without a cached descriptor was either not observed yet or
//! belongs to an operation kind the client did not subscribe to; it is dropped
//! rather than reported, so unsubscribed work never leaks in as a phantom
//! dependency.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::events::TaskDescriptor;
use crate::forwarding::cache::DescriptorCache;
use crate::observability::messages::forwarding::DependencyDropped;
use crate::observability::messages::StructuredLog;
use crate::operations::{OperationId, WorkUnitIdentity};
use crate::traits::{ExecutionGraphTracker, TransformOperationTracker};

pub struct DependencySetComputer {
    graph: Arc<dyn ExecutionGraphTracker>,
    transforms: Option<Arc<dyn TransformOperationTracker>>,
}

impl DependencySetComputer {
    /// `transforms` is `None` when transformation steps are not being forwarded.
    pub fn new(
        graph: Arc<dyn ExecutionGraphTracker>,
        transforms: Option<Arc<dyn TransformOperationTracker>>,
    ) -> Self {
        Self { graph, transforms }
    }

    pub fn compute(
        &self,
        identity: &WorkUnitIdentity,
        cache: &DescriptorCache<WorkUnitIdentity, TaskDescriptor>,
    ) -> BTreeSet<OperationId> {
        let declared = self.graph.execution_dependencies(identity);
        let mut result = BTreeSet::new();

        for dependency in &declared.tasks {
            match cache.get(dependency) {
                Some(descriptor) => {
                    result.insert(descriptor.id);
                }
                None => DependencyDropped {
                    unit: &identity.path,
                    dependency,
                }
                .log(),
            }
        }

        if let Some(tracker) = &self.transforms {
            for transform in &declared.transforms {
                match tracker.find_operation_id(transform) {
                    Some(id) => {
                        result.insert(id);
                    }
                    None => DependencyDropped {
                        unit: &identity.path,
                        dependency: transform,
                    }
                    .log(),
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::TransformIdentity;
    use crate::tracking::StaticExecutionGraph;
    use std::collections::HashMap;

    struct FixedTransforms(HashMap<TransformIdentity, OperationId>);

    impl TransformOperationTracker for FixedTransforms {
        fn find_operation_id(&self, identity: &TransformIdentity) -> Option<OperationId> {
            self.0.get(identity).copied()
        }
    }

    fn descriptor(id: u64, path: &str) -> TaskDescriptor {
        TaskDescriptor {
            id: OperationId(id),
            identity_path: path.to_string(),
            task_path: path.to_string(),
            display_name: format!("Task {path}"),
            parent_id: None,
            dependencies: BTreeSet::new(),
            origin_plugin: None,
        }
    }

    #[test]
    fn test_uncached_dependencies_are_dropped() {
        let a = WorkUnitIdentity::new(1, ":a");
        let b = WorkUnitIdentity::new(2, ":b");
        let c = WorkUnitIdentity::new(3, ":c");

        let graph = StaticExecutionGraph::new();
        graph.add_task_dependency(&c, a.clone());
        graph.add_task_dependency(&c, b.clone());

        let cache = DescriptorCache::new();
        cache.get_or_create(a.clone(), || descriptor(10, ":a"));

        let computer = DependencySetComputer::new(Arc::new(graph), None);
        let deps = computer.compute(&c, &cache);

        assert_eq!(deps, BTreeSet::from([OperationId(10)]));
    }

    #[test]
    fn test_transforms_merged_only_with_tracker() {
        let unit = WorkUnitIdentity::new(1, ":app:compileJava");
        let graph = Arc::new(StaticExecutionGraph::new());
        graph.add_transform_dependency(&unit, TransformIdentity(1));
        graph.add_transform_dependency(&unit, TransformIdentity(2));

        let cache = DescriptorCache::new();

        let without = DependencySetComputer::new(graph.clone(), None);
        assert!(without.compute(&unit, &cache).is_empty());

        let tracker = FixedTransforms(HashMap::from([(TransformIdentity(1), OperationId(77))]));
        let with = DependencySetComputer::new(graph, Some(Arc::new(tracker)));
        assert_eq!(with.compute(&unit, &cache), BTreeSet::from([OperationId(77)]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let a = WorkUnitIdentity::new(1, ":a");
        let b = WorkUnitIdentity::new(2, ":b");
        let graph = StaticExecutionGraph::new();
        graph.add_task_dependency(&b, a.clone());
        graph.add_task_dependency(&b, a.clone());

        let cache = DescriptorCache::new();
        cache.get_or_create(a, || descriptor(3, ":a"));

        let computer = DependencySetComputer::new(Arc::new(graph), None);
        assert_eq!(computer.compute(&b, &cache).len(), 1);
    }

    #[test]
    fn test_unknown_unit_has_no_dependencies() {
        let computer = DependencySetComputer::new(Arc::new(StaticExecutionGraph::new()), None);
        let cache = DescriptorCache::new();
        assert!(computer
            .compute(&WorkUnitIdentity::new(9, ":unknown"), &cache)
            .is_empty());
    }
}
