// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use dashmap::DashMap;

use crate::operations::{TransformIdentity, WorkUnitIdentity};
use crate::traits::{ExecutionDependencies, ExecutionGraphTracker};

/// Execution graph declared up front, before any unit runs.
#[derive(Debug, Default)]
pub struct StaticExecutionGraph {
    dependencies: DashMap<WorkUnitIdentity, ExecutionDependencies>,
}

impl StaticExecutionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task_dependency(&self, unit: &WorkUnitIdentity, dependency: WorkUnitIdentity) {
        self.dependencies
            .entry(unit.clone())
            .or_default()
            .tasks
            .push(dependency);
    }

    pub fn add_transform_dependency(&self, unit: &WorkUnitIdentity, dependency: TransformIdentity) {
        self.dependencies
            .entry(unit.clone())
            .or_default()
            .transforms
            .push(dependency);
    }
}

impl ExecutionGraphTracker for StaticExecutionGraph {
    fn execution_dependencies(&self, unit: &WorkUnitIdentity) -> ExecutionDependencies {
        self.dependencies
            .get(unit)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}
