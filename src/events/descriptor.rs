// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::operations::{OperationId, PluginId};

/// Client facing description of a task operation.
///
/// Built once per work unit identity and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDescriptor {
    pub id: OperationId,
    /// Stable identity path of the operation.
    pub identity_path: String,
    /// User facing task path.
    pub task_path: String,
    pub display_name: String,
    /// Nearest ancestor the client already received a start event for.
    pub parent_id: Option<OperationId>,
    /// Operation ids of upstream tasks and transforms the client knows about.
    pub dependencies: BTreeSet<OperationId>,
    pub origin_plugin: Option<PluginId>,
}

/// Client facing description of a transformation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformDescriptor {
    pub id: OperationId,
    pub display_name: String,
    pub parent_id: Option<OperationId>,
    pub transformer_name: String,
    pub subject_name: String,
}

/// Descriptor carried by a progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    Task(Arc<TaskDescriptor>),
    Transform(Arc<TransformDescriptor>),
}

impl Descriptor {
    pub fn id(&self) -> OperationId {
        match self {
            Descriptor::Task(d) => d.id,
            Descriptor::Transform(d) => d.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Descriptor::Task(d) => &d.display_name,
            Descriptor::Transform(d) => &d.display_name,
        }
    }

    pub fn parent_id(&self) -> Option<OperationId> {
        match self {
            Descriptor::Task(d) => d.parent_id,
            Descriptor::Transform(d) => d.parent_id,
        }
    }

    /// Upstream operation ids. Transforms carry none.
    pub fn dependencies(&self) -> Option<&BTreeSet<OperationId>> {
        match self {
            Descriptor::Task(d) => Some(&d.dependencies),
            Descriptor::Transform(_) => None,
        }
    }
}
