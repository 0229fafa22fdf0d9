// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Raw operation model as emitted by the orchestration engine.
//!
//! Everything in this module describes what the engine hands to an
//! [`OperationListener`](crate::traits::OperationListener): the operation
//! metadata, its category-specific details payload, and the start/finish
//! notifications. None of these types are client facing; the forwarding
//! pipeline translates them into [`crate::events`].

mod identity;
mod notification;

pub use identity::{OperationId, PluginId, TransformIdentity, WorkUnitIdentity};
pub use notification::{
    BuildOperation, ExecuteTaskDetails, ExecuteTaskResult, ExecuteTransformDetails, Fault,
    FinishNotification, OperationDetails, ResultPayload, StartNotification, TaskState,
    TaskStateHandle, Timestamp,
};
