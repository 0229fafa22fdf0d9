// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Client facing progress events.
//!
//! These are the immutable values the forwarding pipeline publishes to a
//! [`ProgressSink`](crate::traits::ProgressSink). Descriptors are shared as
//! `Arc`s: a task descriptor created when the task starts is the very same
//! value carried by its finish event and referenced (by id) from the
//! dependency sets of later tasks.

mod descriptor;
mod progress;
mod result;

pub use descriptor::{Descriptor, TaskDescriptor, TransformDescriptor};
pub use progress::{FinishedEvent, OperationCategory, ProgressEvent, StartedEvent};
pub use result::{
    FailureInfo, OperationResult, TaskOutcome, TaskResult, TransformOutcome, TransformResult,
    SUCCESS_STATUS,
};
