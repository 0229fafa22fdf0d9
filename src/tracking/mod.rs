// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine-side bookkeeping the forwarding pipeline queries.
//!
//! * [`AncestryTracker`] - parent links of every running operation
//! * [`StaticExecutionGraph`] - declared upstream dependencies of work units
//! * [`TaskOriginTable`] - plugin that registered each work unit
//! * [`ResultAttachments`] - values attached to task results before forwarding

pub mod ancestry;
pub mod attachments;
pub mod graph;
pub mod origin;

pub use ancestry::{AncestryTracker, AncestryTrackingListener};
pub use attachments::{CompositeResultPostProcessor, ResultAttachments};
pub use graph::StaticExecutionGraph;
pub use origin::TaskOriginTable;
