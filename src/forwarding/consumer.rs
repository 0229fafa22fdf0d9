// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shared downstream consumer of translated events.
//!
//! Every translator in a chain publishes through one consumer, so the consumer
//! is the single place that knows which operations the client has seen start.
//! That knowledge answers the parent id question for every translator.

use dashmap::DashSet;
use std::sync::Arc;

use crate::events::{FinishedEvent, ProgressEvent, StartedEvent};
use crate::operations::{BuildOperation, OperationId};
use crate::tracking::AncestryTracker;
use crate::traits::{ParentIdResolver, ProgressSink};

pub struct ProgressEventConsumer {
    sink: Arc<dyn ProgressSink>,
    ancestry: Arc<AncestryTracker>,
    running: DashSet<OperationId>,
}

impl ProgressEventConsumer {
    pub fn new(sink: Arc<dyn ProgressSink>, ancestry: Arc<AncestryTracker>) -> Self {
        Self {
            sink,
            ancestry,
            running: DashSet::new(),
        }
    }

    pub fn started(&self, event: StartedEvent) {
        // Mark before publishing so a child started from the client's reaction
        // already resolves this operation as its parent.
        self.running.insert(event.id);
        self.sink.publish(ProgressEvent::Started(event));
    }

    pub fn finished(&self, event: FinishedEvent) {
        let id = event.id;
        self.sink.publish(ProgressEvent::Finished(event));
        self.running.remove(&id);
    }

    /// The client has received a start event for `id` and no finish yet.
    pub fn is_running(&self, id: OperationId) -> bool {
        self.running.contains(&id)
    }
}

impl ParentIdResolver for ProgressEventConsumer {
    fn find_started_parent_id(&self, operation: &BuildOperation) -> Option<OperationId> {
        let parent = operation.parent_id?;
        self.ancestry
            .find_closest_matching_ancestor(parent, |id| self.running.contains(&id))
    }
}
