// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex};

use crate::events::ProgressEvent;
use crate::traits::ProgressSink;

/// In-memory, ordered record of every published event.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<ProgressEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events published so far, in publication order.
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressSink for EventLog {
    fn publish(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

/// Publishes every event to each of its sinks, in registration order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn ProgressSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl ProgressSink for FanoutSink {
    fn publish(&self, event: ProgressEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.publish(event.clone());
            }
            last.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Descriptor, StartedEvent, TransformDescriptor};
    use crate::operations::OperationId;
    use tokio::sync::broadcast;

    fn started(id: u64) -> ProgressEvent {
        ProgressEvent::Started(StartedEvent {
            id: OperationId(id),
            descriptor: Descriptor::Transform(Arc::new(TransformDescriptor {
                id: OperationId(id),
                display_name: "Unzip lib.jar".to_string(),
                parent_id: None,
                transformer_name: "Unzip".to_string(),
                subject_name: "lib.jar".to_string(),
            })),
            timestamp: 0,
        })
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let first = Arc::new(EventLog::new());
        let second = Arc::new(EventLog::new());
        let (tx, mut rx) = broadcast::channel(8);

        let fanout = FanoutSink::new()
            .with(first.clone())
            .with(second.clone())
            .with(Arc::new(tx));
        fanout.publish(started(1));
        fanout.publish(started(2));

        assert_eq!(first.len(), 2);
        assert_eq!(second.events()[1].id(), OperationId(2));
        assert_eq!(rx.try_recv().map(|e| e.id()), Ok(OperationId(1)));
    }

    #[test]
    fn test_empty_fanout_drops_events() {
        FanoutSink::new().publish(started(1));
        assert!(EventLog::new().is_empty());
    }
}
