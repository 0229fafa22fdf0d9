use tokio::sync::{broadcast, mpsc};

use crate::events::ProgressEvent;

/// Outbound side of the pipeline: where typed events are delivered.
///
/// `publish` is called on engine worker threads and must never block, so
/// channel backed sinks use unbounded or lossy channels.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}

/// Unbounded channel: every event is queued, the receiver drains at its own pace.
impl ProgressSink for mpsc::UnboundedSender<ProgressEvent> {
    fn publish(&self, event: ProgressEvent) {
        // A closed receiver means the client went away; the build carries on.
        let _ = self.send(event);
    }
}

/// Broadcast channel: slow subscribers lag rather than blocking the build.
impl ProgressSink for broadcast::Sender<ProgressEvent> {
    fn publish(&self, event: ProgressEvent) {
        // Err only when there are no subscribers.
        let _ = self.send(event);
    }
}
