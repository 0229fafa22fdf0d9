// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Assembly of the listener chain attached to one build.
//!
//! ```text
//! engine ──▶ ancestry tracking ──▶ tasks ──▶ transforms ──▶ delegate
//!                                    │            │
//!                                    └──── consumer ────▶ sink
//! ```
//!
//! The transform translator is only part of the chain when the client
//! subscribed to transforms. It doubles as the lookup that resolves transform
//! dependencies of tasks.

use std::sync::Arc;

use crate::events::OperationCategory;
use crate::forwarding::consumer::ProgressEventConsumer;
use crate::forwarding::emitter::ForwardingListener;
use crate::forwarding::filter::Subscription;
use crate::forwarding::task::TaskTranslation;
use crate::forwarding::transform::TransformTranslation;
use crate::observability::messages::forwarding::ForwardingChainBuilt;
use crate::observability::messages::StructuredLog;
use crate::operations::{BuildOperation, FinishNotification, StartNotification};
use crate::tracking::{AncestryTracker, AncestryTrackingListener, StaticExecutionGraph, TaskOriginTable};
use crate::traits::{
    ExecutionGraphTracker, NoopListener, OperationListener, OperationResultPostProcessor,
    OriginPluginLookup, ProgressSink, TransformOperationTracker,
};

/// The assembled chain. Attach it to the engine as its operation listener.
pub struct ForwardingChain {
    head: Arc<dyn OperationListener>,
    consumer: Arc<ProgressEventConsumer>,
}

impl ForwardingChain {
    pub fn builder(subscription: Subscription, sink: Arc<dyn ProgressSink>) -> ForwardingChainBuilder {
        ForwardingChainBuilder {
            subscription,
            sink,
            graph: Arc::new(StaticExecutionGraph::new()),
            origins: Arc::new(TaskOriginTable::new()),
            post_processor: None,
            delegate: Arc::new(NoopListener),
        }
    }

    pub fn consumer(&self) -> &Arc<ProgressEventConsumer> {
        &self.consumer
    }
}

impl OperationListener for ForwardingChain {
    fn started(&self, operation: &BuildOperation, start: &StartNotification) {
        self.head.started(operation, start);
    }

    fn finished(&self, operation: &BuildOperation, finish: &FinishNotification) {
        self.head.finished(operation, finish);
    }
}

pub struct ForwardingChainBuilder {
    subscription: Subscription,
    sink: Arc<dyn ProgressSink>,
    graph: Arc<dyn ExecutionGraphTracker>,
    origins: Arc<dyn OriginPluginLookup>,
    post_processor: Option<Arc<dyn OperationResultPostProcessor>>,
    delegate: Arc<dyn OperationListener>,
}

impl ForwardingChainBuilder {
    pub fn execution_graph(mut self, graph: Arc<dyn ExecutionGraphTracker>) -> Self {
        self.graph = graph;
        self
    }

    pub fn origin_plugins(mut self, origins: Arc<dyn OriginPluginLookup>) -> Self {
        self.origins = origins;
        self
    }

    pub fn post_processor(mut self, post_processor: Arc<dyn OperationResultPostProcessor>) -> Self {
        self.post_processor = Some(post_processor);
        self
    }

    /// Receives every notification no translator claimed.
    pub fn delegate(mut self, delegate: Arc<dyn OperationListener>) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn build(self) -> ForwardingChain {
        let ancestry = Arc::new(AncestryTracker::new());
        let consumer = Arc::new(ProgressEventConsumer::new(self.sink, ancestry.clone()));
        let subscription = Arc::new(self.subscription);

        let mut tail = self.delegate;
        let mut transforms: Option<Arc<dyn TransformOperationTracker>> = None;

        if subscription.is_requested(OperationCategory::Transform) {
            let translation = Arc::new(TransformTranslation::new(consumer.clone()));
            transforms = Some(translation.clone() as Arc<dyn TransformOperationTracker>);
            tail = Arc::new(ForwardingListener::new(
                translation,
                subscription.clone(),
                consumer.clone(),
                tail,
            ));
        }

        let tasks = TaskTranslation::new(
            consumer.clone(),
            self.graph,
            self.origins,
            transforms,
            self.post_processor,
        );
        let tasks = Arc::new(ForwardingListener::new(
            tasks,
            subscription.clone(),
            consumer.clone(),
            tail,
        ));

        let categories: Vec<String> = subscription.categories().map(|c| c.to_string()).collect();
        ForwardingChainBuilt {
            categories: &categories.join(","),
        }
        .log();

        ForwardingChain {
            head: Arc::new(AncestryTrackingListener::new(ancestry, tasks)),
            consumer,
        }
    }
}
