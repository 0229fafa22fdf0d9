// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The listener that turns accepted notifications into client events.

use std::sync::Arc;

use crate::forwarding::consumer::ProgressEventConsumer;
use crate::forwarding::filter::{Subscription, SubscriptionFilter};
use crate::forwarding::strategy::TranslationStrategy;
use crate::observability::messages::forwarding::{OperationForwarded, OperationPassedThrough};
use crate::observability::messages::StructuredLog;
use crate::operations::{BuildOperation, FinishNotification, StartNotification};
use crate::traits::OperationListener;

/// Forwards notifications its strategy accepts and delegates everything else.
///
/// Exactly one of "emit" or "delegate" happens per notification. Listeners
/// are chained through their delegates, so a notification travels down the
/// chain until the translator that owns its kind claims it.
pub struct ForwardingListener<S> {
    filter: SubscriptionFilter,
    strategy: S,
    consumer: Arc<ProgressEventConsumer>,
    delegate: Arc<dyn OperationListener>,
}

impl<S: TranslationStrategy> ForwardingListener<S> {
    pub fn new(
        strategy: S,
        subscription: Arc<Subscription>,
        consumer: Arc<ProgressEventConsumer>,
        delegate: Arc<dyn OperationListener>,
    ) -> Self {
        Self {
            filter: SubscriptionFilter::new(subscription, strategy.category()),
            strategy,
            consumer,
            delegate,
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<S: TranslationStrategy> OperationListener for ForwardingListener<S> {
    fn started(&self, operation: &BuildOperation, start: &StartNotification) {
        match self.filter.accept(&self.strategy, operation) {
            Some(details) => {
                let event = self.strategy.translate_start(operation, start, details);
                OperationForwarded {
                    category: self.filter.category(),
                    operation_id: operation.id,
                    phase: "started",
                    display_name: &operation.display_name,
                }
                .log();
                self.consumer.started(event);
            }
            None => {
                OperationPassedThrough {
                    category: self.filter.category(),
                    operation_id: operation.id,
                }
                .log();
                self.delegate.started(operation, start);
            }
        }
    }

    fn finished(&self, operation: &BuildOperation, finish: &FinishNotification) {
        match self.filter.accept(&self.strategy, operation) {
            Some(details) => {
                let event = self.strategy.translate_finish(operation, finish, details);
                OperationForwarded {
                    category: self.filter.category(),
                    operation_id: operation.id,
                    phase: "finished",
                    display_name: &operation.display_name,
                }
                .log();
                self.consumer.finished(event);
            }
            None => {
                OperationPassedThrough {
                    category: self.filter.category(),
                    operation_id: operation.id,
                }
                .log();
                self.delegate.finished(operation, finish);
            }
        }
    }
}
