// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::events::{FinishedEvent, OperationCategory, StartedEvent};
use crate::operations::{BuildOperation, FinishNotification, OperationDetails, StartNotification};

/// Per operation kind translation from raw notifications to client events.
///
/// A [`ForwardingListener`](crate::forwarding::ForwardingListener) is generic
/// over its strategy; each operation kind supplies one strategy value. The
/// listener only calls the translate methods for notifications whose details
/// payload [`details`](TranslationStrategy::details) accepted.
pub trait TranslationStrategy: Send + Sync {
    /// The details payload shape this strategy translates.
    type Details;

    /// Subscription category gating this strategy.
    fn category(&self) -> OperationCategory;

    /// Narrows the raw payload to the expected shape, `None` if it is another kind.
    fn details<'a>(&self, details: &'a OperationDetails) -> Option<&'a Self::Details>;

    fn translate_start(
        &self,
        operation: &BuildOperation,
        start: &StartNotification,
        details: &Self::Details,
    ) -> StartedEvent;

    fn translate_finish(
        &self,
        operation: &BuildOperation,
        finish: &FinishNotification,
        details: &Self::Details,
    ) -> FinishedEvent;
}

/// Shared strategies, e.g. one that also serves as a lookup for another translator.
impl<S: TranslationStrategy + ?Sized> TranslationStrategy for Arc<S> {
    type Details = S::Details;

    fn category(&self) -> OperationCategory {
        (**self).category()
    }

    fn details<'a>(&self, details: &'a OperationDetails) -> Option<&'a Self::Details> {
        (**self).details(details)
    }

    fn translate_start(
        &self,
        operation: &BuildOperation,
        start: &StartNotification,
        details: &Self::Details,
    ) -> StartedEvent {
        (**self).translate_start(operation, start, details)
    }

    fn translate_finish(
        &self,
        operation: &BuildOperation,
        finish: &FinishNotification,
        details: &Self::Details,
    ) -> FinishedEvent {
        (**self).translate_finish(operation, finish, details)
    }
}
