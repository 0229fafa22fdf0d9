// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Client subscriptions and the gate deciding what a translator forwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::events::OperationCategory;
use crate::forwarding::strategy::TranslationStrategy;
use crate::operations::BuildOperation;

/// Event categories the client asked for before the build started.
///
/// # Example
/// ```
/// use progress_forwarder::events::OperationCategory;
/// use progress_forwarder::forwarding::Subscription;
///
/// let subscription = Subscription::new([OperationCategory::Task]);
/// assert!(subscription.is_requested(OperationCategory::Task));
/// assert!(!subscription.is_requested(OperationCategory::Transform));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subscription {
    categories: BTreeSet<OperationCategory>,
}

impl Subscription {
    pub fn new(categories: impl IntoIterator<Item = OperationCategory>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
        }
    }

    /// Every category this crate can forward.
    pub fn all() -> Self {
        Self::new([OperationCategory::Task, OperationCategory::Transform])
    }

    pub fn is_requested(&self, category: OperationCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn is_any_requested(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = OperationCategory> + '_ {
        self.categories.iter().copied()
    }
}

/// Gate for one translator instance.
///
/// A notification is interesting iff the client subscribed to this filter's
/// category and the operation's details payload has the translator's expected
/// shape. The filter holds no state beyond the immutable subscription.
#[derive(Debug, Clone)]
pub struct SubscriptionFilter {
    subscription: Arc<Subscription>,
    category: OperationCategory,
}

impl SubscriptionFilter {
    pub fn new(subscription: Arc<Subscription>, category: OperationCategory) -> Self {
        Self {
            subscription,
            category,
        }
    }

    pub fn category(&self) -> OperationCategory {
        self.category
    }

    pub fn is_enabled(&self) -> bool {
        self.subscription.is_requested(self.category)
    }

    /// Returns the typed details when `strategy` should translate `operation`.
    pub fn accept<'a, S>(&self, strategy: &S, operation: &'a BuildOperation) -> Option<&'a S::Details>
    where
        S: TranslationStrategy + ?Sized,
    {
        if !self.is_enabled() {
            return None;
        }
        operation
            .details
            .as_ref()
            .and_then(|details| strategy.details(details))
    }
}
