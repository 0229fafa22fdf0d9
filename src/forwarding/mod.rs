// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Forwarding of operation lifecycle notifications to subscribed clients.
//!
//! The engine emits a start and a finish notification for every operation it
//! runs. This module translates the ones a client asked for into
//! [`ProgressEvent`](crate::events::ProgressEvent)s and passes the rest on
//! untouched.
//!
//! # Components
//!
//! * [`DescriptorCache`] - one descriptor per work unit, built on first observation
//! * [`DependencySetComputer`] - upstream dependencies as client visible operation ids
//! * [`classify_task_result`] - final outcome of a finished task
//! * [`SubscriptionFilter`] - decides whether a translator handles a notification
//! * [`ForwardingListener`] - emits translated events or delegates
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use progress_forwarder::events::ProgressEvent;
//! use progress_forwarder::forwarding::{ForwardingChain, Subscription};
//! use progress_forwarder::operations::*;
//! use progress_forwarder::traits::OperationListener;
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let chain = ForwardingChain::builder(Subscription::all(), Arc::new(tx)).build();
//!
//! let details = ExecuteTaskDetails {
//!     identity: WorkUnitIdentity::new(1, ":compileJava"),
//!     task_path: ":compileJava".to_string(),
//!     state: TaskStateHandle::default(),
//! };
//! let op = BuildOperation::new(OperationId(2), ":compileJava", "Task :compileJava")
//!     .with_details(OperationDetails::ExecuteTask(details));
//!
//! chain.started(&op, &StartNotification { start_time: 10 });
//! chain.finished(&op, &FinishNotification::default());
//!
//! assert!(matches!(rx.try_recv(), Ok(ProgressEvent::Started(_))));
//! assert!(matches!(rx.try_recv(), Ok(ProgressEvent::Finished(_))));
//! ```

pub mod cache;
pub mod chain;
pub mod consumer;
pub mod dependencies;
pub mod emitter;
pub mod filter;
pub mod outcome;
pub mod strategy;
pub mod task;
pub mod transform;


pub use cache::DescriptorCache;
pub use chain::{ForwardingChain, ForwardingChainBuilder};
pub use consumer::ProgressEventConsumer;
pub use dependencies::DependencySetComputer;
pub use emitter::ForwardingListener;
pub use filter::{Subscription, SubscriptionFilter};
pub use outcome::classify_task_result;
pub use strategy::TranslationStrategy;
pub use task::TaskTranslation;
pub use transform::TransformTranslation;
