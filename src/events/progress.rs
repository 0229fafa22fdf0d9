// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

use super::descriptor::Descriptor;
use super::result::OperationResult;
use crate::operations::{OperationId, Timestamp};

/// Event categories a client can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationCategory {
    Task,
    Transform,
}

impl fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationCategory::Task => "task",
            OperationCategory::Transform => "transform",
        };
        write!(f, "{s}")
    }
}

/// An operation was started.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedEvent {
    pub id: OperationId,
    pub descriptor: Descriptor,
    pub timestamp: Timestamp,
}

/// An operation finished; `result` is final.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedEvent {
    pub id: OperationId,
    pub descriptor: Descriptor,
    pub result: OperationResult,
    pub timestamp: Timestamp,
}

/// Everything published to a client.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started(StartedEvent),
    Finished(FinishedEvent),
}

impl ProgressEvent {
    pub fn id(&self) -> OperationId {
        match self {
            ProgressEvent::Started(e) => e.id,
            ProgressEvent::Finished(e) => e.id,
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        match self {
            ProgressEvent::Started(e) => &e.descriptor,
            ProgressEvent::Finished(e) => &e.descriptor,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            ProgressEvent::Started(e) => e.timestamp,
            ProgressEvent::Finished(e) => e.timestamp,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, ProgressEvent::Started(_))
    }
}
