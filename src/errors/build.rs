// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors that abort a simulated build.
///
/// A unit failing is not one of them: failures are part of the build's
/// outcome and travel through the listener as faults.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Build plan contains a dependency cycle among: {}", .0.join(", "))]
    CyclicPlan(Vec<String>),

    #[error("Unit '{0}' is not part of the build plan")]
    UnknownUnit(String),

    #[error("Failed to acquire an execution slot: {0}")]
    Scheduling(#[from] tokio::sync::AcquireError),

    #[error("Unit worker terminated abnormally: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Fault raised by a simulated unit or transform that is configured to fail.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct SimulatedFailure {
    /// Id of the unit or transform that failed
    pub operation: String,
    pub message: String,
}
