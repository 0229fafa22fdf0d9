// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Simulated build engine.
//!
//! Turns a validated build definition into a [`BuildPlan`] and runs it through
//! any [`OperationListener`](crate::traits::OperationListener), producing the
//! same start and finish notifications a real build would.

pub mod plan;
pub mod simulated;
#[cfg(test)]
mod integration_tests;

pub use plan::{BuildPlan, PlannedTransform, PlannedUnit};
pub use simulated::{BuildSummary, SimulatedBuildExecutor};
