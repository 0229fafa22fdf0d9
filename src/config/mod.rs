// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod dependency_graph;
mod loader;
mod validation;

pub mod consts;

pub use dependency_graph::DependencyGraph;
pub use loader::{
    load_and_validate_config, load_config, BuildConfig, ExecutorOptions, ReportOptions,
    TransformConfig, UnitConfig, UnitKind, UnitOutcome,
};
pub use validation::validate_dependency_graph;
