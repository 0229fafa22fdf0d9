// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod build;
mod config;
mod report;

pub use build::{BuildError, SimulatedFailure};
pub use config::{ConfigError, ValidationError};
pub use report::ReportError;
