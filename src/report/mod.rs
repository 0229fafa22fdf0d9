// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! What a client does with forwarded events: record them, fan them out and
//! summarize a finished build.

pub mod sinks;
pub mod summary;

pub use sinks::{EventLog, FanoutSink};
pub use summary::{describe_event, BuildReport, OperationRow};
