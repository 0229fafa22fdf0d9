// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // build definitions + validation
pub mod engine;     // simulated build engine
pub mod errors;     // error handling
pub mod events;     // client facing progress events
pub mod forwarding; // operation → event translation
pub mod observability;
pub mod operations; // engine side operation model
pub mod report;     // sinks + build reports
pub mod tracking;   // ancestry, execution graph, origins
pub mod traits;     // unified abstractions
