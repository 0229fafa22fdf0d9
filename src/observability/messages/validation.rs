// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for build definition validation errors.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic dependency detected between units.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use progress_forwarder::observability::messages::validation::CyclicDependencyDetected;
///
/// let cycle = vec!["compile", "generate", "compile"];
/// let msg = CyclicDependencyDetected {
///     cycle: &cycle,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicDependencyDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic dependency detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicDependencyDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}

/// A unit references a unit or transform that is not defined.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use progress_forwarder::observability::messages::validation::UnresolvedReference;
///
/// let msg = UnresolvedReference {
///     unit_id: "jar",
///     reference: "compile",
///     kind: "unit",
/// };
///
/// assert_eq!(msg.to_string(), "Unit 'jar' references unit 'compile' which does not exist");
/// ```
pub struct UnresolvedReference<'a> {
    pub unit_id: &'a str,
    pub reference: &'a str,
    /// `unit` or `transform`
    pub kind: &'a str,
}

impl Display for UnresolvedReference<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unit '{}' references {} '{}' which does not exist",
            self.unit_id, self.kind, self.reference
        )
    }
}

impl StructuredLog for UnresolvedReference<'_> {
    fn log(&self) {
        tracing::error!(
            unit_id = self.unit_id,
            reference = self.reference,
            kind = self.kind,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "unresolved_reference",
            span_name = name,
            unit_id = self.unit_id,
            reference = self.reference,
        )
    }
}

/// An id is defined more than once.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateId<'a> {
    pub id: &'a str,
}

impl Display for DuplicateId<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate id: '{}'", self.id)
    }
}

impl StructuredLog for DuplicateId<'_> {
    fn log(&self) {
        tracing::error!(id = self.id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("duplicate_id", span_name = name, id = self.id)
    }
}
