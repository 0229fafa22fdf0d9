// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the forwarding pipeline.
//!
//! These fire once or more per operation, so they log at `debug` or `trace`.

use crate::events::OperationCategory;
use crate::observability::messages::StructuredLog;
use crate::operations::OperationId;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A declared dependency had no client visible operation and was left out.
///
/// # Log Level
/// `debug!` - Expected when the dependency's kind is not subscribed
///
/// # Example
/// ```
/// use progress_forwarder::observability::messages::forwarding::DependencyDropped;
///
/// let msg = DependencyDropped {
///     unit: ":app:jar",
///     dependency: &":app:compileJava (4)",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Dependency ':app:compileJava (4)' of ':app:jar' has no forwarded operation, omitting it"
/// );
/// ```
pub struct DependencyDropped<'a> {
    pub unit: &'a str,
    /// Rendered only when the message is actually emitted.
    pub dependency: &'a dyn Display,
}

impl Display for DependencyDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dependency '{}' of '{}' has no forwarded operation, omitting it",
            self.dependency, self.unit
        )
    }
}

impl StructuredLog for DependencyDropped<'_> {
    fn log(&self) {
        tracing::debug!(unit = self.unit, dependency = %self.dependency, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dependency_dropped",
            span_name = name,
            unit = self.unit,
            dependency = %self.dependency,
        )
    }
}

/// A descriptor was built on first observation of an identity.
///
/// # Log Level
/// `debug!` - Once per forwarded operation
pub struct DescriptorCreated<'a> {
    pub category: OperationCategory,
    pub operation_id: OperationId,
    pub display_name: &'a str,
    pub dependency_count: usize,
}

impl Display for DescriptorCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created {} descriptor {} for '{}' with {} dependencies",
            self.category, self.operation_id, self.display_name, self.dependency_count
        )
    }
}

impl StructuredLog for DescriptorCreated<'_> {
    fn log(&self) {
        tracing::debug!(
            category = %self.category,
            operation_id = self.operation_id.as_u64(),
            display_name = self.display_name,
            dependency_count = self.dependency_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "descriptor_created",
            span_name = name,
            category = %self.category,
            operation_id = self.operation_id.as_u64(),
        )
    }
}

/// A notification was translated and handed to the consumer.
///
/// # Log Level
/// `trace!` - Hot path
pub struct OperationForwarded<'a> {
    pub category: OperationCategory,
    pub operation_id: OperationId,
    pub phase: &'a str,
    pub display_name: &'a str,
}

impl Display for OperationForwarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Forwarded {} {} of {} '{}'",
            self.phase, self.operation_id, self.category, self.display_name
        )
    }
}

impl StructuredLog for OperationForwarded<'_> {
    fn log(&self) {
        tracing::trace!(
            category = %self.category,
            operation_id = self.operation_id.as_u64(),
            phase = self.phase,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "operation_forwarded",
            span_name = name,
            category = %self.category,
            operation_id = self.operation_id.as_u64(),
            phase = self.phase,
        )
    }
}

/// A translator did not claim a notification and passed it down the chain.
///
/// # Log Level
/// `trace!` - Hot path
pub struct OperationPassedThrough {
    pub category: OperationCategory,
    pub operation_id: OperationId,
}

impl Display for OperationPassedThrough {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} translator passed {} to its delegate",
            self.category, self.operation_id
        )
    }
}

impl StructuredLog for OperationPassedThrough {
    fn log(&self) {
        tracing::trace!(
            category = %self.category,
            operation_id = self.operation_id.as_u64(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "operation_passed_through",
            span_name = name,
            category = %self.category,
            operation_id = self.operation_id.as_u64(),
        )
    }
}

/// A listener chain was assembled for a build.
///
/// # Log Level
/// `debug!` - Once per build
pub struct ForwardingChainBuilt<'a> {
    pub categories: &'a str,
}

impl Display for ForwardingChainBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.categories.is_empty() {
            write!(f, "Built forwarding chain with no subscribed categories")
        } else {
            write!(f, "Built forwarding chain for [{}]", self.categories)
        }
    }
}

impl StructuredLog for ForwardingChainBuilt<'_> {
    fn log(&self) {
        tracing::debug!(categories = self.categories, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "forwarding_chain",
            span_name = name,
            categories = self.categories,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_created_display() {
        let msg = DescriptorCreated {
            category: OperationCategory::Task,
            operation_id: OperationId(12),
            display_name: "Task :jar",
            dependency_count: 2,
        };
        assert_eq!(
            msg.to_string(),
            "Created task descriptor #12 for 'Task :jar' with 2 dependencies"
        );
    }

    #[test]
    fn test_dependency_dropped_renders_identity() {
        let dependency = crate::operations::WorkUnitIdentity::new(4, ":app:compileJava");
        let msg = DependencyDropped {
            unit: ":app:jar",
            dependency: &dependency,
        };
        assert_eq!(
            msg.to_string(),
            format!("Dependency '{dependency}' of ':app:jar' has no forwarded operation, omitting it")
        );
    }

    #[test]
    fn test_chain_built_display() {
        assert_eq!(
            ForwardingChainBuilt { categories: "" }.to_string(),
            "Built forwarding chain with no subscribed categories"
        );
        assert_eq!(
            ForwardingChainBuilt {
                categories: "task,transform"
            }
            .to_string(),
            "Built forwarding chain for [task,transform]"
        );
    }
}
