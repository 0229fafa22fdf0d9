// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine-assigned correlation id for one operation occurrence.
///
/// Links the start and finish notifications of an operation and is the id
/// clients see on every event. Ordered so dependency sets iterate
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationId(pub u64);

impl OperationId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable identity of one logical unit of work within a build.
///
/// Used as the descriptor cache key. The engine never reuses a `unique_id`
/// within a build; the path is carried for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkUnitIdentity {
    pub unique_id: u64,
    pub path: String,
}

impl WorkUnitIdentity {
    pub fn new(unique_id: u64, path: impl Into<String>) -> Self {
        Self {
            unique_id,
            path: path.into(),
        }
    }
}

impl fmt::Display for WorkUnitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.unique_id)
    }
}

/// Identity of a scheduled transformation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransformIdentity(pub u64);

impl fmt::Display for TransformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transform-{}", self.0)
    }
}

/// Id of the plugin that registered a unit of work, e.g. `java` or `org.example.docs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct PluginId(String);

impl PluginId {
    /// Creates a plugin id, returning `None` for an empty value.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PluginId {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("plugin id must not be empty")
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_ids_order_numerically() {
        let mut ids = vec![OperationId(12), OperationId(3), OperationId(7)];
        ids.sort();
        assert_eq!(ids, vec![OperationId(3), OperationId(7), OperationId(12)]);
    }

    #[test]
    fn test_plugin_id_rejects_empty() {
        assert!(PluginId::new("").is_none());
        assert_eq!(PluginId::new("java").unwrap().as_str(), "java");
    }

    #[test]
    fn test_plugin_id_deserialization_rejects_empty() {
        let java: PluginId = serde_json::from_str("\"java\"").unwrap();
        assert_eq!(java.as_str(), "java");

        let error = serde_json::from_str::<PluginId>("\"\"").unwrap_err();
        assert!(error.to_string().contains("plugin id must not be empty"));
    }

    #[test]
    fn test_identity_equality_uses_unique_id_and_path() {
        let a = WorkUnitIdentity::new(1, ":app:compileJava");
        let b = WorkUnitIdentity::new(1, ":app:compileJava");
        let c = WorkUnitIdentity::new(2, ":app:compileJava");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
