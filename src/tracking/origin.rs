// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use dashmap::DashMap;

use crate::operations::{PluginId, WorkUnitIdentity};
use crate::traits::OriginPluginLookup;

/// Which plugin registered each work unit. Units without an entry were
/// registered by the build script itself.
#[derive(Debug, Default)]
pub struct TaskOriginTable {
    origins: DashMap<WorkUnitIdentity, PluginId>,
}

impl TaskOriginTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, identity: WorkUnitIdentity, plugin: PluginId) {
        self.origins.insert(identity, plugin);
    }
}

impl OriginPluginLookup for TaskOriginTable {
    fn origin_plugin(&self, identity: &WorkUnitIdentity) -> Option<PluginId> {
        self.origins.get(identity).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let table = TaskOriginTable::new();
        let compile = WorkUnitIdentity::new(1, ":compileJava");
        table.record(compile.clone(), PluginId::new("java").unwrap());

        assert_eq!(table.origin_plugin(&compile).map(|p| p.to_string()), Some("java".to_string()));
        assert!(table.origin_plugin(&WorkUnitIdentity::new(2, ":custom")).is_none());
    }
}
