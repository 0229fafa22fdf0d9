// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::config::BuildConfig;

/// Forward dependency graph of a build: unit id -> ids of units depending on it.
///
/// Every unit has an entry, possibly empty.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph(pub HashMap<String, Vec<String>>);

impl DependencyGraph {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        let mut graph = Self::new();
        for unit in &config.units {
            graph.0.entry(unit.id.clone()).or_default();
            for dependency in &unit.depends_on {
                graph
                    .0
                    .entry(dependency.clone())
                    .or_default()
                    .push(unit.id.clone());
            }
        }
        graph
    }

    pub fn get_dependents(&self, unit_id: &str) -> Option<&Vec<String>> {
        self.0.get(unit_id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inverts the graph: unit id -> ids of the units it depends on.
    pub fn build_reverse_dependencies(&self) -> HashMap<String, Vec<String>> {
        let mut reverse: HashMap<String, Vec<String>> =
            self.0.keys().map(|id| (id.clone(), Vec::new())).collect();
        for (dependency, dependents) in &self.0 {
            for dependent in dependents {
                reverse
                    .entry(dependent.clone())
                    .or_default()
                    .push(dependency.clone());
            }
        }
        reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_dependencies() {
        let config: BuildConfig = serde_yaml::from_str(
            r#"
units:
  - id: a
  - id: b
    depends_on: [a]
  - id: c
    depends_on: [a, b]
"#,
        )
        .unwrap();

        let graph = DependencyGraph::from_config(&config);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get_dependents("a").map(Vec::len), Some(2));

        let reverse = graph.build_reverse_dependencies();
        let mut c_deps = reverse["c"].clone();
        c_deps.sort();
        assert_eq!(c_deps, vec!["a", "b"]);
        assert!(reverse["a"].is_empty());
    }
}
