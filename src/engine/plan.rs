// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A validated build definition, resolved into identities and lookup tables.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::config::{
    validate_dependency_graph, BuildConfig, DependencyGraph, ExecutorOptions, TransformConfig,
    UnitConfig,
};
use crate::errors::{BuildError, ConfigError};
use crate::observability::messages::engine::LevelComputationCompleted;
use crate::observability::messages::StructuredLog;
use crate::operations::{PluginId, TransformIdentity, WorkUnitIdentity};
use crate::tracking::{StaticExecutionGraph, TaskOriginTable};

#[derive(Debug, Clone)]
pub struct PlannedUnit {
    pub config: UnitConfig,
    pub identity: WorkUnitIdentity,
}

#[derive(Debug, Clone)]
pub struct PlannedTransform {
    pub config: TransformConfig,
    pub identity: TransformIdentity,
}

/// Everything the executor and the forwarding chain need to know about a build.
///
/// The execution graph and origin table are shared with the forwarding chain,
/// which queries them while the build runs.
#[derive(Debug)]
pub struct BuildPlan {
    units: Vec<PlannedUnit>,
    transforms: Vec<PlannedTransform>,
    unit_index: HashMap<String, usize>,
    transform_index: HashMap<String, usize>,
    graph: DependencyGraph,
    execution_graph: Arc<StaticExecutionGraph>,
    origins: Arc<TaskOriginTable>,
    options: ExecutorOptions,
}

impl BuildPlan {
    /// Validates `config` and resolves it into a plan.
    ///
    /// Units and transforms get identities numbered from 1 in definition order.
    pub fn from_config(config: &BuildConfig) -> Result<Self, ConfigError> {
        validate_dependency_graph(config).map_err(ConfigError::Invalid)?;

        let units: Vec<PlannedUnit> = config
            .units
            .iter()
            .enumerate()
            .map(|(i, unit)| PlannedUnit {
                identity: WorkUnitIdentity::new(i as u64 + 1, unit.task_path()),
                config: unit.clone(),
            })
            .collect();
        let transforms: Vec<PlannedTransform> = config
            .transforms
            .iter()
            .enumerate()
            .map(|(i, transform)| PlannedTransform {
                identity: TransformIdentity(i as u64 + 1),
                config: transform.clone(),
            })
            .collect();

        let unit_index: HashMap<String, usize> = units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.config.id.clone(), i))
            .collect();
        let transform_index: HashMap<String, usize> = transforms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.config.id.clone(), i))
            .collect();

        let execution_graph = StaticExecutionGraph::new();
        let origins = TaskOriginTable::new();
        for unit in &units {
            for dependency in &unit.config.depends_on {
                if let Some(&i) = unit_index.get(dependency) {
                    execution_graph.add_task_dependency(&unit.identity, units[i].identity.clone());
                }
            }
            for transform in &unit.config.transforms {
                if let Some(&i) = transform_index.get(transform) {
                    execution_graph.add_transform_dependency(&unit.identity, transforms[i].identity);
                }
            }
            if let Some(plugin) = unit.config.plugin.as_deref().and_then(PluginId::new) {
                origins.record(unit.identity.clone(), plugin);
            }
        }

        Ok(Self {
            graph: DependencyGraph::from_config(config),
            units,
            transforms,
            unit_index,
            transform_index,
            execution_graph: Arc::new(execution_graph),
            origins: Arc::new(origins),
            options: config.executor_options.clone(),
        })
    }

    pub fn units(&self) -> &[PlannedUnit] {
        &self.units
    }

    pub fn transforms(&self) -> &[PlannedTransform] {
        &self.transforms
    }

    pub fn unit(&self, id: &str) -> Option<&PlannedUnit> {
        self.unit_index.get(id).map(|&i| &self.units[i])
    }

    pub fn transform(&self, id: &str) -> Option<&PlannedTransform> {
        self.transform_index.get(id).map(|&i| &self.transforms[i])
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn execution_graph(&self) -> Arc<StaticExecutionGraph> {
        self.execution_graph.clone()
    }

    pub fn origins(&self) -> Arc<TaskOriginTable> {
        self.origins.clone()
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    /// Groups units into topological levels using Kahn's algorithm.
    ///
    /// Level 0 holds units without dependencies; every unit's dependencies sit
    /// in earlier levels. Units within a level keep definition order.
    pub fn compute_levels(&self) -> Result<Vec<Vec<String>>, BuildError> {
        let reverse_deps = self.graph.build_reverse_dependencies();
        let mut in_degree: HashMap<&str, usize> = reverse_deps
            .iter()
            .map(|(id, deps)| (id.as_str(), deps.len()))
            .collect();

        let mut levels = Vec::new();
        let mut queue: VecDeque<&str> = self
            .units
            .iter()
            .map(|u| u.config.id.as_str())
            .filter(|id| in_degree.get(id).copied().unwrap_or(0) == 0)
            .collect();
        let mut processed = 0;

        while !queue.is_empty() {
            let mut current: Vec<&str> = queue.drain(..).collect();
            current.sort_by_key(|id| self.unit_index.get(*id).copied().unwrap_or(usize::MAX));
            processed += current.len();

            for id in &current {
                for dependent in self.graph.get_dependents(id).into_iter().flatten() {
                    if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(dependent.as_str());
                        }
                    }
                }
            }

            levels.push(current.into_iter().map(String::from).collect());
        }

        if processed != self.units.len() {
            let mut remaining: Vec<String> = in_degree
                .into_iter()
                .filter(|(_, degree)| *degree > 0)
                .map(|(id, _)| id.to_string())
                .collect();
            remaining.sort();
            return Err(BuildError::CyclicPlan(remaining));
        }

        LevelComputationCompleted {
            level_count: levels.len(),
            unit_count: processed,
        }
        .log();

        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ExecutionGraphTracker, OriginPluginLookup};

    fn plan(yaml: &str) -> BuildPlan {
        let config: BuildConfig = serde_yaml::from_str(yaml).unwrap();
        BuildPlan::from_config(&config).unwrap()
    }

    #[test]
    fn test_topological_levels_computation() {
        let plan = plan(
            r#"
units:
  - id: d
    depends_on: [b, c]
  - id: a
  - id: c
    depends_on: [a]
  - id: b
    depends_on: [a]
"#,
        );

        let levels = plan.compute_levels().unwrap();
        assert_eq!(levels, vec![vec!["a"], vec!["c", "b"], vec!["d"]]);
    }

    #[test]
    fn test_identities_and_tables() {
        let plan = plan(
            r#"
transforms:
  - id: unzip
    transformer: Unzip
    subject: lib.jar
units:
  - id: compile
    plugin: java
    transforms: [unzip]
  - id: jar
    path: ":app:jar"
    plugin: ""
    depends_on: [compile]
"#,
        );

        let compile = plan.unit("compile").unwrap();
        let jar = plan.unit("jar").unwrap();
        assert_eq!(compile.identity, WorkUnitIdentity::new(1, ":compile"));
        assert_eq!(jar.identity.path, ":app:jar");

        let deps = plan.execution_graph().execution_dependencies(&jar.identity);
        assert_eq!(deps.tasks, vec![compile.identity.clone()]);
        let compile_deps = plan.execution_graph().execution_dependencies(&compile.identity);
        assert_eq!(compile_deps.transforms, vec![TransformIdentity(1)]);

        assert_eq!(
            plan.origins().origin_plugin(&compile.identity).map(|p| p.to_string()),
            Some("java".to_string())
        );
        assert!(plan.origins().origin_plugin(&jar.identity).is_none());
        assert_eq!(plan.transform("unzip").map(|t| t.identity), Some(TransformIdentity(1)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config: BuildConfig = serde_yaml::from_str(
            r#"
units:
  - id: a
    depends_on: [missing]
"#,
        )
        .unwrap();

        assert!(matches!(
            BuildPlan::from_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
