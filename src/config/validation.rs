// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build definition validation.
//!
//! Three checks run in order:
//!
//! 1. **Uniqueness**: unit and transform ids share one namespace
//! 2. **References**: every `depends_on` names a unit, every `transforms`
//!    entry names a transform
//! 3. **Cycles**: DFS with a recursion stack over the unit graph
//!
//! Cycle detection needs a structurally valid graph, so it only runs when the
//! first two checks passed. All errors found are returned at once.
//!
//! # Example
//! ```rust
//! use progress_forwarder::config::{validate_dependency_graph, BuildConfig};
//! use progress_forwarder::errors::ValidationError;
//!
//! let config: BuildConfig = serde_yaml::from_str(r#"
//! units:
//!   - id: compile
//!     depends_on: [generate]
//! "#).unwrap();
//!
//! let errors = validate_dependency_graph(&config).unwrap_err();
//! assert_eq!(
//!     errors,
//!     vec![ValidationError::UnresolvedDependency {
//!         unit_id: "compile".to_string(),
//!         missing_dependency: "generate".to_string(),
//!     }]
//! );
//! ```

use std::collections::{HashMap, HashSet};

use crate::config::BuildConfig;
use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    CyclicDependencyDetected, DuplicateId, UnresolvedReference,
};
use crate::observability::messages::StructuredLog;

/// Validates a build definition, returning every problem found.
pub fn validate_dependency_graph(config: &BuildConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_ids(config) {
        errors.extend(duplicate_errors);
    }

    if let Err(unresolved_errors) = validate_references(config) {
        errors.extend(unresolved_errors);
    }

    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_graph(config) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_ids(config: &BuildConfig) -> Result<(), Vec<ValidationError>> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    let ids = config
        .units
        .iter()
        .map(|u| &u.id)
        .chain(config.transforms.iter().map(|t| &t.id));

    for id in ids {
        if !seen_ids.insert(id) {
            DuplicateId { id }.log();
            errors.push(ValidationError::DuplicateId { id: id.clone() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_references(config: &BuildConfig) -> Result<(), Vec<ValidationError>> {
    let unit_ids: HashSet<&String> = config.units.iter().map(|u| &u.id).collect();
    let transform_ids: HashSet<&String> = config.transforms.iter().map(|t| &t.id).collect();
    let mut errors = Vec::new();

    for unit in &config.units {
        for dependency in &unit.depends_on {
            if !unit_ids.contains(dependency) {
                UnresolvedReference {
                    unit_id: &unit.id,
                    reference: dependency,
                    kind: "unit",
                }
                .log();
                errors.push(ValidationError::UnresolvedDependency {
                    unit_id: unit.id.clone(),
                    missing_dependency: dependency.clone(),
                });
            }
        }
        for transform in &unit.transforms {
            if !transform_ids.contains(transform) {
                UnresolvedReference {
                    unit_id: &unit.id,
                    reference: transform,
                    kind: "transform",
                }
                .log();
                errors.push(ValidationError::UnresolvedTransform {
                    unit_id: unit.id.clone(),
                    missing_transform: transform.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles with a three color DFS over dependency -> dependent edges.
///
/// Only the first cycle found is reported, with its exact path.
fn validate_acyclic_graph(config: &BuildConfig) -> Result<(), Vec<ValidationError>> {
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();

    for unit in &config.units {
        graph.entry(unit.id.as_str()).or_default();
    }
    for unit in &config.units {
        for dependency in &unit.depends_on {
            graph
                .entry(dependency.as_str())
                .or_default()
                .push(unit.id.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    // Config order keeps the reported cycle stable between runs.
    for unit in &config.units {
        if !visited.contains(unit.id.as_str()) {
            if let Some(cycle) =
                dfs_cycle_detection(&unit.id, &graph, &mut visited, &mut rec_stack, &mut path)
            {
                let steps: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CyclicDependencyDetected { cycle: &steps }.log();
                return Err(vec![ValidationError::CyclicDependency { cycle }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path)
                {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|&x| x == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[cycle_start..].iter().map(|s| s.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}
