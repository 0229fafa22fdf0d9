// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors found while validating a build definition's dependency graph.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A circular dependency between units
    CyclicDependency {
        /// The cycle path, closed by repeating its first unit
        cycle: Vec<String>,
    },
    /// A unit depends on a unit that is not defined
    UnresolvedDependency {
        unit_id: String,
        missing_dependency: String,
    },
    /// A unit consumes a transform that is not defined
    UnresolvedTransform {
        unit_id: String,
        missing_transform: String,
    },
    /// An id is used by more than one unit or transform
    DuplicateId { id: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedDependency {
                unit_id,
                missing_dependency,
            } => {
                write!(
                    f,
                    "Unit '{}' depends on '{}' which does not exist",
                    unit_id, missing_dependency
                )
            }
            ValidationError::UnresolvedTransform {
                unit_id,
                missing_transform,
            } => {
                write!(
                    f,
                    "Unit '{}' consumes transform '{}' which does not exist",
                    unit_id, missing_transform
                )
            }
            ValidationError::DuplicateId { id } => {
                write!(f, "Duplicate id: '{}'", id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors loading a build definition from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read build definition {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML build definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML build definition: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported build definition format '{extension}', expected yaml, yml or toml")]
    UnsupportedFormat { extension: String },

    #[error("Build definition validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
