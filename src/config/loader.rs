// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::DEFAULT_MAX_CONCURRENCY;
use crate::errors::ConfigError;
use crate::forwarding::Subscription;

/// A simulated build: the units to run, the transforms they consume, what the
/// client subscribed to and how results are reported.
///
/// # Example
/// ```yaml
/// subscriptions: [task, transform]
/// executor_options:
///   max_concurrency: 4
/// reports:
///   console: true
///   json: build/progress.json
/// transforms:
///   - id: unzip_guava
///     transformer: UnzipTransform
///     subject: guava.jar
/// units:
///   - id: compile
///     path: ":app:compileJava"
///     plugin: java
///     transforms: [unzip_guava]
///   - id: jar
///     path: ":app:jar"
///     outcome: from_cache
///     depends_on: [compile]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "Subscription::all")]
    pub subscriptions: Subscription,
    #[serde(default)]
    pub executor_options: ExecutorOptions,
    #[serde(default)]
    pub reports: ReportOptions,
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,
    pub units: Vec<UnitConfig>,
}

/// Options of the simulated build executor.
///
/// # Fields
/// * `max_concurrency` - Units run concurrently within a level (optional)
/// * `unit_duration_ms` - Simulated work time of every executed unit (optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutorOptions {
    pub max_concurrency: Option<usize>,
    pub unit_duration_ms: Option<u64>,
}

impl ExecutorOptions {
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY).max(1)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportOptions {
    /// Print the summary table once the build finished
    #[serde(default = "default_console")]
    pub console: bool,
    /// Write the summary as JSON to this path
    pub json: Option<PathBuf>,
}

fn default_console() -> bool {
    true
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            console: default_console(),
            json: None,
        }
    }
}

/// One unit of work in the build.
///
/// `path` defaults to `:<id>`.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    pub id: String,
    pub path: Option<String>,
    #[serde(default)]
    pub kind: UnitKind,
    /// Plugin that registered the unit, absent for build script units
    pub plugin: Option<String>,
    #[serde(default)]
    pub outcome: UnitOutcome,
    #[serde(default)]
    pub incremental: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
    /// Fault messages raised when `outcome` is `failed`
    #[serde(default)]
    pub failures: Vec<String>,
    pub skip_message: Option<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Ids of transforms whose outputs the unit consumes
    #[serde(default)]
    pub transforms: Vec<String>,
    /// Companion values attached to the unit's finished result, e.g. test counts
    #[serde(default)]
    pub attachments: BTreeMap<String, serde_json::Value>,
}

impl UnitConfig {
    pub fn task_path(&self) -> String {
        self.path.clone().unwrap_or_else(|| format!(":{}", self.id))
    }
}

/// What the engine reports for a unit.
///
/// `Task` units carry task details and are forwarded to task subscribers.
/// `Custom` units are bookkeeping operations no translator claims.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    #[default]
    Task,
    Custom,
}

/// Simulated outcome of a unit.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitOutcome {
    #[default]
    Success,
    UpToDate,
    FromCache,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    pub id: String,
    pub transformer: String,
    pub subject: String,
    #[serde(default)]
    pub fails: bool,
}

/// Loads a build definition, choosing YAML or TOML by file extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BuildConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "toml" => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat { extension }),
    }
}

/// Loads a build definition and validates its dependency graph.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<BuildConfig, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_dependency_graph(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::OperationCategory;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
units:
  - id: compile
  - id: jar
    outcome: up_to_date
    depends_on: [compile]
"#;

        let cfg: BuildConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.units.len(), 2);
        assert_eq!(cfg.units[1].depends_on, vec!["compile"]);
        assert_eq!(cfg.units[1].outcome, UnitOutcome::UpToDate);
        assert_eq!(cfg.units[0].task_path(), ":compile");
        assert_eq!(cfg.units[0].kind, UnitKind::Task);
        assert_eq!(cfg.subscriptions, Subscription::all());
        assert!(cfg.reports.console);
        assert_eq!(cfg.executor_options.max_concurrency(), DEFAULT_MAX_CONCURRENCY);
    }

    #[test]
    fn test_load_yaml_with_transforms() {
        let file = write_temp(
            ".yaml",
            r#"
subscriptions: [task]
executor_options:
  max_concurrency: 0
reports:
  console: false
  json: out/report.json
transforms:
  - id: unzip
    transformer: UnzipTransform
    subject: guava.jar
    fails: true
units:
  - id: compile
    path: ":app:compileJava"
    plugin: java
    transforms: [unzip]
"#,
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert!(cfg.subscriptions.is_requested(OperationCategory::Task));
        assert!(!cfg.subscriptions.is_requested(OperationCategory::Transform));
        assert_eq!(cfg.executor_options.max_concurrency(), 1);
        assert!(!cfg.reports.console);
        assert_eq!(cfg.reports.json, Some(PathBuf::from("out/report.json")));
        assert!(cfg.transforms[0].fails);
        assert_eq!(cfg.units[0].plugin.as_deref(), Some("java"));
    }

    #[test]
    fn test_load_toml() {
        let file = write_temp(
            ".toml",
            r#"
subscriptions = ["task", "transform"]

[[units]]
id = "compile"

[[units]]
id = "test"
outcome = "failed"
failures = ["3 tests failed"]
depends_on = ["compile"]
"#,
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.units[1].outcome, UnitOutcome::Failed);
        assert_eq!(cfg.units[1].failures, vec!["3 tests failed"]);
        assert!(cfg.units[0].attachments.is_empty());
    }

    #[test]
    fn test_load_toml_attachments() {
        let file = write_temp(
            ".toml",
            r#"
[[units]]
id = "test"

[units.attachments.tests]
total = 57
failed = 3
"#,
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(
            cfg.units[0].attachments.get("tests"),
            Some(&serde_json::json!({ "total": 57, "failed": 3 }))
        );
    }

    #[test]
    fn test_load_and_validate_cyclic_config() {
        let file = write_temp(
            ".yml",
            r#"
units:
  - id: a
    depends_on: [b]
  - id: b
    depends_on: [a]
"#,
        );

        let error = load_and_validate_config(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
        assert!(error.to_string().contains("Cyclic dependency detected"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".json", "{}");
        let error = load_config(file.path()).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::UnsupportedFormat { ref extension } if extension == "json"
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_config(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }
}
