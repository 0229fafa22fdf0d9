// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build summary assembled from forwarded events.
//!
//! Events hold their descriptors behind `Arc`, so the report copies what it
//! needs into plain rows that serialize on their own.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::errors::ReportError;
use crate::events::{
    Descriptor, FailureInfo, OperationCategory, OperationResult, ProgressEvent, TaskOutcome,
    TransformOutcome,
};
use crate::observability::messages::report::{ReportWritten, UnfinishedOperations};
use crate::observability::messages::StructuredLog;
use crate::operations::{OperationId, PluginId};

/// One forwarded operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRow {
    pub id: OperationId,
    pub category: OperationCategory,
    pub name: String,
    pub parent_id: Option<OperationId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<OperationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_plugin: Option<PluginId>,
    /// Outcome label, `None` while the operation has not finished
    pub outcome: Option<String>,
    pub duration_ms: Option<u64>,
    pub incremental: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub execution_reasons: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureInfo>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attachments: BTreeMap<String, serde_json::Value>,
}

impl OperationRow {
    fn started(descriptor: &Descriptor) -> Self {
        let (category, dependencies, origin_plugin) = match descriptor {
            Descriptor::Task(d) => (
                OperationCategory::Task,
                d.dependencies.iter().copied().collect(),
                d.origin_plugin.clone(),
            ),
            Descriptor::Transform(_) => (OperationCategory::Transform, Vec::new(), None),
        };

        Self {
            id: descriptor.id(),
            category,
            name: descriptor.display_name().to_string(),
            parent_id: descriptor.parent_id(),
            dependencies,
            origin_plugin,
            outcome: None,
            duration_ms: None,
            incremental: false,
            execution_reasons: Vec::new(),
            failures: Vec::new(),
            attachments: BTreeMap::new(),
        }
    }

    fn finish(&mut self, result: &OperationResult) {
        self.outcome = Some(result.label().to_string());
        self.duration_ms = Some(result.duration_ms());

        match result {
            OperationResult::Task(task) => {
                self.incremental = task.incremental;
                self.attachments = task.attachments.clone();
                match &task.outcome {
                    TaskOutcome::Success {
                        execution_reasons, ..
                    } => self.execution_reasons = execution_reasons.clone(),
                    TaskOutcome::Failure {
                        failures,
                        execution_reasons,
                    } => {
                        self.failures = failures.clone();
                        self.execution_reasons = execution_reasons.clone();
                    }
                    TaskOutcome::UpToDate { .. } | TaskOutcome::Skipped { .. } => {}
                }
            }
            OperationResult::Transform(transform) => {
                if let TransformOutcome::Failure { failures } = &transform.outcome {
                    self.failures = failures.clone();
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Everything a client learned about a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    /// Operations in the order they started
    pub operations: Vec<OperationRow>,
    /// Finished operations per outcome label
    pub totals: BTreeMap<String, usize>,
}

impl BuildReport {
    pub fn from_events(events: &[ProgressEvent]) -> Self {
        let mut operations: Vec<OperationRow> = Vec::new();
        let mut index: HashMap<OperationId, usize> = HashMap::new();

        for event in events {
            let slot = *index.entry(event.id()).or_insert_with(|| {
                operations.push(OperationRow::started(event.descriptor()));
                operations.len() - 1
            });
            if let ProgressEvent::Finished(finished) = event {
                operations[slot].finish(&finished.result);
            }
        }

        let mut totals = BTreeMap::new();
        for row in &operations {
            if let Some(outcome) = &row.outcome {
                *totals.entry(outcome.clone()).or_insert(0) += 1;
            }
        }

        let report = Self { operations, totals };
        let unfinished = report.unfinished();
        if unfinished > 0 {
            UnfinishedOperations { count: unfinished }.log();
        }
        report
    }

    pub fn unfinished(&self) -> usize {
        self.operations.iter().filter(|r| !r.is_finished()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &OperationRow> {
        self.operations
            .iter()
            .filter(|r| r.outcome.as_deref() == Some("FAILED"))
    }

    pub fn render_console<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Operations ({}):", self.operations.len())?;
        for row in &self.operations {
            let outcome = row.outcome.as_deref().unwrap_or("UNFINISHED");
            write!(out, "  {:<11} {}", outcome, row.name)?;
            if let Some(duration) = row.duration_ms {
                write!(out, " ({}ms)", duration)?;
            }
            if row.incremental {
                write!(out, " [incremental]")?;
            }
            if !row.dependencies.is_empty() {
                let deps: Vec<String> = row.dependencies.iter().map(|d| d.to_string()).collect();
                write!(out, " <- {}", deps.join(", "))?;
            }
            writeln!(out)?;
            for reason in &row.execution_reasons {
                writeln!(out, "      because: {}", reason)?;
            }
            for failure in &row.failures {
                writeln!(out, "      failure: {}", failure.message)?;
            }
        }

        let totals: Vec<String> = self
            .totals
            .iter()
            .map(|(label, count)| format!("{} {}", count, label))
            .collect();
        writeln!(out, "Totals: {}", totals.join(", "))
    }

    pub fn write_json(&self, destination: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ReportError::Serialize {
            report: "json".to_string(),
            source,
        })?;

        let write_failed = |source| ReportError::WriteFailed {
            report: "json".to_string(),
            destination: destination.to_path_buf(),
            source,
        };
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }
        fs::write(destination, json).map_err(write_failed)?;

        ReportWritten {
            report: "json",
            destination,
            operation_count: self.operations.len(),
        }
        .log();
        Ok(())
    }
}

/// One line describing a live event, e.g. `> Task :app:jar UP-TO-DATE (3ms)`.
pub fn describe_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::Started(started) => {
            format!("> {} STARTED", started.descriptor.display_name())
        }
        ProgressEvent::Finished(finished) => format!(
            "> {} {} ({}ms)",
            finished.descriptor.display_name(),
            finished.result.label(),
            finished.result.duration_ms()
        ),
    }
}
