// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Semaphore;

use crate::config::consts::{
    DEFAULT_FAILURE_MESSAGE, FROM_CACHE_MESSAGE, SKIPPED_MESSAGE, UP_TO_DATE_MESSAGE,
};
use crate::config::{ExecutorOptions, UnitKind, UnitOutcome};
use crate::engine::plan::{BuildPlan, PlannedTransform, PlannedUnit};
use crate::errors::{BuildError, SimulatedFailure};
use crate::observability::messages::engine::{BuildCompleted, BuildStarted, UnitBlocked, UnitFinished};
use crate::observability::messages::StructuredLog;
use crate::operations::{
    BuildOperation, ExecuteTaskDetails, ExecuteTaskResult, ExecuteTransformDetails, Fault,
    FinishNotification, OperationDetails, OperationId, ResultPayload, StartNotification,
    TaskStateHandle, Timestamp,
};
use crate::tracking::ResultAttachments;
use crate::traits::{BuildExecutor, OperationListener};

/// Level-by-level executor that simulates a build from its plan.
///
/// Units run level by level; all units of a level run concurrently, bounded
/// by a semaphore. The transforms a level consumes run first, once each.
/// Since a level only starts after the previous one finished, every unit's
/// finish notification precedes the start of its dependents.
///
/// A unit whose dependency failed, was itself not started, or consumed a
/// failed transform is not started at all and produces no notifications.
///
/// Operation ids are allocated per build, starting at 1 for the root
/// "Run build" operation that parents every unit and transform.
///
/// A unit's configured attachments are handed to the shared
/// [`ResultAttachments`], keyed by the unit's operation id, before its finish
/// notification goes out.
pub struct SimulatedBuildExecutor {
    max_concurrency: usize,
    unit_duration: Duration,
    attachments: Option<Arc<ResultAttachments>>,
}

impl SimulatedBuildExecutor {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            unit_duration: Duration::ZERO,
            attachments: None,
        }
    }

    pub fn from_options(options: &ExecutorOptions) -> Self {
        Self::new(options.max_concurrency())
            .with_unit_duration(Duration::from_millis(options.unit_duration_ms.unwrap_or(0)))
    }

    /// Simulated work time of every executed unit.
    pub fn with_unit_duration(mut self, duration: Duration) -> Self {
        self.unit_duration = duration;
        self
    }

    /// Store that receives the companion values of finished task units.
    pub fn with_attachments(mut self, attachments: Arc<ResultAttachments>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    async fn run_levels(
        &self,
        run: &Arc<BuildRun>,
        levels: &[Vec<String>],
    ) -> Result<BuildSummary, BuildError> {
        let mut summary = BuildSummary::default();
        let mut transforms_run: Vec<String> = Vec::new();

        for level in levels {
            let mut needed: Vec<String> = Vec::new();
            for id in level {
                let unit = run.unit(id)?;
                for transform in &unit.config.transforms {
                    if !transforms_run.contains(transform) && !needed.contains(transform) {
                        needed.push(transform.clone());
                    }
                }
            }
            for (id, succeeded) in self.execute_transforms(run, &needed).await? {
                if !succeeded {
                    summary.failed_transforms.push(id.clone());
                }
                transforms_run.push(id);
            }

            let mut runnable = Vec::new();
            for id in level {
                let unit = run.unit(id)?;
                match summary.blocker(unit) {
                    Some(blocked_by) => {
                        UnitBlocked {
                            unit_id: id,
                            blocked_by: &blocked_by,
                        }
                        .log();
                        summary.blocked.push(id.clone());
                    }
                    None => runnable.push(id.clone()),
                }
            }

            for (id, succeeded) in self.execute_units(run, runnable).await? {
                if succeeded {
                    summary.succeeded.push(id);
                } else {
                    summary.failed.push(id);
                }
            }
        }

        Ok(summary)
    }

    async fn execute_transforms(
        &self,
        run: &Arc<BuildRun>,
        ids: &[String],
    ) -> Result<Vec<(String, bool)>, BuildError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = Vec::new();

        for id in ids {
            let run = run.clone();
            let semaphore = semaphore.clone();
            let id = id.clone();
            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await?;
                let transform = run.transform(&id)?;
                let succeeded = run.execute_transform(transform).await;
                Ok::<_, BuildError>((id, succeeded))
            }));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            results.push(task.await??);
        }
        Ok(results)
    }

    async fn execute_units(
        &self,
        run: &Arc<BuildRun>,
        ids: Vec<String>,
    ) -> Result<Vec<(String, bool)>, BuildError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = Vec::new();

        for id in ids {
            let run = run.clone();
            let semaphore = semaphore.clone();
            let unit_duration = self.unit_duration;
            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await?;
                let unit = run.unit(&id)?;
                let succeeded = run.execute_unit(unit, unit_duration).await;
                Ok::<_, BuildError>((id, succeeded))
            }));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            results.push(task.await??);
        }
        Ok(results)
    }
}

#[async_trait]
impl BuildExecutor for SimulatedBuildExecutor {
    async fn execute(
        &self,
        plan: Arc<BuildPlan>,
        listener: Arc<dyn OperationListener>,
    ) -> Result<BuildSummary, BuildError> {
        BuildStarted {
            unit_count: plan.units().len(),
            transform_count: plan.transforms().len(),
            max_concurrency: self.max_concurrency,
        }
        .log();
        let started = Instant::now();

        let levels = plan.compute_levels()?;

        let ids = AtomicU64::new(1);
        let root = BuildOperation::new(OperationId(ids.fetch_add(1, Ordering::SeqCst)), "run", "Run build");
        let run = Arc::new(BuildRun {
            plan,
            listener,
            attachments: self.attachments.clone(),
            ids,
            root: root.id,
        });

        let root_start = now_millis();
        run.listener
            .started(&root, &StartNotification { start_time: root_start });

        let outcome = self.run_levels(&run, &levels).await;

        run.listener.finished(
            &root,
            &FinishNotification {
                start_time: root_start,
                end_time: now_millis(),
                result: None,
                failures: vec![],
            },
        );

        let summary = outcome?;
        BuildCompleted {
            executed: summary.succeeded.len() + summary.failed.len(),
            failed: summary.failed.len(),
            blocked: summary.blocked.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(summary)
    }
}

/// What happened to each unit of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Units that ran without failure, including up-to-date and skipped ones
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    /// Units never started because something upstream failed
    pub blocked: Vec<String>,
    pub failed_transforms: Vec<String>,
}

impl BuildSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.blocked.is_empty() && self.failed_transforms.is_empty()
    }

    fn blocker(&self, unit: &PlannedUnit) -> Option<String> {
        unit.config
            .depends_on
            .iter()
            .chain(unit.config.transforms.iter())
            .find(|id| {
                self.failed.contains(id)
                    || self.blocked.contains(id)
                    || self.failed_transforms.contains(id)
            })
            .cloned()
    }
}

/// State shared by every worker of one build.
struct BuildRun {
    plan: Arc<BuildPlan>,
    listener: Arc<dyn OperationListener>,
    attachments: Option<Arc<ResultAttachments>>,
    ids: AtomicU64,
    root: OperationId,
}

impl BuildRun {
    fn next_id(&self) -> OperationId {
        OperationId(self.ids.fetch_add(1, Ordering::SeqCst))
    }

    fn unit(&self, id: &str) -> Result<&PlannedUnit, BuildError> {
        self.plan
            .unit(id)
            .ok_or_else(|| BuildError::UnknownUnit(id.to_string()))
    }

    fn transform(&self, id: &str) -> Result<&PlannedTransform, BuildError> {
        self.plan
            .transform(id)
            .ok_or_else(|| BuildError::UnknownUnit(id.to_string()))
    }

    async fn execute_transform(&self, transform: &PlannedTransform) -> bool {
        let config = &transform.config;
        let op = BuildOperation::new(
            self.next_id(),
            format!("transform {}", config.id),
            format!("{} {}", config.transformer, config.subject),
        )
        .with_parent(self.root)
        .with_details(OperationDetails::ExecuteTransform(ExecuteTransformDetails {
            identity: transform.identity,
            transformer_name: config.transformer.clone(),
            subject_name: config.subject.clone(),
        }));

        let start_time = now_millis();
        self.listener.started(&op, &StartNotification { start_time });
        tokio::task::yield_now().await;

        let failures: Vec<Fault> = if config.fails {
            vec![Arc::new(SimulatedFailure {
                operation: config.id.clone(),
                message: format!("Failed to transform {}", config.subject),
            })]
        } else {
            vec![]
        };
        let succeeded = failures.is_empty();

        self.listener.finished(
            &op,
            &FinishNotification {
                start_time,
                end_time: now_millis(),
                result: None,
                failures,
            },
        );
        succeeded
    }

    async fn execute_unit(&self, unit: &PlannedUnit, duration: Duration) -> bool {
        let config = &unit.config;
        let task_path = config.task_path();
        let state = TaskStateHandle::default();
        let details = match config.kind {
            UnitKind::Task => OperationDetails::ExecuteTask(ExecuteTaskDetails {
                identity: unit.identity.clone(),
                task_path: task_path.clone(),
                state: state.clone(),
            }),
            UnitKind::Custom => OperationDetails::Custom {
                kind: config.id.clone(),
            },
        };
        let op = BuildOperation::new(self.next_id(), task_path.clone(), format!("Task {task_path}"))
            .with_parent(self.root)
            .with_details(details);

        let start_time = now_millis();
        self.listener.started(&op, &StartNotification { start_time });

        let executed = ExecuteTaskResult {
            incremental: config.incremental,
            execution_reasons: config.reasons.clone(),
        };
        let (result, failures): (Option<ExecuteTaskResult>, Vec<Fault>) = match config.outcome {
            UnitOutcome::UpToDate | UnitOutcome::FromCache => {
                let from_cache = config.outcome == UnitOutcome::FromCache;
                let default_message = if from_cache {
                    FROM_CACHE_MESSAGE
                } else {
                    UP_TO_DATE_MESSAGE
                };
                state.update(|s| {
                    s.up_to_date = true;
                    s.from_cache = from_cache;
                    s.skip_message =
                        Some(config.skip_message.clone().unwrap_or_else(|| default_message.to_string()));
                });
                (Some(ExecuteTaskResult::default()), vec![])
            }
            UnitOutcome::Skipped => {
                state.update(|s| {
                    s.skipped = true;
                    s.skip_message =
                        Some(config.skip_message.clone().unwrap_or_else(|| SKIPPED_MESSAGE.to_string()));
                });
                (None, vec![])
            }
            UnitOutcome::Success => {
                self.execute_actions(&op, duration).await;
                (Some(executed), vec![])
            }
            UnitOutcome::Failed => {
                self.execute_actions(&op, duration).await;
                (Some(executed), failures_of(&config.id, &config.failures))
            }
        };
        let succeeded = failures.is_empty();

        let result = match config.kind {
            UnitKind::Task => {
                if let Some(attachments) = &self.attachments {
                    for (key, value) in &config.attachments {
                        attachments.attach(op.id, key.clone(), value.clone());
                    }
                }
                result.map(ResultPayload::ExecuteTask)
            }
            UnitKind::Custom => Some(ResultPayload::Custom(serde_json::json!({ "unit": config.id }))),
        };
        let end_time = now_millis();
        self.listener.finished(
            &op,
            &FinishNotification {
                start_time,
                end_time,
                result,
                failures,
            },
        );

        UnitFinished {
            unit_id: &config.id,
            outcome: if succeeded { "successfully" } else { "with failures" },
            duration_ms: end_time.saturating_sub(start_time),
        }
        .log();
        succeeded
    }

    /// A nested operation below the unit, never claimed by a translator.
    async fn execute_actions(&self, parent: &BuildOperation, duration: Duration) {
        let op = BuildOperation::new(
            self.next_id(),
            format!("{} actions", parent.name),
            format!("Execute actions for {}", parent.name),
        )
        .with_parent(parent.id)
        .with_details(OperationDetails::Custom {
            kind: "actions".to_string(),
        });

        let start_time = now_millis();
        self.listener.started(&op, &StartNotification { start_time });
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
        self.listener.finished(
            &op,
            &FinishNotification {
                start_time,
                end_time: now_millis(),
                result: None,
                failures: vec![],
            },
        );
    }
}

fn failures_of(unit_id: &str, messages: &[String]) -> Vec<Fault> {
    let messages: Vec<String> = if messages.is_empty() {
        vec![DEFAULT_FAILURE_MESSAGE.to_string()]
    } else {
        messages.to_vec()
    };
    messages
        .into_iter()
        .map(|message| {
            Arc::new(SimulatedFailure {
                operation: unit_id.to_string(),
                message,
            }) as Fault
        })
        .collect()
}

fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or_default()
}
