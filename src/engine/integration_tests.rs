// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The simulated engine driving a full forwarding chain.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{load_and_validate_config, BuildConfig};
use crate::engine::{BuildPlan, SimulatedBuildExecutor};
use crate::events::{Descriptor, OperationCategory, OperationResult, ProgressEvent, TaskOutcome};
use crate::forwarding::{ForwardingChain, Subscription};
use crate::operations::OperationId;
use crate::report::{BuildReport, EventLog};
use crate::tracking::ResultAttachments;
use crate::traits::BuildExecutor;

fn sample(name: &str) -> BuildConfig {
    load_and_validate_config(format!("{}/configs/{}", env!("CARGO_MANIFEST_DIR"), name)).unwrap()
}

async fn run(config: &BuildConfig, subscription: Subscription) -> (bool, Vec<ProgressEvent>) {
    let plan = Arc::new(BuildPlan::from_config(config).unwrap());
    let log = Arc::new(EventLog::new());
    let attachments = Arc::new(ResultAttachments::new());
    let chain = ForwardingChain::builder(subscription, log.clone())
        .execution_graph(plan.execution_graph())
        .origin_plugins(plan.origins())
        .post_processor(attachments.clone())
        .build();

    let summary = SimulatedBuildExecutor::from_options(plan.options())
        .with_attachments(attachments)
        .execute(plan, Arc::new(chain))
        .await
        .unwrap();
    (summary.is_success(), log.events())
}

fn task_named<'a>(events: &'a [ProgressEvent], path: &str) -> Vec<&'a ProgressEvent> {
    events
        .iter()
        .filter(|e| matches!(e.descriptor(), Descriptor::Task(d) if d.task_path == path))
        .collect()
}

fn dependencies_of(events: &[ProgressEvent], path: &str) -> Vec<OperationId> {
    match task_named(events, path).first().map(|e| e.descriptor()) {
        Some(Descriptor::Task(d)) => d.dependencies.iter().copied().collect(),
        other => panic!("Expected task {path}, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dependencies_reference_already_started_operations() {
    let config = sample("java-library.yaml");
    let (success, events) = run(&config, config.subscriptions.clone()).await;
    assert!(success);

    let mut started = HashSet::new();
    for event in &events {
        if event.is_started() {
            started.insert(event.id());
        }
        if let Some(dependencies) = event.descriptor().dependencies() {
            for dependency in dependencies {
                assert!(
                    started.contains(dependency),
                    "{} references {} before it started",
                    event.descriptor().display_name(),
                    dependency
                );
            }
        }
    }

    // Every forwarded operation starts once and finishes once.
    let finished = events.iter().filter(|e| !e.is_started()).count();
    assert_eq!(started.len(), finished);
    assert_eq!(BuildReport::from_events(&events).unfinished(), 0);
}

#[tokio::test]
async fn test_custom_unit_is_not_a_dependency() {
    let config = sample("java-library.yaml");
    let (_, events) = run(&config, Subscription::all()).await;

    assert!(task_named(&events, ":lib:generateSources").is_empty());

    let transform_id = events
        .iter()
        .find(|e| matches!(e.descriptor(), Descriptor::Transform(_)))
        .map(|e| e.id())
        .unwrap();
    assert_eq!(dependencies_of(&events, ":lib:compileJava"), vec![transform_id]);
}

#[tokio::test]
async fn test_transform_dependencies_follow_subscription() {
    let config = sample("java-library.yaml");
    let (_, events) = run(&config, Subscription::new([OperationCategory::Task])).await;

    assert!(events
        .iter()
        .all(|e| matches!(e.descriptor(), Descriptor::Task(_))));
    assert!(dependencies_of(&events, ":lib:compileJava").is_empty());

    let compile = task_named(&events, ":lib:compileJava")[0].id();
    let resources = task_named(&events, ":lib:processResources")[0].id();
    let mut expected = vec![compile, resources];
    expected.sort();
    assert_eq!(dependencies_of(&events, ":lib:jar"), expected);
}

#[tokio::test]
async fn test_outcomes_of_java_library() {
    let config = sample("java-library.yaml");
    let (_, events) = run(&config, config.subscriptions.clone()).await;

    let outcome = |path: &str| -> TaskOutcome {
        task_named(&events, path)
            .into_iter()
            .find_map(|e| match e {
                ProgressEvent::Finished(f) => match &f.result {
                    OperationResult::Task(r) => Some(r.outcome.clone()),
                    OperationResult::Transform(_) => None,
                },
                ProgressEvent::Started(_) => None,
            })
            .unwrap()
    };

    assert!(matches!(
        outcome(":lib:processResources"),
        TaskOutcome::UpToDate { from_cache: false, .. }
    ));
    assert!(matches!(
        outcome(":lib:test"),
        TaskOutcome::UpToDate { from_cache: true, .. }
    ));
    assert!(matches!(outcome(":lib:javadoc"), TaskOutcome::Skipped { .. }));
    match outcome(":lib:compileJava") {
        TaskOutcome::Success {
            execution_reasons, ..
        } => assert_eq!(execution_reasons, vec!["Input property 'source' has changed"]),
        other => panic!("Expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failing_tests_block_packaging() {
    let config = sample("failing-tests.toml");
    let (success, events) = run(&config, config.subscriptions.clone()).await;
    assert!(!success);

    assert!(task_named(&events, ":app:distZip").is_empty());
    assert_eq!(task_named(&events, ":app:lint").len(), 2);

    let finish = task_named(&events, ":app:test")
        .into_iter()
        .find(|e| !e.is_started())
        .unwrap();
    match finish {
        ProgressEvent::Finished(f) => match &f.result {
            OperationResult::Task(r) => match &r.outcome {
                TaskOutcome::Failure { failures, .. } => {
                    let messages: Vec<_> = failures.iter().map(|f| f.message.as_str()).collect();
                    assert_eq!(
                        messages,
                        vec!["There were failing tests", "Test report could not be merged"]
                    );
                }
                other => panic!("Expected failure, got {other:?}"),
            },
            other => panic!("Expected task result, got {other:?}"),
        },
        ProgressEvent::Started(_) => unreachable!(),
    }

    // The instrument transform ran but is not subscribed to.
    let compile = task_named(&events, ":app:compileJava")[0].id();
    assert_eq!(dependencies_of(&events, ":app:test"), vec![compile]);
}

#[tokio::test]
async fn test_forwarded_tasks_have_no_visible_parent() {
    let config = sample("failing-tests.toml");
    let (_, events) = run(&config, config.subscriptions.clone()).await;

    // The root build operation is never forwarded.
    assert!(events.iter().all(|e| e.descriptor().parent_id().is_none()));
}

#[tokio::test]
async fn test_origin_plugins_reach_descriptors() {
    let config = sample("failing-tests.toml");
    let (_, events) = run(&config, config.subscriptions.clone()).await;

    let plugin = |path: &str| match task_named(&events, path)[0].descriptor() {
        Descriptor::Task(d) => d.origin_plugin.as_ref().map(|p| p.as_str().to_string()),
        Descriptor::Transform(_) => None,
    };
    assert_eq!(plugin(":app:compileJava").as_deref(), Some("java"));
    assert_eq!(plugin(":app:lint"), None);
}

#[tokio::test]
async fn test_configured_attachments_reach_results_and_report() {
    let config = sample("failing-tests.toml");
    let (_, events) = run(&config, config.subscriptions.clone()).await;

    let attachments = task_named(&events, ":app:test")
        .into_iter()
        .find_map(|e| match e {
            ProgressEvent::Finished(f) => match &f.result {
                OperationResult::Task(r) => Some(r.attachments.clone()),
                OperationResult::Transform(_) => None,
            },
            ProgressEvent::Started(_) => None,
        })
        .unwrap();
    assert_eq!(
        attachments.get("tests"),
        Some(&serde_json::json!({ "total": 57, "failed": 2, "skipped": 0 }))
    );

    let report = BuildReport::from_events(&events);
    let with_attachments: Vec<_> = report
        .operations
        .iter()
        .filter(|row| !row.attachments.is_empty())
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(with_attachments, vec!["Task :app:test"]);
}
