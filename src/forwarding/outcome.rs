// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Classification of a finished task into a [`TaskOutcome`].
//!
//! Evaluated exactly once, when the task's finish notification arrives. The
//! rules apply in strict priority order:
//!
//! 1. up-to-date → [`TaskOutcome::UpToDate`]
//! 2. skipped → [`TaskOutcome::Skipped`]
//! 3. no captured fault → [`TaskOutcome::Success`]
//! 4. otherwise → [`TaskOutcome::Failure`]
//!
//! A task flagged both up-to-date and skipped is up-to-date.

use std::collections::BTreeMap;

use crate::events::{FailureInfo, TaskOutcome, TaskResult, SUCCESS_STATUS};
use crate::operations::{ExecuteTaskResult, FinishNotification, ResultPayload, TaskState};

/// Builds the final [`TaskResult`] from the task's state and its finish notification.
///
/// A missing result payload, or one of another operation kind, means the task
/// never reached execution: `incremental` is `false` and there are no
/// execution reasons.
///
/// # Example
/// ```
/// use progress_forwarder::forwarding::classify_task_result;
/// use progress_forwarder::events::TaskOutcome;
/// use progress_forwarder::operations::{FinishNotification, TaskState};
///
/// let state = TaskState { up_to_date: true, skipped: true, ..TaskState::default() };
/// let result = classify_task_result(&state, &FinishNotification::default());
///
/// assert!(matches!(result.outcome, TaskOutcome::UpToDate { .. }));
/// assert!(!result.incremental);
/// ```
pub fn classify_task_result(state: &TaskState, finish: &FinishNotification) -> TaskResult {
    let payload = execute_task_payload(finish);
    let incremental = payload.map(|p| p.incremental).unwrap_or(false);

    let outcome = if state.up_to_date {
        TaskOutcome::UpToDate {
            from_cache: state.from_cache,
            skip_message: state.skip_message.clone(),
        }
    } else if state.skipped {
        TaskOutcome::Skipped {
            skip_message: state.skip_message.clone(),
        }
    } else {
        let execution_reasons = payload
            .map(|p| p.execution_reasons.clone())
            .unwrap_or_default();
        if finish.failures.is_empty() {
            TaskOutcome::Success {
                status_message: SUCCESS_STATUS.to_string(),
                execution_reasons,
            }
        } else {
            TaskOutcome::Failure {
                failures: finish
                    .failures
                    .iter()
                    .map(|fault| FailureInfo::from_error(fault.as_ref()))
                    .collect(),
                execution_reasons,
            }
        }
    };

    TaskResult {
        start_time: finish.start_time,
        end_time: finish.end_time,
        incremental,
        outcome,
        attachments: BTreeMap::new(),
    }
}

fn execute_task_payload(finish: &FinishNotification) -> Option<&ExecuteTaskResult> {
    match &finish.result {
        Some(ResultPayload::ExecuteTask(result)) => Some(result),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Fault;
    use std::sync::Arc;

    fn fault(message: &str) -> Fault {
        Arc::new(std::io::Error::new(std::io::ErrorKind::Other, message.to_string()))
    }

    fn executed(incremental: bool, reasons: &[&str]) -> FinishNotification {
        FinishNotification {
            start_time: 100,
            end_time: 250,
            result: Some(ResultPayload::ExecuteTask(ExecuteTaskResult {
                incremental,
                execution_reasons: reasons.iter().map(|r| r.to_string()).collect(),
            })),
            failures: vec![],
        }
    }

    #[test]
    fn test_up_to_date_wins_over_skipped() {
        let state = TaskState {
            up_to_date: true,
            skipped: true,
            from_cache: false,
            skip_message: Some("UP-TO-DATE".to_string()),
        };

        let result = classify_task_result(&state, &FinishNotification::default());

        assert_eq!(
            result.outcome,
            TaskOutcome::UpToDate {
                from_cache: false,
                skip_message: Some("UP-TO-DATE".to_string()),
            }
        );
    }

    #[test]
    fn test_up_to_date_wins_over_failures() {
        let state = TaskState {
            up_to_date: true,
            from_cache: true,
            ..TaskState::default()
        };
        let mut finish = executed(false, &[]);
        finish.failures.push(fault("ignored"));

        let result = classify_task_result(&state, &finish);
        assert!(matches!(
            result.outcome,
            TaskOutcome::UpToDate { from_cache: true, .. }
        ));
    }

    #[test]
    fn test_skipped() {
        let state = TaskState {
            skipped: true,
            skip_message: Some("SKIPPED".to_string()),
            ..TaskState::default()
        };

        let result = classify_task_result(&state, &FinishNotification::default());
        assert_eq!(
            result.outcome,
            TaskOutcome::Skipped {
                skip_message: Some("SKIPPED".to_string())
            }
        );
    }

    #[test]
    fn test_success_carries_status_and_reasons() {
        let result = classify_task_result(
            &TaskState::default(),
            &executed(true, &["Input property 'source' has changed"]),
        );

        assert!(result.incremental);
        assert_eq!(result.start_time, 100);
        assert_eq!(result.end_time, 250);
        assert_eq!(
            result.outcome,
            TaskOutcome::Success {
                status_message: "SUCCESS".to_string(),
                execution_reasons: vec!["Input property 'source' has changed".to_string()],
            }
        );
    }

    #[test]
    fn test_failures_keep_their_order() {
        let mut finish = executed(false, &[]);
        finish.failures = vec![fault("first"), fault("second")];

        let result = classify_task_result(&TaskState::default(), &finish);

        match result.outcome {
            TaskOutcome::Failure { failures, .. } => {
                let messages: Vec<_> = failures.iter().map(|f| f.message.as_str()).collect();
                assert_eq!(messages, vec!["first", "second"]);
            }
            other => panic!("Expected failure, got {other:?}"),
        }
        assert!(!result.incremental);
    }

    #[test]
    fn test_incremental_defaults_to_false_without_payload() {
        let result = classify_task_result(&TaskState::default(), &FinishNotification::default());
        assert!(!result.incremental);
        assert_eq!(
            result.outcome,
            TaskOutcome::Success {
                status_message: "SUCCESS".to_string(),
                execution_reasons: vec![],
            }
        );
    }

    #[test]
    fn test_incremental_copied_verbatim_from_payload() {
        assert!(classify_task_result(&TaskState::default(), &executed(true, &[])).incremental);
        assert!(!classify_task_result(&TaskState::default(), &executed(false, &[])).incremental);
    }

    #[test]
    fn test_mistyped_payload_treated_as_absent() {
        let finish = FinishNotification {
            result: Some(ResultPayload::Custom(serde_json::json!({ "incremental": true }))),
            ..FinishNotification::default()
        };

        let result = classify_task_result(&TaskState::default(), &finish);
        assert!(!result.incremental);
    }
}
