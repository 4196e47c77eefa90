//! Wire type tests.

use foodie_julep::{Agent, Execution, ExecutionStatus};
use serde_json::json;

#[test]
fn only_succeeded_and_failed_are_terminal() {
    assert!(ExecutionStatus::Succeeded.is_terminal());
    assert!(ExecutionStatus::Failed.is_terminal());
    for status in [
        ExecutionStatus::Queued,
        ExecutionStatus::Starting,
        ExecutionStatus::Running,
        ExecutionStatus::AwaitingInput,
        ExecutionStatus::Cancelled,
        ExecutionStatus::Other("paused".into()),
    ] {
        assert!(!status.is_terminal(), "{} should not be terminal", status.as_str());
    }
}

#[test]
fn unknown_status_is_kept() {
    let status: ExecutionStatus = serde_json::from_value(json!("warming_up")).unwrap();
    assert_eq!(status, ExecutionStatus::Other("warming_up".into()));
    assert_eq!(serde_json::to_value(&status).unwrap(), json!("warming_up"));
}

#[test]
fn known_status_serializes_to_label() {
    let status: ExecutionStatus = serde_json::from_value(json!("awaiting_input")).unwrap();
    assert_eq!(status, ExecutionStatus::AwaitingInput);
    assert_eq!(serde_json::to_value(&status).unwrap(), json!("awaiting_input"));
}

#[test]
fn execution_parses_output_and_null_error() {
    let execution: Execution = serde_json::from_value(json!({
        "id": "exec-1",
        "task_id": "task-1",
        "status": "succeeded",
        "input": {"city": "Paris"},
        "output": [{"content": "Your Parisian food day..."}],
        "error": null,
        "created_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(execution.status, ExecutionStatus::Succeeded);
    assert!(execution.output.is_some());
    assert!(execution.error.is_none());
}

#[test]
fn execution_without_output_field_parses() {
    let execution: Execution =
        serde_json::from_value(json!({"id": "exec-2", "status": "running"})).unwrap();
    assert_eq!(execution.status, ExecutionStatus::Running);
    assert!(execution.output.is_none());
}

#[test]
fn agent_tolerates_missing_optional_fields() {
    let agent: Agent = serde_json::from_value(json!({"id": "a-1"})).unwrap();
    assert_eq!(agent.id.as_str(), "a-1");
    assert!(agent.name.is_empty());
}
