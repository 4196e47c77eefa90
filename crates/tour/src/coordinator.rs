//! Tour execution: submit, poll until terminal, extract the itinerary.

use crate::TourError;
use compact_str::CompactString;
use julep::{Execution, ExecutionStatus, Platform, Task};
use serde::Serialize;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio::time;

/// How often and how long to poll an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed delay between status checks.
    pub interval: Duration,
    /// Status checks before giving up with [`TourError::Timeout`].
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 600,
        }
    }
}

/// Execution input for one tour.
///
/// `weather` serializes as `null` when the lookup produced nothing, and
/// `dietary_preferences` when the caller sent an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourInput {
    pub city: String,
    pub weather: Option<String>,
    pub dietary_preferences: Option<String>,
}

/// Runs tours against the provisioned task.
pub struct Coordinator<P> {
    platform: Arc<P>,
    task: Task,
    policy: PollPolicy,
}

impl<P: Platform> Coordinator<P> {
    /// Create a coordinator for `task`.
    pub fn new(platform: Arc<P>, task: Task, policy: PollPolicy) -> Self {
        Self {
            platform,
            task,
            policy,
        }
    }

    /// The task tours run against.
    pub fn task(&self) -> &Task {
        &self.task
    }

    /// The poll policy in use.
    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Run one tour and return the itinerary text.
    pub async fn run(&self, input: &TourInput) -> Result<String, TourError> {
        let input = serde_json::to_value(input).map_err(anyhow::Error::from)?;
        let execution = self
            .platform
            .create_execution(&self.task.id, &input)
            .await?;
        tracing::info!("started execution {} of task {}", execution.id, self.task.id);

        let finished = wait_for(self.platform.as_ref(), &execution.id, self.policy).await?;
        match finished.status {
            ExecutionStatus::Succeeded => itinerary(finished.id, finished.output),
            _ => Err(TourError::Failed(failure_reason(finished.error))),
        }
    }
}

/// Poll `execution_id` until it is terminal or `policy` runs out.
///
/// The first check happens immediately; later checks wait
/// `policy.interval`. Any non-terminal status, known or not, keeps polling.
pub async fn wait_for<P: Platform>(
    platform: &P,
    execution_id: &str,
    policy: PollPolicy,
) -> Result<Execution, TourError> {
    for attempt in 1..=policy.max_attempts {
        let execution = platform.get_execution(execution_id).await?;
        if execution.status.is_terminal() {
            tracing::debug!(
                "execution {execution_id} {} after {attempt} check(s)",
                execution.status.as_str()
            );
            return Ok(execution);
        }

        tracing::debug!(
            "execution {execution_id} is {} ({attempt}/{})",
            execution.status.as_str(),
            policy.max_attempts
        );
        if attempt < policy.max_attempts {
            time::sleep(policy.interval).await;
        }
    }

    Err(TourError::Timeout {
        id: execution_id.into(),
        attempts: policy.max_attempts,
    })
}

/// The `content` of the last output block.
fn itinerary(id: CompactString, output: Option<Value>) -> Result<String, TourError> {
    let blocks = match output {
        None | Some(Value::Null) => return Err(TourError::EmptyOutput(id)),
        Some(Value::Array(blocks)) => blocks,
        Some(other) => {
            return Err(TourError::MalformedOutput {
                id,
                output: other.to_string(),
            });
        }
    };

    let Some(last) = blocks.into_iter().last() else {
        return Err(TourError::EmptyOutput(id));
    };
    match last.get("content") {
        Some(Value::String(text)) if text.is_empty() => Err(TourError::EmptyOutput(id)),
        Some(Value::String(text)) => Ok(text.clone()),
        _ => Err(TourError::MalformedOutput {
            id,
            output: last.to_string(),
        }),
    }
}

fn failure_reason(error: Option<Value>) -> String {
    match error {
        Some(Value::String(text)) if !text.is_empty() => text,
        None | Some(Value::Null) | Some(Value::String(_)) => "execution failed".to_owned(),
        Some(other) => other.to_string(),
    }
}
