//! Client for the Julep agent platform.
//!
//! Covers the slice of the REST API a foodie tour needs: agents, tasks
//! under an agent, and task executions. [`Platform`] is the seam the rest
//! of the workspace depends on; [`Julep`] is the HTTP implementation.

pub use client::{DEFAULT_BASE_URL, Julep, PAGE_SIZE};
pub use http::HttpClient;
#[cfg(feature = "test-utils")]
pub use mock::MockPlatform;
pub use types::{Agent, CreateAgent, Execution, ExecutionStatus, Task};

use anyhow::Result;
use serde_json::Value;

mod client;
mod http;
#[cfg(feature = "test-utils")]
mod mock;
mod types;

/// Operations consumed from the agent platform.
///
/// Listing methods return every item, walking pages as needed.
pub trait Platform: Send + Sync {
    /// List all agents on the account.
    fn list_agents(&self) -> impl Future<Output = Result<Vec<Agent>>> + Send;

    /// Create an agent.
    fn create_agent(&self, agent: &CreateAgent) -> impl Future<Output = Result<Agent>> + Send;

    /// List all tasks owned by an agent.
    fn list_tasks(&self, agent_id: &str) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// Create a task under an agent from a workflow definition.
    fn create_task(
        &self,
        agent_id: &str,
        definition: &Value,
    ) -> impl Future<Output = Result<Task>> + Send;

    /// Start an execution of a task with the given input.
    fn create_execution(
        &self,
        task_id: &str,
        input: &Value,
    ) -> impl Future<Output = Result<Execution>> + Send;

    /// Fetch the current state of an execution.
    fn get_execution(&self, execution_id: &str) -> impl Future<Output = Result<Execution>> + Send;
}
