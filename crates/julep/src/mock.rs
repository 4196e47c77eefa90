//! In-memory platform for tests.
//!
//! Holds agents and tasks in memory, counts creations, records execution
//! inputs, and replays a scripted sequence of execution states.

use crate::{
    Platform,
    types::{Agent, CreateAgent, Execution, ExecutionStatus, Task},
};
use anyhow::{Result, anyhow, bail};
use compact_str::{CompactString, format_compact};
use serde_json::Value;
use std::{collections::VecDeque, sync::Mutex};

/// A scripted, in-memory [`Platform`].
///
/// `get_execution` pops scripted states in order and keeps returning the
/// last one once the script is down to a single entry.
#[derive(Default)]
pub struct MockPlatform {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    agents: Vec<Agent>,
    tasks: Vec<(CompactString, Task)>,
    definitions: Vec<Value>,
    script: VecDeque<Execution>,
    inputs: Vec<(CompactString, Value)>,
    agents_created: usize,
    tasks_created: usize,
    polls: usize,
    submit_error: Option<String>,
    poll_error: Option<String>,
}

impl MockPlatform {
    /// Create an empty platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing agent.
    pub fn with_agent(self, agent: Agent) -> Self {
        self.lock().agents.push(agent);
        self
    }

    /// Seed an existing task under `agent_id`.
    pub fn with_task(self, agent_id: &str, task: Task) -> Self {
        self.lock().tasks.push((agent_id.into(), task));
        self
    }

    /// Script the states returned by `get_execution`.
    pub fn with_script(self, states: impl IntoIterator<Item = Execution>) -> Self {
        self.lock().script.extend(states);
        self
    }

    /// Make `create_execution` fail with `message`.
    pub fn with_submit_error(self, message: &str) -> Self {
        self.lock().submit_error = Some(message.to_owned());
        self
    }

    /// Make `get_execution` fail with `message`.
    pub fn with_poll_error(self, message: &str) -> Self {
        self.lock().poll_error = Some(message.to_owned());
        self
    }

    /// Number of agents created through the platform.
    pub fn agents_created(&self) -> usize {
        self.lock().agents_created
    }

    /// Number of tasks created through the platform.
    pub fn tasks_created(&self) -> usize {
        self.lock().tasks_created
    }

    /// Number of `get_execution` calls.
    pub fn polls(&self) -> usize {
        self.lock().polls
    }

    /// Task definitions passed to `create_task`.
    pub fn definitions(&self) -> Vec<Value> {
        self.lock().definitions.clone()
    }

    /// `(task_id, input)` pairs passed to `create_execution`.
    pub fn inputs(&self) -> Vec<(CompactString, Value)> {
        self.lock().inputs.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("mock platform lock poisoned")
    }
}

impl Platform for MockPlatform {
    async fn list_agents(&self) -> Result<Vec<Agent>> {
        Ok(self.lock().agents.clone())
    }

    async fn create_agent(&self, agent: &CreateAgent) -> Result<Agent> {
        let mut state = self.lock();
        state.agents_created += 1;
        let created = Agent {
            id: format_compact!("agent-{}", state.agents.len() + 1),
            name: agent.name.clone(),
            model: agent.model.clone(),
            about: agent.about.clone(),
        };
        state.agents.push(created.clone());
        Ok(created)
    }

    async fn list_tasks(&self, agent_id: &str) -> Result<Vec<Task>> {
        Ok(self
            .lock()
            .tasks
            .iter()
            .filter(|(owner, _)| owner == agent_id)
            .map(|(_, task)| task.clone())
            .collect())
    }

    async fn create_task(&self, agent_id: &str, definition: &Value) -> Result<Task> {
        let mut state = self.lock();
        state.tasks_created += 1;
        let created = Task {
            id: format_compact!("task-{}", state.tasks.len() + 1),
            name: definition
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .into(),
            description: definition
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        };
        state.tasks.push((agent_id.into(), created.clone()));
        state.definitions.push(definition.clone());
        Ok(created)
    }

    async fn create_execution(&self, task_id: &str, input: &Value) -> Result<Execution> {
        let mut state = self.lock();
        if let Some(message) = &state.submit_error {
            bail!("{message}");
        }
        state.inputs.push((task_id.into(), input.clone()));
        Ok(Execution::new(
            format_compact!("exec-{}", state.inputs.len()),
            ExecutionStatus::Queued,
        ))
    }

    async fn get_execution(&self, _execution_id: &str) -> Result<Execution> {
        let mut state = self.lock();
        state.polls += 1;
        if let Some(message) = &state.poll_error {
            bail!("{message}");
        }
        if state.script.len() > 1 {
            return state
                .script
                .pop_front()
                .ok_or_else(|| anyhow!("execution script exhausted"));
        }
        state
            .script
            .front()
            .cloned()
            .ok_or_else(|| anyhow!("execution script exhausted"))
    }
}
