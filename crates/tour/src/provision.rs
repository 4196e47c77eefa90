//! Idempotent bootstrap of the tour agent and task.
//!
//! Both lookups match by exact name and create only when nothing matches,
//! so restarts reuse what earlier runs created. Two processes starting at
//! the same time can still both create; startup is assumed single-process.

use crate::workflow;
use anyhow::{Context, Result};
use julep::{Agent, CreateAgent, Platform, Task};

/// Name of the tour agent.
pub const AGENT_NAME: &str = "Foodie Tour Agent";

/// Description given to a newly created tour agent.
pub const AGENT_ABOUT: &str =
    "An AI chef and travel planner that creates city-based foodie experiences.";

/// Model used when creating the tour agent.
pub const DEFAULT_MODEL: &str = "claude-3.5-sonnet";

/// Name of the tour task.
pub const TASK_NAME: &str = "City Foodie Tour";

/// The agent and task resolved at startup. Immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Provisioned {
    /// The tour agent.
    pub agent: Agent,
    /// The tour task owned by [`agent`](Self::agent).
    pub task: Task,
}

/// Resolve the tour agent and task, creating whichever is missing.
pub async fn provision<P: Platform>(platform: &P, model: &str) -> Result<Provisioned> {
    let agent = get_or_create_agent(platform, model).await?;
    let task = get_or_create_task(platform, &agent).await?;
    Ok(Provisioned { agent, task })
}

/// Return the first agent named [`AGENT_NAME`], creating it if absent.
pub async fn get_or_create_agent<P: Platform>(platform: &P, model: &str) -> Result<Agent> {
    let agents = platform
        .list_agents()
        .await
        .context("failed to list agents")?;
    if let Some(agent) = agents.into_iter().find(|a| a.name == AGENT_NAME) {
        tracing::info!("reusing agent '{AGENT_NAME}' ({})", agent.id);
        return Ok(agent);
    }

    let agent = platform
        .create_agent(&CreateAgent {
            name: AGENT_NAME.into(),
            model: model.into(),
            about: AGENT_ABOUT.to_owned(),
        })
        .await
        .context("failed to create agent")?;
    tracing::info!("created agent '{AGENT_NAME}' ({}) on {model}", agent.id);
    Ok(agent)
}

/// Return the first task of `agent` named [`TASK_NAME`], creating it if absent.
pub async fn get_or_create_task<P: Platform>(platform: &P, agent: &Agent) -> Result<Task> {
    let tasks = platform
        .list_tasks(&agent.id)
        .await
        .with_context(|| format!("failed to list tasks of agent {}", agent.id))?;
    if let Some(task) = tasks.into_iter().find(|t| t.name == TASK_NAME) {
        tracing::info!("reusing task '{TASK_NAME}' ({})", task.id);
        return Ok(task);
    }

    let definition = workflow::definition()?;
    let task = platform
        .create_task(&agent.id, &definition)
        .await
        .context("failed to create task")?;
    tracing::info!("created task '{TASK_NAME}' ({})", task.id);
    Ok(task)
}
