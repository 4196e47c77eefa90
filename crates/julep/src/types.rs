//! Wire types for agents, tasks and executions.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An agent on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Platform-assigned identifier.
    pub id: CompactString,
    /// Agent name, unique by convention only.
    #[serde(default)]
    pub name: CompactString,
    /// Model the agent runs on.
    #[serde(default)]
    pub model: CompactString,
    /// Free-form description.
    #[serde(default)]
    pub about: String,
}

/// Request body for creating an agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAgent {
    /// Agent name.
    pub name: CompactString,
    /// Model identifier, e.g. `claude-3.5-sonnet`.
    pub model: CompactString,
    /// Free-form description.
    pub about: String,
}

/// A task definition owned by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Platform-assigned identifier.
    pub id: CompactString,
    /// Task name.
    #[serde(default)]
    pub name: CompactString,
    /// Task description.
    #[serde(default)]
    pub description: String,
}

/// One run of a task.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Execution {
    /// Platform-assigned identifier.
    pub id: CompactString,
    /// Current status.
    pub status: ExecutionStatus,
    /// Step output, present once the execution succeeded.
    #[serde(default)]
    pub output: Option<Value>,
    /// Error payload, present once the execution failed.
    #[serde(default)]
    pub error: Option<Value>,
}

impl Execution {
    /// Create an execution in the given status with no output or error.
    pub fn new(id: impl Into<CompactString>, status: ExecutionStatus) -> Self {
        Self {
            id: id.into(),
            status,
            output: None,
            error: None,
        }
    }

    /// Attach an output payload.
    pub fn with_output(mut self, output: Value) -> Self {
        self.output = Some(output);
        self
    }

    /// Attach an error payload.
    pub fn with_error(mut self, error: Value) -> Self {
        self.error = Some(error);
        self
    }
}

/// Execution status as reported by the platform.
///
/// Only [`Succeeded`](Self::Succeeded) and [`Failed`](Self::Failed) are
/// terminal. Labels this client does not know are kept in
/// [`Other`](Self::Other) and treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CompactString", into = "CompactString")]
pub enum ExecutionStatus {
    Queued,
    Starting,
    Running,
    AwaitingInput,
    Cancelled,
    Succeeded,
    Failed,
    Other(CompactString),
}

impl ExecutionStatus {
    /// Whether polling can stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// The wire label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::AwaitingInput => "awaiting_input",
            Self::Cancelled => "cancelled",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<CompactString> for ExecutionStatus {
    fn from(label: CompactString) -> Self {
        match label.as_str() {
            "queued" => Self::Queued,
            "starting" => Self::Starting,
            "running" => Self::Running,
            "awaiting_input" => Self::AwaitingInput,
            "cancelled" => Self::Cancelled,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            _ => Self::Other(label),
        }
    }
}

impl From<ExecutionStatus> for CompactString {
    fn from(status: ExecutionStatus) -> Self {
        match status {
            ExecutionStatus::Other(label) => label,
            known => CompactString::from(known.as_str()),
        }
    }
}

/// One page of a list response.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
}
