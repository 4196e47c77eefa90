//! Foodie tour orchestration on the Julep agent platform.
//!
//! [`provision`] resolves the tour agent and task once at startup.
//! [`Coordinator`] runs one tour per request: it submits an execution and
//! polls it until the platform reports a terminal status.

pub use coordinator::{Coordinator, PollPolicy, TourInput, wait_for};
pub use error::TourError;
pub use provision::{
    AGENT_ABOUT, AGENT_NAME, DEFAULT_MODEL, Provisioned, TASK_NAME, get_or_create_agent,
    get_or_create_task, provision,
};
pub use workflow::{TASK_YAML, definition};

mod coordinator;
mod error;
mod provision;
mod workflow;
