//! Julep REST API implementation of [`Platform`].

use crate::{
    Platform,
    http::HttpClient,
    types::{Agent, CreateAgent, Execution, Page, Task},
};
use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// The hosted Julep API.
pub const DEFAULT_BASE_URL: &str = "https://api.julep.ai/api";

/// Items requested per page when listing.
pub const PAGE_SIZE: usize = 100;

/// The Julep agent platform client.
#[derive(Clone)]
pub struct Julep {
    http: HttpClient,
}

impl Julep {
    /// Create a client for the hosted API.
    pub fn new(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, DEFAULT_BASE_URL)
    }

    /// Create a client for a custom base URL (self-hosted, tests).
    pub fn custom(client: Client, key: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::bearer(client, key, base_url)?,
        })
    }

    /// Get the underlying transport.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch every page of a list endpoint.
    ///
    /// Stops at the first page shorter than [`PAGE_SIZE`].
    async fn list_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset = 0;
        loop {
            let page: Page<T> = self
                .http
                .get(path, &[("limit", PAGE_SIZE), ("offset", offset)])
                .await?;
            let count = page.items.len();
            items.extend(page.items);
            if count < PAGE_SIZE {
                return Ok(items);
            }
            offset += count;
        }
    }
}

impl Platform for Julep {
    async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.list_all("/agents").await
    }

    async fn create_agent(&self, agent: &CreateAgent) -> Result<Agent> {
        self.http.post("/agents", agent).await
    }

    async fn list_tasks(&self, agent_id: &str) -> Result<Vec<Task>> {
        self.list_all(&format!("/agents/{agent_id}/tasks")).await
    }

    async fn create_task(&self, agent_id: &str, definition: &Value) -> Result<Task> {
        self.http
            .post(&format!("/agents/{agent_id}/tasks"), definition)
            .await
    }

    async fn create_execution(&self, task_id: &str, input: &Value) -> Result<Execution> {
        self.http
            .post(
                &format!("/tasks/{task_id}/executions"),
                &json!({ "input": input }),
            )
            .await
    }

    async fn get_execution(&self, execution_id: &str) -> Result<Execution> {
        self.http
            .get(&format!("/executions/{execution_id}"), &[] as &[(&str, &str)])
            .await
    }
}
