//! Shared HTTP transport for the Julep REST API.
//!
//! `HttpClient` wraps a `reqwest::Client` with pre-configured headers and
//! the API base URL. Every call returns the decoded JSON body, or an error
//! carrying the status and body text for non-2xx responses.

use anyhow::{Context, Result, bail};
use reqwest::{
    Client, Method, RequestBuilder,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

/// JSON transport bound to one API base URL.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    headers: HeaderMap,
    base_url: String,
}

impl HttpClient {
    /// Create a transport with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Send a GET with query parameters and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &(impl Serialize + ?Sized),
    ) -> Result<T> {
        let request = self.request(Method::GET, path).query(query);
        self.execute(request, Method::GET, path).await
    }

    /// Send a JSON POST and decode the JSON response.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T> {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("POST {path}: {body}");
        }
        let request = self.request(Method::POST, path).json(body);
        self.execute(request, Method::POST, path).await
    }

    /// Resolve `path` against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .headers(self.headers.clone())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::trace!("{method} {path} -> {status}: {text}");

        if !status.is_success() {
            bail!("{method} {path} returned {status}: {text}");
        }
        serde_json::from_str(&text).with_context(|| format!("invalid response from {method} {path}"))
    }
}
