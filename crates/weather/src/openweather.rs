//! OpenWeatherMap current-weather client.

use crate::Weather;
use anyhow::{Result, bail};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Number;
use std::fmt;

/// The OpenWeatherMap current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap client.
///
/// Request timeouts belong to the `reqwest::Client` passed in.
#[derive(Clone)]
pub struct OpenWeather {
    client: Client,
    api_key: String,
    endpoint: String,
    units: String,
}

impl OpenWeather {
    /// Create a client for the public OpenWeatherMap endpoint.
    pub fn new(client: Client, api_key: &str) -> Self {
        Self::custom(client, api_key, DEFAULT_ENDPOINT)
    }

    /// Create a client for a custom endpoint (proxies, tests).
    pub fn custom(client: Client, api_key: &str, endpoint: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: endpoint.to_owned(),
            units: "metric".to_owned(),
        }
    }

    /// Override the unit system sent to the provider.
    pub fn with_units(mut self, units: &str) -> Self {
        self.units = units.to_owned();
        self
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and parse the current weather for `city`.
    ///
    /// Unlike [`Weather::current`], failures are returned to the caller.
    pub async fn fetch(&self, city: &str) -> Result<Report> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("weather provider returned {status}");
        }

        let text = response.text().await?;
        tracing::trace!("weather response: {text}");
        Report::from_json(&text)
    }
}

impl Weather for OpenWeather {
    async fn current(&self, city: &str) -> Option<String> {
        if self.api_key.is_empty() {
            tracing::debug!("no weather api key configured, skipping lookup for {city}");
            return None;
        }

        match self.fetch(city).await {
            Ok(report) => Some(report.to_string()),
            Err(e) => {
                tracing::warn!("weather lookup for {city} failed: {e}");
                None
            }
        }
    }
}

/// Current conditions extracted from a provider response.
///
/// Displays as `"<Description>, <temp>°C, <humidity>% humidity"`. Numbers
/// keep the provider's formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Condition text, e.g. `clear sky`.
    pub description: String,
    /// Temperature in the requested units.
    pub temp: Number,
    /// Relative humidity in percent.
    pub humidity: Number,
}

impl Report {
    /// Parse a provider response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: RawReport = serde_json::from_str(body)?;
        let Some(condition) = raw.weather.into_iter().next() else {
            bail!("weather response has no conditions");
        };
        Ok(Self {
            description: condition.description,
            temp: raw.main.temp,
            humidity: raw.main.humidity,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}°C, {}% humidity",
            capitalize(&self.description),
            self.temp,
            self.humidity
        )
    }
}

#[derive(Deserialize)]
struct RawReport {
    weather: Vec<Condition>,
    main: Main,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
}

#[derive(Deserialize)]
struct Main {
    temp: Number,
    humidity: Number,
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
