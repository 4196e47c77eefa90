//! Gateway configuration loaded from TOML.
//!
//! Every field has a default. `${VAR}` patterns are expanded from the
//! environment before parsing, which is how the default template picks up
//! `WEATHER_API` and `JULEP_API_KEY`.

use anyhow::{Context, Result, bail};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tour::PollPolicy;

/// Configuration used when no file is given.
pub const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 5000

[weather]
api_key = "${WEATHER_API}"

[julep]
api_key = "${JULEP_API_KEY}"
"#;

/// Top-level gateway configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather provider configuration.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Agent platform configuration.
    #[serde(default)]
    pub julep: JulepConfig,
    /// Execution polling configuration.
    #[serde(default)]
    pub poll: PollConfig,
}

/// Server configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5000,
        }
    }
}

/// Weather provider configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. Empty disables weather lookups.
    pub api_key: String,
    /// Current-weather endpoint URL.
    pub endpoint: String,
    /// Unit system requested from the provider.
    pub units: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: weather::DEFAULT_ENDPOINT.to_owned(),
            units: "metric".to_owned(),
            timeout_secs: 10,
        }
    }
}

/// Agent platform configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct JulepConfig {
    /// Julep API key.
    pub api_key: String,
    /// API base URL.
    pub base_url: String,
    /// Model for a newly created tour agent.
    pub model: CompactString,
}

impl Default for JulepConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: julep::DEFAULT_BASE_URL.to_owned(),
            model: tour::DEFAULT_MODEL.into(),
        }
    }
}

/// Execution polling configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between status checks in milliseconds.
    pub interval_ms: u64,
    /// Status checks before a tour times out.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        let policy = PollPolicy::default();
        Self {
            interval_ms: policy.interval.as_millis() as u64,
            max_attempts: policy.max_attempts,
        }
    }
}

impl GatewayConfig {
    /// Parse a TOML string, expanding environment variables first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        if expanded == toml_str {
            return Ok(toml::from_str(toml_str)?);
        }
        toml::from_str(&expanded).context(
            "config is invalid after expanding ${VAR} references; \
             substituted values must not contain unescaped '\"' or '\\'",
        )
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Build configuration from [`DEFAULT_CONFIG`] and the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// The `host:port` address to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The poll policy for tour executions.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll.interval_ms),
            max_attempts: self.poll.max_attempts,
        }
    }

    /// Check the configuration can serve tours.
    ///
    /// A missing weather key is allowed; tours then run without weather.
    pub fn validate(&self) -> Result<()> {
        if self.julep.api_key.is_empty() {
            bail!("julep api key is required (set JULEP_API_KEY)");
        }
        if self.poll.max_attempts == 0 {
            bail!("poll.max_attempts must be at least 1");
        }
        if self.weather.api_key.is_empty() {
            tracing::warn!("no weather api key configured (WEATHER_API), tours run without weather");
        }
        Ok(())
    }
}
