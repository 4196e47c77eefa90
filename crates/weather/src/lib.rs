//! Current-weather lookup used to enrich tour requests.
//!
//! Weather is optional input to a tour. Every lookup failure collapses to
//! `None` and is logged, so callers never handle weather errors.

pub use openweather::{DEFAULT_ENDPOINT, OpenWeather, Report};

mod openweather;

/// A source of current weather conditions.
///
/// Uses RPITIT (no dyn dispatch); the gateway is generic over the source.
pub trait Weather: Send + Sync {
    /// Describe the current weather in `city`, or `None` when unavailable.
    fn current(&self, city: &str) -> impl Future<Output = Option<String>> + Send;
}

/// A weather source that reports the same conditions for every city.
///
/// Useful when running without a weather key or in tests.
#[derive(Debug, Clone, Default)]
pub struct Fixed(pub Option<String>);

impl Weather for Fixed {
    async fn current(&self, _city: &str) -> Option<String> {
        self.0.clone()
    }
}
