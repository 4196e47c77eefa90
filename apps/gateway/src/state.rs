//! Shared application state for the gateway server.

use julep::Platform;
use std::sync::Arc;
use tour::{Coordinator, PollPolicy, Provisioned};
use weather::Weather;

/// Shared state available to all request handlers.
///
/// Built once at startup and read-only afterwards.
pub struct AppState<W: Weather, P: Platform> {
    /// Weather source for tour input.
    pub weather: Arc<W>,
    /// Tour runner bound to the provisioned task.
    pub tours: Arc<Coordinator<P>>,
    /// Agent and task resolved at startup.
    pub provisioned: Arc<Provisioned>,
}

impl<W: Weather, P: Platform> AppState<W, P> {
    /// Wire a weather source and platform to the provisioned task.
    pub fn new(weather: W, platform: Arc<P>, provisioned: Provisioned, policy: PollPolicy) -> Self {
        let tours = Coordinator::new(platform, provisioned.task.clone(), policy);
        Self {
            weather: Arc::new(weather),
            tours: Arc::new(tours),
            provisioned: Arc::new(provisioned),
        }
    }
}

impl<W: Weather, P: Platform> Clone for AppState<W, P> {
    fn clone(&self) -> Self {
        Self {
            weather: Arc::clone(&self.weather),
            tours: Arc::clone(&self.tours),
            provisioned: Arc::clone(&self.provisioned),
        }
    }
}
