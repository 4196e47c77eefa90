//! Foodie gateway: application shell composing the weather lookup, tour
//! provisioning and execution, and the HTTP endpoint.

pub mod config;
pub mod router;
pub mod serve;
pub mod state;
pub mod utils;

pub use config::GatewayConfig;
pub use router::{TourRequest, TourResponse, router};
pub use serve::{ServeHandle, build_state, serve, serve_with_config};
pub use state::AppState;
