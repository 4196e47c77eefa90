//! HTTP surface: `POST /generate-tour`.

use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use julep::Platform;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tour::TourInput;
use tower_http::cors::CorsLayer;
use weather::Weather;

/// Error text for a missing or empty city.
pub const CITY_REQUIRED: &str = "City is required";

/// Dietary preference used when the request has none.
pub const DEFAULT_DIET: &str = "none";

/// Response body for every outcome.
///
/// Exactly one of `output` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TourResponse {
    /// A successful response carrying the itinerary.
    pub fn ok(output: String) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
        }
    }

    /// A failed response carrying the reason.
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(reason.into()),
        }
    }
}

type Reply = (StatusCode, Json<TourResponse>);

/// Build the axum router with the `/generate-tour` endpoint.
///
/// CORS allows every origin, method and header.
pub fn router<W: Weather + 'static, P: Platform + 'static>(state: AppState<W, P>) -> Router {
    Router::new()
        .route("/generate-tour", post(generate_tour::<W, P>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Validated tour request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourRequest {
    pub city: String,
    /// `None` when the request sent an explicit `null`.
    pub dietary_preferences: Option<String>,
}

impl TourRequest {
    /// Validate a request body.
    ///
    /// `city` must be a non-empty string. `dietary_preferences` falls back
    /// to [`DEFAULT_DIET`] only when the field is missing. An explicit `null`
    /// and an empty string are both forwarded as sent.
    pub fn from_json(body: &Value) -> Result<Self, &'static str> {
        let city = match body.get("city") {
            Some(Value::String(city)) if !city.is_empty() => city.clone(),
            _ => return Err(CITY_REQUIRED),
        };
        let dietary_preferences = match body.get("dietary_preferences") {
            None => Some(DEFAULT_DIET.to_owned()),
            Some(Value::Null) => None,
            Some(Value::String(diet)) => Some(diet.clone()),
            Some(_) => return Err("dietary_preferences must be a string"),
        };
        Ok(Self {
            city,
            dietary_preferences,
        })
    }
}

async fn generate_tour<W: Weather + 'static, P: Platform + 'static>(
    State(state): State<AppState<W, P>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("rejected tour request: {rejection}");
            return reply(StatusCode::BAD_REQUEST, TourResponse::error(rejection.body_text()));
        }
    };
    tracing::trace!("tour request: {body}");

    let request = match TourRequest::from_json(&body) {
        Ok(request) => request,
        Err(reason) => return reply(StatusCode::BAD_REQUEST, TourResponse::error(reason)),
    };

    let weather = state.weather.current(&request.city).await;
    let input = TourInput {
        city: request.city,
        weather,
        dietary_preferences: request.dietary_preferences,
    };

    match state.tours.run(&input).await {
        Ok(itinerary) => {
            tracing::info!("generated tour for {}", input.city);
            reply(StatusCode::OK, TourResponse::ok(itinerary))
        }
        Err(e) => {
            tracing::error!("tour for {} failed: {e}", input.city);
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                TourResponse::error(e.to_string()),
            )
        }
    }
}

fn reply(status: StatusCode, body: TourResponse) -> Reply {
    (status, Json(body))
}
