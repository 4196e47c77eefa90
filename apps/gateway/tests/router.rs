//! `/generate-tour` endpoint tests against in-memory collaborators.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use foodie_gateway::{AppState, TourRequest, router};
use julep::{Agent, Execution, ExecutionStatus, MockPlatform, Task};
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tour::{PollPolicy, Provisioned};
use tower::ServiceExt;
use weather::Fixed;

const PARIS_WEATHER: &str = "Clear sky, 18°C, 60% humidity";

fn provisioned() -> Provisioned {
    Provisioned {
        agent: Agent {
            id: "agent-1".into(),
            name: tour::AGENT_NAME.into(),
            model: tour::DEFAULT_MODEL.into(),
            about: tour::AGENT_ABOUT.to_owned(),
        },
        task: Task {
            id: "task-1".into(),
            name: tour::TASK_NAME.into(),
            description: String::new(),
        },
    }
}

fn app(weather: Option<&str>, platform: &Arc<MockPlatform>) -> Router {
    let policy = PollPolicy {
        interval: Duration::from_millis(1),
        max_attempts: 20,
    };
    let state = AppState::new(
        Fixed(weather.map(str::to_owned)),
        Arc::clone(platform),
        provisioned(),
        policy,
    );
    router(state)
}

fn succeeding(content: &str) -> Arc<MockPlatform> {
    Arc::new(MockPlatform::new().with_script([
        Execution::new("exec-1", ExecutionStatus::Running),
        Execution::new("exec-1", ExecutionStatus::Succeeded)
            .with_output(json!([{"content": content}])),
    ]))
}

async fn post(app: Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-tour")
                .header("content-type", "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn paris_vegetarian_tour_succeeds() {
    let platform = succeeding("Your Parisian food day...");

    let (status, body) = post(
        app(Some(PARIS_WEATHER), &platform),
        r#"{"city": "Paris", "dietary_preferences": "vegetarian"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "output": "Your Parisian food day..."})
    );
    let inputs = platform.inputs();
    assert_eq!(inputs[0].0.as_str(), "task-1");
    assert_eq!(
        inputs[0].1,
        json!({"city": "Paris", "weather": PARIS_WEATHER, "dietary_preferences": "vegetarian"})
    );
}

#[tokio::test]
async fn empty_city_is_rejected() {
    let platform = succeeding("unused");

    let (status, body) = post(app(None, &platform), r#"{"city": ""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "City is required"}));
    assert!(platform.inputs().is_empty());
}

#[tokio::test]
async fn missing_city_is_rejected_whatever_else_is_sent() {
    for request in [
        r#"{}"#,
        r#"{"dietary_preferences": "vegan"}"#,
        r#"{"dietary_preferences": 42}"#,
        r#"{"city": null, "dietary_preferences": "vegan"}"#,
    ] {
        let platform = succeeding("unused");
        let (status, body) = post(app(None, &platform), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "request {request}");
        assert_eq!(body["error"], "City is required", "request {request}");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn absent_diet_defaults_to_none() {
    let platform = succeeding("tour");

    let (status, _) = post(app(None, &platform), r#"{"city": "Lima"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(platform.inputs()[0].1["dietary_preferences"], "none");
}

#[tokio::test]
async fn empty_diet_is_kept() {
    let platform = succeeding("tour");

    let (status, _) = post(
        app(None, &platform),
        r#"{"city": "Lima", "dietary_preferences": ""}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(platform.inputs()[0].1["dietary_preferences"], "");
}

#[tokio::test]
async fn null_diet_is_forwarded_as_null() {
    let platform = succeeding("tour");

    let (status, _) = post(
        app(None, &platform),
        r#"{"city": "Lima", "dietary_preferences": null}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let input = &platform.inputs()[0].1;
    assert!(input["dietary_preferences"].is_null());
    assert!(input.as_object().unwrap().contains_key("dietary_preferences"));
}

#[tokio::test]
async fn missing_weather_still_submits_with_null() {
    let platform = succeeding("indoor dining all day");

    let (status, body) = post(app(None, &platform), r#"{"city": "Oslo"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "indoor dining all day");
    assert!(platform.inputs()[0].1["weather"].is_null());
}

#[tokio::test]
async fn failed_execution_is_500_with_platform_error() {
    let platform = Arc::new(MockPlatform::new().with_script([Execution::new(
        "exec-1",
        ExecutionStatus::Failed,
    )
    .with_error(json!("prompt step crashed"))]));

    let (status, body) = post(app(None, &platform), r#"{"city": "Rome"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "prompt step crashed"}));
}

#[tokio::test]
async fn transport_error_is_500_with_error_text() {
    let platform = Arc::new(MockPlatform::new().with_submit_error("connection reset by peer"));

    let (status, body) = post(app(None, &platform), r#"{"city": "Rome"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("connection reset by peer")
    );
}

#[tokio::test]
async fn stuck_execution_times_out() {
    let platform = Arc::new(
        MockPlatform::new().with_script([Execution::new("exec-1", ExecutionStatus::Running)]),
    );

    let (status, body) = post(app(None, &platform), r#"{"city": "Rome"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("did not finish"));
    assert_eq!(platform.polls(), 20);
}

#[tokio::test]
async fn every_outcome_sets_exactly_one_of_output_and_error() {
    let outcomes = [
        succeeding("a tour"),
        Arc::new(
            MockPlatform::new()
                .with_script([Execution::new("e", ExecutionStatus::Failed)]),
        ),
        Arc::new(MockPlatform::new().with_script([Execution::new(
            "e",
            ExecutionStatus::Succeeded,
        )
        .with_output(json!([]))])),
        Arc::new(MockPlatform::new().with_poll_error("boom")),
    ];

    for platform in &outcomes {
        let (_, body) = post(app(None, platform), r#"{"city": "Kyoto"}"#).await;
        let output = body.get("output").and_then(Value::as_str);
        let error = body.get("error").and_then(Value::as_str);
        match body["success"].as_bool() {
            Some(true) => assert!(output.is_some_and(|o| !o.is_empty()) && error.is_none()),
            Some(false) => assert!(error.is_some_and(|e| !e.is_empty()) && output.is_none()),
            None => panic!("missing success flag: {body}"),
        }
    }
}

#[tokio::test]
async fn malformed_json_is_400_json() {
    let platform = succeeding("unused");

    let (status, body) = post(app(None, &platform), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let platform = succeeding("unused");

    let response = app(None, &platform)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/generate-tour")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[test]
fn request_validation_rules() {
    let ok = TourRequest::from_json(&json!({"city": "Paris"})).unwrap();
    assert_eq!(ok.dietary_preferences.as_deref(), Some("none"));

    let null_diet = TourRequest::from_json(&json!({"city": "Paris", "dietary_preferences": null}));
    assert_eq!(null_diet.unwrap().dietary_preferences, None);

    assert!(TourRequest::from_json(&json!({"city": 7})).is_err());
    assert!(TourRequest::from_json(&json!(["Paris"])).is_err());
    assert_eq!(
        TourRequest::from_json(&json!({"city": "Paris", "dietary_preferences": ["vegan"]})),
        Err("dietary_preferences must be a string")
    );
}
