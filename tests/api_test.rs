mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{amber_summary, friday_summary, ScriptedEngine};
use prancing_pony::api::{build_router, AppState};
use prancing_pony::EngineError;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app(engine: Arc<ScriptedEngine>) -> Router {
    build_router(AppState::in_memory(engine, Duration::from_secs(5)))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_customer(app: &Router) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/customers",
        Some(json!({"organization_name": "Bree Trading Co", "industry": "Hospitality"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app(ScriptedEngine::new());

    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));

    let (status, body) = call(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Prancing Pony"));
}

#[tokio::test]
async fn test_meeting_summary_flow() {
    let engine = ScriptedEngine::new();
    let app = app(engine.clone());
    let customer_id = create_customer(&app).await;

    let (status, event) = call(
        &app,
        Method::POST,
        "/api/events/meetings",
        Some(json!({
            "customer_id": customer_id,
            "timestamp": "2025-11-04T09:30:00",
            "location": "Zoom",
            "transcript": "Alice: let's ship by Friday. Bob: agreed."
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["event_type"], "meeting");
    assert_eq!(event["timestamp"], "2025-11-04T09:30:00");
    assert_eq!(event["participants"], json!(["Alice", "Bob"]));
    let event_id = event["id"].as_str().unwrap().to_string();
    let summary_uri = format!("/api/events/{}/summary", event_id);

    let (status, body) = call(&app, Method::GET, &summary_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    engine.reply(friday_summary());
    let (status, body) = call(&app, Method::POST, &summary_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "tldr": "Team commits to Friday ship date",
            "action_items": ["Ship by Friday"],
            "sentiment": "green",
            "sentiment_explanation": "Agreement reached"
        })
    );

    engine.reply(amber_summary());
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("{}/regenerate", summary_uri),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "amber");

    let (_, body) = call(&app, Method::GET, &summary_uri, None).await;
    assert_eq!(body["sentiment"], "amber");

    let (status, _) = call(&app, Method::DELETE, &format!("/api/events/{}", event_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, &format!("/api/events/{}", event_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::GET, &summary_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::DELETE, &format!("/api/events/{}", event_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_status_mapping() {
    let engine = ScriptedEngine::new();
    let app = app(engine.clone());
    let customer_id = create_customer(&app).await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/events/meetings",
        Some(json!({"customer_id": customer_id, "timestamp": "not a time"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/events/meetings",
        Some(json!({"customer_id": "not-a-uuid", "timestamp": "2025-11-04T09:30:00"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::GET,
        "/api/events/customer/8f2b5c36-4a55-4e8e-9b43-0c1b8a4b1e11",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for (method, uri) in [
        (Method::GET, "/api/events/not-a-uuid"),
        (Method::GET, "/api/events/not-a-uuid/summary"),
        (Method::POST, "/api/events/not-a-uuid/summary/regenerate"),
        (Method::DELETE, "/api/events/not-a-uuid"),
        (Method::GET, "/api/events/customer/not-a-uuid"),
        (Method::GET, "/api/customers/not-a-uuid"),
    ] {
        let (status, body) = call(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].as_str().unwrap().contains("not-a-uuid"), "{}", uri);
    }

    let (status, event) = call(
        &app,
        Method::POST,
        "/api/events/meetings",
        Some(json!({
            "customer_id": customer_id,
            "timestamp": "2025-11-04 08:00Z",
            "location": "Common room ".repeat(40)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["timestamp"], "2025-11-04 08:00Z");

    let (_, empty) = call(
        &app,
        Method::POST,
        "/api/events/meetings",
        Some(json!({"customer_id": customer_id, "timestamp": "2025-11-04T09:30:00"})),
    )
    .await;
    let empty_uri = format!("/api/events/{}/summary", empty["id"].as_str().unwrap());
    let (status, _) = call(&app, Method::POST, &empty_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, event) = call(
        &app,
        Method::POST,
        "/api/events/meetings",
        Some(json!({
            "customer_id": customer_id,
            "timestamp": "2025-11-04T10:30:00",
            "transcript": "Carol: the renewal is at risk"
        })),
    )
    .await;
    let summary_uri = format!("/api/events/{}/summary", event["id"].as_str().unwrap());

    engine.fail(EngineError::Unavailable("down".to_string()));
    let (status, _) = call(&app, Method::POST, &summary_uri, None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    engine.fail(EngineError::Timeout(Duration::from_secs(60)));
    let (status, _) = call(&app, Method::POST, &summary_uri, None).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

    let (status, _) = call(&app, Method::GET, &summary_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customer_crud_and_cascade() {
    let engine = ScriptedEngine::new();
    let app = app(engine.clone());
    let customer_id = create_customer(&app).await;
    let customer_uri = format!("/api/customers/{}", customer_id);

    let (status, body) = call(
        &app,
        Method::PUT,
        &customer_uri,
        Some(json!({"notes": "Prefers morning calls"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organization_name"], "Bree Trading Co");
    assert_eq!(body["notes"], "Prefers morning calls");

    let (status, _) = call(
        &app,
        Method::PUT,
        &customer_uri,
        Some(json!({"primary_contact_email": "no-at-sign"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, event) = call(
        &app,
        Method::POST,
        "/api/events/meetings",
        Some(json!({
            "customer_id": customer_id,
            "timestamp": "2025-11-04T09:30:00",
            "transcript": "Alice: hello"
        })),
    )
    .await;
    let event_id = event["id"].as_str().unwrap().to_string();
    engine.reply(friday_summary());
    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/events/{}/summary", event_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, Method::DELETE, &customer_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, &customer_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::GET, &format!("/api/events/{}", event_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/events/{}/summary", event_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::DELETE, &customer_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
