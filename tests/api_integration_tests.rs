//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use math_service::{api::create_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::in_memory(100))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Computation Endpoints ==

#[tokio::test]
async fn test_factorial_of_five() {
    let response = create_test_app()
        .oneshot(post_json("/v1/factorial", r#"{"n":5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["operation"], "factorial");
    assert_eq!(json["n"], 5);
    assert_eq!(json["result"], "120");
    assert_eq!(json["cached"], false);
    assert!(json["duration_ms"].is_number());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_power_four_squared() {
    let response = create_test_app()
        .oneshot(post_json("/v1/power", r#"{"base":4,"exponent":2}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["base"], 4);
    assert_eq!(json["exponent"], 2);
    assert_eq!(json["result"], "16");
}

#[tokio::test]
async fn test_power_negative_base_odd_exponent() {
    let response = create_test_app()
        .oneshot(post_json("/v1/power", r#"{"base":-2,"exponent":3}"#))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["result"], "-8");
}

#[tokio::test]
async fn test_fibonacci_of_eight() {
    let response = create_test_app()
        .oneshot(post_json("/v1/fibonacci", r#"{"n":8}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["result"], "21");
}

#[tokio::test]
async fn test_large_result_is_string() {
    let response = create_test_app()
        .oneshot(post_json("/v1/power", r#"{"base":2,"exponent":100}"#))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["result"], "1267650600228229401496703205376");
}

#[tokio::test]
async fn test_generic_operations_endpoint() {
    let response = create_test_app()
        .oneshot(post_json(
            "/v1/operations",
            r#"{"operation":"power","base":3,"exponent":4}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["operation"], "power");
    assert_eq!(json["result"], "81");
}

// == Cache Behaviour ==

#[tokio::test]
async fn test_repeated_power_reports_cache_hit() {
    let app = create_test_app();

    let first = app
        .clone()
        .oneshot(post_json("/v1/power", r#"{"base":4,"exponent":2}"#))
        .await
        .unwrap();
    let first = body_to_json(first.into_body()).await;
    assert_eq!(first["cached"], false);

    let second = app
        .oneshot(post_json("/v1/power", r#"{"base":4,"exponent":2}"#))
        .await
        .unwrap();
    let second = body_to_json(second.into_body()).await;
    assert_eq!(second["cached"], true);
    assert_eq!(second["result"], first["result"]);
}

#[tokio::test]
async fn test_generic_and_specific_endpoints_share_cache() {
    let app = create_test_app();

    app.clone()
        .oneshot(post_json("/v1/fibonacci", r#"{"n":30}"#))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json("/v1/operations", r#"{"operation":"fibonacci","n":30}"#))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cached"], true);
    assert_eq!(json["result"], "832040");
}

// == Validation Errors ==

#[tokio::test]
async fn test_negative_exponent_rejected() {
    let response = create_test_app()
        .oneshot(post_json("/v1/power", r#"{"base":2,"exponent":-1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["field"], "exponent");
    assert!(json["error"].as_str().unwrap().contains("non-negative"));
}

#[tokio::test]
async fn test_negative_factorial_rejected() {
    let response = create_test_app()
        .oneshot(post_json("/v1/factorial", r#"{"n":-1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["field"], "n");
}

#[tokio::test]
async fn test_negative_fibonacci_rejected() {
    let response = create_test_app()
        .oneshot(post_json("/v1/fibonacci", r#"{"n":-1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_power_is_client_error() {
    let response = create_test_app()
        .oneshot(post_json("/v1/power", r#"{"base":999,"exponent":100}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("bits"));
}

#[tokio::test]
async fn test_unknown_operation_is_client_error() {
    let response = create_test_app()
        .oneshot(post_json("/v1/operations", r#"{"operation":"sqrt","n":4}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_non_integer_operand_is_client_error() {
    let response = create_test_app()
        .oneshot(post_json("/v1/factorial", r#"{"n":2.5}"#))
        .await
        .unwrap();

    // Axum returns 422 for JSON data errors by default
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_invalid_json_request() {
    let response = create_test_app()
        .oneshot(post_json("/v1/power", r#"{"invalid json"#))
        .await
        .unwrap();

    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

// == Stats and Health ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    for body in [r#"{"n":5}"#, r#"{"n":5}"#, r#"{"n":-1}"#] {
        app.clone()
            .oneshot(post_json("/v1/factorial", body))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let factorial = &json["operations"]["factorial"];
    assert_eq!(factorial["completed"], 2);
    assert_eq!(factorial["cache_hits"], 1);
    assert_eq!(factorial["computed"], 1);
    assert_eq!(factorial["rejected"], 1);

    assert_eq!(json["cache"]["hits"], 1);
    assert_eq!(json["cache"]["misses"], 1);
    assert_eq!(json["cache"]["total_entries"], 1);
    assert!(json["cache"].get("hit_rate").is_some());
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Operation History ==

#[tokio::test]
async fn test_history_lists_recent_operations() {
    let app = create_test_app();

    for (uri, body) in [
        ("/v1/power", r#"{"base":4,"exponent":2}"#),
        ("/v1/factorial", r#"{"n":5}"#),
        ("/v1/power", r#"{"base":2,"exponent":3}"#),
        ("/v1/power", r#"{"base":2,"exponent":-1}"#),
    ] {
        app.clone().oneshot(post_json(uri, body)).await.unwrap();
    }

    let response = app
        .clone()
        .oneshot(get("/v1/operations?operation=power&limit=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["operation"], "power");
    assert_eq!(json["total"], 2);
    let operations = json["operations"].as_array().unwrap();
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0]["result"], "8");
    assert_eq!(operations[0]["parameters"]["exponent"], 3);

    let response = app.oneshot(get("/v1/operations")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["operations"][0]["operation"], "power");
    assert_eq!(json["operations"][1]["operation"], "factorial");
}

#[tokio::test]
async fn test_history_rejects_unknown_kind() {
    let response = create_test_app()
        .oneshot(get("/v1/operations?operation=sqrt"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
