// ABOUTME: In-process HTTP tests for the health and nutrition lookup routes
// ABOUTME: Drives the full router with tower oneshot over a local-only cascade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use dietrack::nutrition::{LocalFoodProvider, NutritionCascade};
use dietrack::routes::NutritionLookupResponse;
use dietrack::server::build_router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let cascade = NutritionCascade::new(vec![Arc::new(LocalFoodProvider)]);
    build_router(Arc::new(cascade))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_service() {
    common::init_test_logging();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "dietrack");
}

// ============================================================================
// Nutrition lookup
// ============================================================================

#[tokio::test]
async fn test_lookup_resolves_foods_in_order() {
    common::init_test_logging();
    let request = post_json(
        "/api/nutrition-lookup",
        &json!({
            "foods": [
                { "name": "uovo", "quantity": 2, "unit": "pz" },
                { "name": "quinotto andino", "quantity": 80, "unit": "g" },
                { "name": "Riso", "quantity": 80, "unit": "g" }
            ]
        }),
    );

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: NutritionLookupResponse =
        serde_json::from_value(body_json(response).await).unwrap();
    assert!(body.success);
    assert_eq!(body.results.len(), 3);

    let eggs = body.results[0].nutrition.as_ref().unwrap();
    assert_eq!(eggs.macros.calories, 155.0);
    assert!(!body.results[0].needs_manual_input);

    assert!(body.results[1].nutrition.is_none());
    assert!(body.results[1].needs_manual_input);

    assert_eq!(body.results[2].name, "Riso");
    assert_eq!(body.results[2].nutrition.as_ref().unwrap().macros.calories, 104.0);
}

#[tokio::test]
async fn test_lookup_serializes_camel_case_fields() {
    common::init_test_logging();
    let request = post_json(
        "/api/nutrition-lookup",
        &json!({ "foods": [{ "name": "mela", "quantity": 1, "unit": "pz" }] }),
    );

    let body = body_json(app().oneshot(request).await.unwrap()).await;

    let result = &body["results"][0];
    assert_eq!(result["needsManualInput"], false);
    assert_eq!(result["nutrition"]["source"], "local");
    assert_eq!(result["nutrition"]["confidence"], "high");
}

#[tokio::test]
async fn test_lookup_without_foods_is_bad_request() {
    common::init_test_logging();
    for payload in [json!({ "foods": [] }), json!({})] {
        let response = app()
            .oneshot(post_json("/api/nutrition-lookup", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["message"], "No foods provided");
    }
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    common::init_test_logging();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/nutrition-lookup")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
