// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Strict status code mode (ZKML_STRICT_STATUS_CODES)

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use zkml_mnist_node::{
    api::{create_app, ApiConfig, AppState},
    crypto::ezkl::{CircuitSettings, MockBackend},
    prover::{ProofRequest, ProvingService, ServiceOptions},
};

fn strict_app(backend: MockBackend, options: ServiceOptions) -> Router {
    let settings = CircuitSettings::from_json(r#"{"model_output_scales": [7]}"#).unwrap();
    let service = ProvingService::new(Arc::new(backend), settings, options);
    let config = ApiConfig {
        strict_status_codes: true,
        ..Default::default()
    };
    create_app(AppState::new(service, config))
}

async fn post(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/prove")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_strict_size_mismatch_is_400() {
    let app = strict_app(MockBackend::new(784, 7), ServiceOptions::default());
    let body = serde_json::to_string(&ProofRequest::new(vec![0.0; 10], 1)).unwrap();

    let (status, json) = post(app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_strict_malformed_body_is_400() {
    let app = strict_app(MockBackend::new(784, 7), ServiceOptions::default());
    let (status, _) = post(app, "not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_strict_stage_timeout_is_504() {
    let options = ServiceOptions {
        stage_timeout: Some(Duration::from_millis(10)),
        ..Default::default()
    };
    let app = strict_app(
        MockBackend::new(784, 7).with_stage_delay(Duration::from_millis(250)),
        options,
    );
    let body = serde_json::to_string(&ProofRequest::new(vec![0.0; 784], 1)).unwrap();

    let (status, json) = post(app, body).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(json["message"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_strict_success_is_200() {
    let app = strict_app(MockBackend::new(784, 7).predicting(3), ServiceOptions::default());
    let body = serde_json::to_string(&ProofRequest::new(vec![0.0; 784], 3)).unwrap();

    let (status, json) = post(app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["res"]["Predicted Label"], 3);
    // No verifier configured: verification skipped
    assert_eq!(json["res"]["verification"], Value::Null);
}
