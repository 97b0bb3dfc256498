// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests for the informational endpoints
//!
//! These tests verify that:
//! - GET / returns the welcome envelope
//! - GET /health reports the backend and circuit shape
//! - GET /metrics serves Prometheus text
//! - /prove only accepts POST

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use ethers::types::Address;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use zkml_mnist_node::{
    api::{create_app, ApiConfig, AppState},
    crypto::ezkl::{CircuitSettings, MockBackend},
    prover::{ProvingService, ServiceOptions},
};

fn test_state() -> AppState {
    let settings = CircuitSettings::from_json(r#"{"model_output_scales": [7]}"#).unwrap();
    let service = ProvingService::new(
        Arc::new(MockBackend::new(784, 7)),
        settings,
        ServiceOptions {
            verifier: Some(Address::zero()),
            ..Default::default()
        },
    );
    AppState::new(service, ApiConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_index_returns_welcome() {
    let app = create_app(test_state());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "ok", "res": "Welcome to ezkl proving server"})
    );
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = create_app(test_state());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["res"]["backend"], "mock");
    assert_eq!(body["res"]["input_len"], 784);
    assert_eq!(body["res"]["verification_enabled"], true);
}

#[tokio::test]
async fn test_metrics_is_prometheus_text() {
    let app = create_app(test_state());
    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("zkml_prove_requests_total 0"));
}

#[tokio::test]
async fn test_prove_rejects_get() {
    let app = create_app(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/prove")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
