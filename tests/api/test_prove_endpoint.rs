// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /prove tests against the mock backend
//!
//! These tests verify that:
//! - A well-formed digit produces an ok envelope with proof, labels and stats
//! - The predicted label follows the submitted pixels
//! - Structured verifier output is passed through unchanged
//! - Size mismatches and malformed bodies come back as error envelopes (HTTP 200)
//! - A prove stage with no proof payload is a soft failure, not an error
//! - Identical submissions produce independent results

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use ethers::types::Address;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use zkml_mnist_node::{
    api::{create_app, ApiConfig, AppState},
    crypto::ezkl::{CircuitSettings, MockBackend},
    prover::{ProofRequest, ProvingService, ServiceOptions},
};

fn app_with(backend: MockBackend) -> Router {
    let settings = CircuitSettings::from_json(r#"{"model_output_scales": [7]}"#).unwrap();
    let service = ProvingService::new(
        Arc::new(backend),
        settings,
        ServiceOptions {
            verifier: Some(Address::zero()),
            ..Default::default()
        },
    );
    create_app(AppState::new(service, ApiConfig::default()))
}

fn digit_seven() -> Vec<f64> {
    // Horizontal bar across row 5, diagonal stroke down to row 25
    let mut pixels = vec![0.0; 784];
    for col in 6..22 {
        pixels[5 * 28 + col] = 1.0;
    }
    for row in 6..26 {
        pixels[row * 28 + (21 - (row - 6) / 2)] = 1.0;
    }
    pixels
}

fn vertical_bar() -> Vec<f64> {
    let mut pixels = vec![0.0; 784];
    for row in 4..24 {
        pixels[row * 28 + 14] = 1.0;
    }
    pixels
}

/// Blank templates except for a "7" and a "1"
fn digit_templates() -> Vec<Vec<f64>> {
    let mut templates = vec![vec![0.0; 784]; 10];
    templates[7] = digit_seven();
    templates[1] = vertical_bar();
    templates
}

async fn post_prove(app: Router, body: String) -> (StatusCode, Value) {
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
async fn test_prove_known_digit() {
    let app = app_with(MockBackend::new(784, 7).with_templates(digit_templates()));
    let request = ProofRequest::new(digit_seven(), 7);

    let (status, body) = post_prove(app, serde_json::to_string(&request).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let res = &body["res"];
    assert_eq!(res["proof"], true);
    assert_eq!(res["verification"], true);
    assert_eq!(res["Actual Label"], 7);
    assert_eq!(res["Predicted Label"], 7);

    let stats = &res["stats"];
    let witness = stats["witness_generation_time"].as_f64().unwrap();
    let proof = stats["proof_generation_time"].as_f64().unwrap();
    let verify = stats["proof_verification_time"].as_f64().unwrap();
    let total = stats["total_execution_time"].as_f64().unwrap();
    assert!(witness >= 0.0 && proof >= 0.0 && verify >= 0.0);
    assert!(total >= witness + proof + verify);
}

#[tokio::test]
async fn test_predicted_label_follows_pixels() {
    let app = app_with(MockBackend::new(784, 7).with_templates(digit_templates()));

    let request = ProofRequest::new(vertical_bar(), 1);
    let (_, body) = post_prove(app.clone(), serde_json::to_string(&request).unwrap()).await;
    assert_eq!(body["res"]["Predicted Label"], 1);

    let request = ProofRequest::new(digit_seven(), 7);
    let (_, body) = post_prove(app, serde_json::to_string(&request).unwrap()).await;
    assert_eq!(body["res"]["Predicted Label"], 7);
}

#[tokio::test]
async fn test_structured_verification_passed_through() {
    let verification = json!({"verified": true, "gas": 123});
    let app = app_with(
        MockBackend::new(784, 7)
            .predicting(3)
            .with_verification(verification.clone()),
    );
    let request = ProofRequest::new(vec![0.0; 784], 3);

    let (status, body) = post_prove(app, serde_json::to_string(&request).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["res"]["proof"], true);
    assert_eq!(body["res"]["verification"], verification);
}

#[tokio::test]
async fn test_predicted_label_in_range() {
    let app = app_with(MockBackend::new(784, 7).predicting(9));
    let request = ProofRequest::new(vec![0.0; 784], 4);

    let (_, body) = post_prove(app, serde_json::to_string(&request).unwrap()).await;

    let predicted = body["res"]["Predicted Label"].as_u64().unwrap();
    assert!(predicted <= 9);
    assert_eq!(body["res"]["Actual Label"], 4);
}

#[tokio::test]
async fn test_size_mismatch_is_error_envelope() {
    let app = app_with(MockBackend::new(784, 7));
    let request = ProofRequest::new(vec![1.0; 100], 3);

    let (status, body) = post_prove(app, serde_json::to_string(&request).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(body.get("res").is_none());
}

#[tokio::test]
async fn test_malformed_json_is_error_envelope() {
    let app = app_with(MockBackend::new(784, 7));

    let (status, body) = post_prove(app, "{\"input\": ".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("malformed"));
}

#[tokio::test]
async fn test_missing_input_data_is_error_envelope() {
    let app = app_with(MockBackend::new(784, 7));

    let (_, body) = post_prove(app, json!({"input": {}, "label": 1}).to_string()).await;

    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("input_data"));
}

#[tokio::test]
async fn test_missing_proof_is_soft_failure() {
    let app = app_with(MockBackend::new(784, 7).predicting(2).without_proof());
    let request = ProofRequest::new(vec![0.0; 784], 2);

    let (status, body) = post_prove(app, serde_json::to_string(&request).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["res"]["proof"], false);
    assert_eq!(body["res"]["verification"], Value::Null);
    assert_eq!(body["res"]["stats"]["proof_verification_time"], 0.0);
    assert_eq!(body["res"]["Predicted Label"], 2);
}

#[tokio::test]
async fn test_identical_requests_are_independent() {
    let app = app_with(MockBackend::new(784, 7).predicting(7));
    let body = serde_json::to_string(&ProofRequest::new(digit_seven(), 7)).unwrap();

    let (_, first) = post_prove(app.clone(), body.clone()).await;
    let (_, second) = post_prove(app, body).await;

    for response in [&first, &second] {
        assert_eq!(response["status"], "ok");
        assert_eq!(response["res"]["proof"], true);
        assert_eq!(response["res"]["Predicted Label"], 7);
    }
}
