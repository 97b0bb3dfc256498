// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use super::errors::ApiEnvelope;
use super::http_server::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to ezkl proving server";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub backend: String,
    pub version: serde_json::Value,
    pub input_len: usize,
    pub num_classes: usize,
    pub verification_enabled: bool,
}

/// GET /
pub async fn index_handler() -> Json<ApiEnvelope<&'static str>> {
    Json(ApiEnvelope::ok(WELCOME_MESSAGE))
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<ApiEnvelope<HealthResponse>> {
    let options = state.service.options();
    Json(ApiEnvelope::ok(HealthResponse {
        backend: state.service.backend().kind().to_string(),
        version: crate::version::get_version_info(),
        input_len: options.input_len,
        num_classes: options.num_classes,
        verification_enabled: options.verifier.is_some(),
    }))
}

/// GET /metrics in Prometheus text format
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.service.metrics().export_prometheus(),
    )
}
