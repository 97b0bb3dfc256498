// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /prove HTTP handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::api::errors::{ApiEnvelope, ApiError};
use crate::api::http_server::AppState;
use crate::crypto::ezkl::EzklError;
use crate::prover::{ProofRequest, ProofResult};

/// POST /prove handler
///
/// # Request Body
/// ```json
/// {
///   "input": { "input_data": [[0, 1, 1, ...]] },
///   "label": 7
/// }
/// ```
///
/// # Response Body
/// ```json
/// {
///   "status": "ok",
///   "res": {
///     "proof": true,
///     "verification": true,
///     "Actual Label": 7,
///     "Predicted Label": 7,
///     "stats": {
///       "witness_generation_time": 0.41,
///       "proof_generation_time": 12.9,
///       "proof_verification_time": 1.2,
///       "total_execution_time": 14.6
///     }
///   }
/// }
/// ```
///
/// Failures come back as `{"status": "error", "message": "..."}` with HTTP
/// 200 unless strict status codes are enabled.
pub async fn prove_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let outcome = match parse_proof_request(&body) {
        Ok(request) => {
            info!(
                "📥 Proof request ({} values, label {:?})",
                request.input.input_data.first().map(Vec::len).unwrap_or(0),
                request.label
            );
            state.service.prove(&request).await.map_err(ApiError::from)
        }
        Err(e) => {
            warn!("Rejected proof request: {}", e);
            Err(ApiError::from(e))
        }
    };

    match outcome {
        Ok(result) => (StatusCode::OK, Json(ApiEnvelope::ok(result))).into_response(),
        Err(e) => {
            let status = if state.config.strict_status_codes {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            } else {
                StatusCode::OK
            };
            (status, Json(e.to_envelope::<ProofResult>())).into_response()
        }
    }
}

/// Decode a proof request body
pub fn parse_proof_request(body: &[u8]) -> Result<ProofRequest, EzklError> {
    serde_json::from_slice(body)
        .map_err(|e| EzklError::invalid_input(format!("malformed proof request: {}", e)))
}
