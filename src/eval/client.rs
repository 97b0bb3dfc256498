// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the proving service

use super::error::{EvalError, EvalResult};
use crate::api::ApiEnvelope;
use crate::prover::{ProofRequest, ProofResult};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProverClient {
    http: reqwest::Client,
    prove_url: String,
}

impl ProverClient {
    /// `prove_url` is the full endpoint, e.g. `http://127.0.0.1:8000/prove`
    pub fn new(prove_url: impl Into<String>, timeout: Option<Duration>) -> EvalResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            prove_url: prove_url.into(),
        })
    }

    pub fn prove_url(&self) -> &str {
        &self.prove_url
    }

    /// Submit one sample; success means HTTP 200 and `status == "ok"`
    pub async fn prove(&self, request: &ProofRequest) -> EvalResult<ProofResult> {
        let response = self.http.post(&self.prove_url).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("POST {} -> {} ({} bytes)", self.prove_url, status, body.len());

        if status != StatusCode::OK {
            return Err(EvalError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope<ProofResult> =
            serde_json::from_str(&body).map_err(|e| EvalError::InvalidResponse {
                reason: format!("{}: {}", e, body),
            })?;

        envelope
            .into_result()
            .map_err(|message| EvalError::Service { message })
    }
}
