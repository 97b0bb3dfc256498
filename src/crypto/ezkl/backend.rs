// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Proving backend seam
//!
//! A backend owns the three external stages of the pipeline. Artifact paths
//! (compiled circuit, proving key, SRS, RPC endpoint) are bound when the
//! backend is constructed; per-request files are passed in.

use super::config::{BackendKind, EzklConfig};
use super::error::EzklResult;
use super::witness::Witness;
use async_trait::async_trait;
use ethers::types::Address;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Result of the proof generation stage
#[derive(Debug, Clone, PartialEq)]
pub struct ProveOutcome {
    /// Proof payload, `None` when the toolkit produced nothing usable
    pub proof: Option<Value>,
}

impl ProveOutcome {
    /// Extract the `proof` field from a proof document
    ///
    /// Missing, null, false, empty strings and empty collections all count
    /// as "no proof".
    pub fn from_proof_document(document: &Value) -> Self {
        let proof = document.get("proof").filter(|p| is_truthy(p)).cloned();
        Self { proof }
    }

    pub fn none() -> Self {
        Self { proof: None }
    }

    pub fn has_proof(&self) -> bool {
        self.proof.is_some()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProvingBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Run the circuit on `input_path`, writing the witness to `witness_path`
    async fn gen_witness(&self, input_path: &Path, witness_path: &Path) -> EzklResult<Witness>;

    /// Prove the witness, writing the proof document to `proof_path`
    async fn prove(&self, witness_path: &Path, proof_path: &Path) -> EzklResult<ProveOutcome>;

    /// Verify the proof against the deployed EVM verifier
    async fn verify(&self, proof_path: &Path, verifier: Address) -> EzklResult<Value>;
}

/// Build the backend selected by configuration
pub fn backend_from_config(config: &EzklConfig, output_scale: i32) -> Arc<dyn ProvingBackend> {
    match config.backend {
        BackendKind::EzklCli => Arc::new(super::cli_backend::EzklCliBackend::from_config(config)),
        BackendKind::Mock => Arc::new(super::mock::MockBackend::new(config.input_len, output_scale)),
    }
}
