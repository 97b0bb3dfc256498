// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Mock proving backend
//!
//! Writes real witness and proof documents to the per-request paths so the
//! rest of the pipeline (file plumbing, felt decoding, timing) runs exactly
//! as it does against the EZKL CLI. Class logits are fixed at construction,
//! or scored against per-class templates when templates are set.

use super::backend::{ProveOutcome, ProvingBackend};
use super::config::BackendKind;
use super::error::{EzklError, EzklResult};
use super::witness::Witness;
use async_trait::async_trait;
use ethers::types::Address;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct InputDocument {
    input_data: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct MockBackend {
    input_len: usize,
    input_scale: i32,
    output_scale: i32,
    logits: Vec<f64>,
    templates: Vec<Vec<f64>>,
    produce_proof: bool,
    verification: Value,
    stage_delay: Option<Duration>,
}

impl MockBackend {
    /// Mock circuit with `input_len` inputs and ten zero logits
    pub fn new(input_len: usize, output_scale: i32) -> Self {
        Self {
            input_len,
            input_scale: 0,
            output_scale,
            logits: vec![0.0; 10],
            templates: Vec::new(),
            produce_proof: true,
            verification: Value::Bool(true),
            stage_delay: None,
        }
    }

    pub fn with_logits(mut self, logits: Vec<f64>) -> Self {
        self.logits = logits;
        self
    }

    /// Logits that make `label` the unique argmax
    pub fn predicting(self, label: usize) -> Self {
        let mut logits = vec![-1.0; 10.max(label + 1)];
        logits[label] = 5.0;
        self.with_logits(logits)
    }

    /// Score each class by negative squared distance to its template,
    /// so the predicted class is the nearest template
    pub fn with_templates(mut self, templates: Vec<Vec<f64>>) -> Self {
        self.templates = templates;
        self
    }

    fn logits_for(&self, values: &[f64]) -> Vec<f64> {
        if self.templates.is_empty() {
            return self.logits.clone();
        }
        self.templates
            .iter()
            .map(|template| {
                -template
                    .iter()
                    .zip(values)
                    .map(|(t, v)| (t - v).powi(2))
                    .sum::<f64>()
            })
            .collect()
    }

    /// Prove stage yields a document with no proof payload
    pub fn without_proof(mut self) -> Self {
        self.produce_proof = false;
        self
    }

    pub fn with_verification(mut self, verification: Value) -> Self {
        self.verification = verification;
        self
    }

    /// Sleep inside every stage
    pub fn with_stage_delay(mut self, delay: Duration) -> Self {
        self.stage_delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.stage_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ProvingBackend for MockBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Mock
    }

    async fn gen_witness(&self, input_path: &Path, witness_path: &Path) -> EzklResult<Witness> {
        self.pause().await;

        let raw = tokio::fs::read_to_string(input_path).await?;
        let input: InputDocument = serde_json::from_str(&raw)
            .map_err(|e| EzklError::witness_generation_failed(format!("bad input data: {}", e)))?;

        let values = input
            .input_data
            .first()
            .ok_or_else(|| EzklError::witness_generation_failed("input_data is empty"))?;
        if values.len() != self.input_len {
            return Err(EzklError::witness_generation_failed(format!(
                "circuit expects {} inputs, got {}",
                self.input_len,
                values.len()
            )));
        }

        let logits = self.logits_for(values);
        let witness = Witness::from_values(values, self.input_scale, &logits, self.output_scale)?;
        tokio::fs::write(witness_path, serde_json::to_vec(&witness)?).await?;
        Ok(witness)
    }

    async fn prove(&self, witness_path: &Path, proof_path: &Path) -> EzklResult<ProveOutcome> {
        self.pause().await;

        let witness = Witness::load(witness_path)
            .map_err(|e| EzklError::proof_generation_failed(e.to_string()))?;

        let document = if self.produce_proof {
            let commitment = witness.outputs.concat().concat();
            json!({
                "instances": witness.outputs,
                "proof": format!("0x{}", &commitment[..commitment.len().min(128)]),
                "transcript_type": "EVM",
            })
        } else {
            json!({ "instances": witness.outputs, "proof": null })
        };

        tokio::fs::write(proof_path, serde_json::to_vec(&document)?).await?;
        Ok(ProveOutcome::from_proof_document(&document))
    }

    async fn verify(&self, proof_path: &Path, _verifier: Address) -> EzklResult<Value> {
        self.pause().await;

        let raw = tokio::fs::read_to_string(proof_path)
            .await
            .map_err(|e| EzklError::proof_verification_failed(e.to_string()))?;
        let document: Value = serde_json::from_str(&raw)?;
        if !ProveOutcome::from_proof_document(&document).has_proof() {
            return Err(EzklError::proof_verification_failed("proof document has no proof"));
        }
        Ok(self.verification.clone())
    }
}
