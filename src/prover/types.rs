// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire types shared by the proving service and the evaluation driver

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Input document handed to witness generation, persisted verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    pub input_data: Vec<Vec<f64>>,

    /// Any other keys of the input document, e.g. `output_data`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputData {
    /// Single flattened input tensor
    pub fn single(values: Vec<f64>) -> Self {
        Self {
            input_data: vec![values],
            extra: Map::new(),
        }
    }
}

/// Body of `POST /prove`
///
/// # Example
/// ```json
/// { "input": { "input_data": [[0.0, 1.0, ...]] }, "label": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofRequest {
    pub input: InputData,

    /// Ground truth, echoed back but never fed into the circuit
    #[serde(default)]
    pub label: Option<i64>,
}

impl ProofRequest {
    pub fn new(pixels: Vec<f64>, label: i64) -> Self {
        Self {
            input: InputData::single(pixels),
            label: Some(label),
        }
    }
}

/// Per-stage durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProofStats {
    pub witness_generation_time: f64,
    pub proof_generation_time: f64,
    pub proof_verification_time: f64,
    pub total_execution_time: f64,
}

impl ProofStats {
    pub fn from_durations(
        witness: Duration,
        proof: Duration,
        verification: Duration,
        total: Duration,
    ) -> Self {
        Self {
            witness_generation_time: witness.as_secs_f64(),
            proof_generation_time: proof.as_secs_f64(),
            proof_verification_time: verification.as_secs_f64(),
            total_execution_time: total.as_secs_f64(),
        }
    }

    /// Sum of the three instrumented stages
    pub fn stage_sum(&self) -> f64 {
        self.witness_generation_time + self.proof_generation_time + self.proof_verification_time
    }
}

/// Result of one proving pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResult {
    pub proof: bool,

    /// Verifier outcome as reported by the toolkit; null when skipped
    #[serde(default)]
    pub verification: Value,

    #[serde(rename = "Actual Label")]
    pub actual_label: Option<i64>,

    #[serde(rename = "Predicted Label")]
    pub predicted_label: usize,

    pub stats: ProofStats,
}
