// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Witness Data
//!
//! The witness file produced by `gen-witness` holds the circuit's inputs and
//! outputs as field elements. The service only reads the first output tensor
//! to recover the class logits.
//!
//! ## Usage
//!
//! ```ignore
//! use zkml_mnist_node::crypto::ezkl::witness::Witness;
//!
//! let witness = Witness::load("witness.json")?;
//! let label = witness.predicted_label(settings.output_scale(), 10)?;
//! ```

use super::error::{EzklError, EzklResult};
use super::felt::{felt_to_float, float_to_felt};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Witness data for circuit proving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    #[serde(default)]
    pub inputs: Vec<Vec<String>>,
    pub outputs: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lookup_inputs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_lookup_inputs: Option<i64>,
}

impl Witness {
    /// Load a witness file written by the backend
    pub fn load(path: impl AsRef<Path>) -> EzklResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EzklError::invalid_witness(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| EzklError::invalid_witness(format!("cannot parse witness: {}", e)))
    }

    /// Build a witness from real-valued inputs and outputs
    pub fn from_values(
        inputs: &[f64],
        input_scale: i32,
        outputs: &[f64],
        output_scale: i32,
    ) -> EzklResult<Self> {
        let inputs = inputs
            .iter()
            .map(|v| float_to_felt(*v, input_scale))
            .collect::<EzklResult<Vec<_>>>()?;
        let outputs = outputs
            .iter()
            .map(|v| float_to_felt(*v, output_scale))
            .collect::<EzklResult<Vec<_>>>()?;

        Ok(Self {
            inputs: vec![inputs],
            outputs: vec![outputs],
            max_lookup_inputs: None,
            min_lookup_inputs: None,
        })
    }

    /// Dequantize the first `count` values of the first output tensor
    pub fn decode_outputs(&self, scale: i32, count: usize) -> EzklResult<Vec<f64>> {
        let first = self
            .outputs
            .first()
            .ok_or_else(|| EzklError::invalid_witness("witness has no outputs"))?;

        if first.len() < count {
            return Err(EzklError::invalid_witness(format!(
                "expected at least {} outputs, got {}",
                count,
                first.len()
            )));
        }

        first[..count]
            .iter()
            .map(|felt| felt_to_float(felt, scale))
            .collect()
    }

    /// Index of the largest decoded class output
    pub fn predicted_label(&self, scale: i32, num_classes: usize) -> EzklResult<usize> {
        let values = self.decode_outputs(scale, num_classes)?;
        argmax(&values).ok_or_else(|| EzklError::invalid_witness("no class outputs to decode"))
    }
}

/// Index of the maximum value; the first index wins ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}
