// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Circuit settings document (`settings.json`)
//!
//! Only the fields the service needs are modelled; everything else EZKL
//! writes is kept in `run_args` / ignored.

use super::error::{EzklError, EzklResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSettings {
    /// Fixed-point scale of each model output
    pub model_output_scales: Vec<i32>,

    #[serde(default)]
    pub model_input_scales: Vec<i32>,

    #[serde(default)]
    pub run_args: Option<serde_json::Value>,
}

impl CircuitSettings {
    pub fn load(path: impl AsRef<Path>) -> EzklResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EzklError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> EzklResult<Self> {
        let settings: Self = serde_json::from_str(raw).map_err(|e| EzklError::InvalidSettings {
            reason: e.to_string(),
        })?;

        if settings.model_output_scales.is_empty() {
            return Err(EzklError::InvalidSettings {
                reason: "model_output_scales is empty".to_string(),
            });
        }

        Ok(settings)
    }

    /// Scale of the first (classification) output
    pub fn output_scale(&self) -> i32 {
        self.model_output_scales[0]
    }

    /// Scale of the first input, falling back to the output scale
    pub fn input_scale(&self) -> i32 {
        self.model_input_scales
            .first()
            .copied()
            .unwrap_or_else(|| self.output_scale())
    }
}
