// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Reference classifier (ONNX export of the LeNet model the circuit was
//! compiled from)
//!
//! The circuit's prediction is compared against this model for every sample.
//! Loading happens once per batch; each call runs a single `[1, 1, 28, 28]`
//! inference.

use super::dataset::IMAGE_SIDE;
use super::error::{EvalError, EvalResult};
use crate::crypto::ezkl::argmax;
use anyhow::{Context, Result};
use ndarray::Array4;
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Predicted class and the time the model took to produce it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePrediction {
    pub label: usize,
    pub elapsed: Duration,
}

pub trait ReferenceModel: Send {
    /// Class scores for one preprocessed 28x28 image
    fn logits(&mut self, pixels: &[f32]) -> EvalResult<Vec<f32>>;

    /// Argmax of `logits`, timed
    fn predict(&mut self, pixels: &[f32]) -> EvalResult<ReferencePrediction> {
        let start = Instant::now();
        let logits = self.logits(pixels)?;
        let scores: Vec<f64> = logits.iter().map(|&v| v as f64).collect();
        let label = argmax(&scores)
            .ok_or_else(|| EvalError::inference("model produced no outputs"))?;
        Ok(ReferencePrediction {
            label,
            elapsed: start.elapsed(),
        })
    }
}

pub struct OnnxReferenceModel {
    session: Session,
    input_name: String,
}

impl std::fmt::Debug for OnnxReferenceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxReferenceModel")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl OnnxReferenceModel {
    /// Load an ONNX classifier, preferring CUDA and falling back to CPU
    pub fn load(model_path: impl AsRef<Path>) -> EvalResult<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            return Err(EvalError::model_load(format!(
                "ONNX model file not found: {}",
                model_path.display()
            )));
        }

        let session = build_session(model_path).map_err(|e| EvalError::model_load(format!("{:#}", e)))?;
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| EvalError::model_load("model declares no inputs"))?;

        info!(
            "✅ Reference model loaded from {} (input '{}')",
            model_path.display(),
            input_name
        );
        Ok(Self {
            session,
            input_name,
        })
    }

    fn run(&mut self, pixels: &[f32]) -> Result<Vec<f32>> {
        let image = Array4::from_shape_vec((1, 1, IMAGE_SIDE, IMAGE_SIDE), pixels.to_vec())
            .context("Failed to shape input image")?;

        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => Value::from_array(image)?
        ])?;

        let scores = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;
        Ok(scores.iter().copied().collect())
    }
}

impl ReferenceModel for OnnxReferenceModel {
    fn logits(&mut self, pixels: &[f32]) -> EvalResult<Vec<f32>> {
        if pixels.len() != IMAGE_SIDE * IMAGE_SIDE {
            return Err(EvalError::inference(format!(
                "expected {} pixels, got {}",
                IMAGE_SIDE * IMAGE_SIDE,
                pixels.len()
            )));
        }
        self.run(pixels)
            .map_err(|e| EvalError::inference(format!("{:#}", e)))
    }
}

fn build_session(model_path: &Path) -> Result<Session> {
    let cuda_result = Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .context("Failed to set CUDA execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(1)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path);

    match cuda_result {
        Ok(session) => Ok(session),
        Err(e) => {
            warn!("⚠️  CUDA execution provider failed: {}", e);
            warn!("   Falling back to CPU execution provider");
            Session::builder()
                .context("Failed to create session builder")?
                .with_execution_providers([CPUExecutionProvider::default().build()])
                .context("Failed to set CPU execution provider")?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .context("Failed to set optimization level")?
                .with_intra_threads(1)
                .context("Failed to set intra threads")?
                .commit_from_file(model_path)
                .context(format!(
                    "Failed to load ONNX model from {}",
                    model_path.display()
                ))
        }
    }
}
