// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evaluation driver errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    /// MNIST files are missing from the dataset directory
    #[error("MNIST dataset file not found at {path:?}")]
    DatasetNotFound { path: PathBuf },

    /// Dataset buffers are inconsistent
    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    /// Reference model could not be loaded
    #[error("Failed to load reference model: {reason}")]
    ModelLoad { reason: String },

    /// Reference model inference failed
    #[error("Reference inference failed: {reason}")]
    Inference { reason: String },

    /// Connection error, timeout or other transport failure
    #[error("Request to proving service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-200 status
    #[error("Proving service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Service answered 200 with an error envelope
    #[error("Proving service reported an error: {message}")]
    Service { message: String },

    /// Body could not be decoded
    #[error("Invalid response from proving service: {reason}")]
    InvalidResponse { reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    pub fn inference(reason: impl Into<String>) -> Self {
        Self::Inference {
            reason: reason.into(),
        }
    }

    pub fn model_load(reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            reason: reason.into(),
        }
    }

    /// Failures that skip the current sample without aborting the batch
    pub fn is_sample_error(&self) -> bool {
        matches!(
            self,
            Self::Inference { .. }
                | Self::Transport(_)
                | Self::HttpStatus { .. }
                | Self::Service { .. }
                | Self::InvalidResponse { .. }
        )
    }
}
