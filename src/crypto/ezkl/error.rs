// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EZKL-Specific Error Types
//!
//! Error types for the witness → proof → verification pipeline. These errors
//! carry enough context to be reported verbatim in the `/prove` error
//! envelope.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving the proving pipeline
#[derive(Debug, Error)]
pub enum EzklError {
    /// Request payload is malformed or does not fit the circuit
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Required setup artifact is missing on disk
    #[error("Artifact not found at {path:?}")]
    ArtifactNotFound { path: PathBuf },

    /// Circuit settings could not be parsed or are incomplete
    #[error("Invalid circuit settings: {reason}")]
    InvalidSettings { reason: String },

    /// Verifier address file is missing or malformed
    #[error("Invalid verifier address: {reason}")]
    InvalidVerifierAddress { reason: String },

    /// Witness generation failed
    #[error("Witness generation failed: {reason}")]
    WitnessGenerationFailed { reason: String },

    /// Witness is invalid
    #[error("Invalid witness: {reason}")]
    InvalidWitness { reason: String },

    /// Field element could not be decoded
    #[error("Invalid field element {felt:?}: {reason}")]
    InvalidFelt { felt: String, reason: String },

    /// Proof generation failed
    #[error("Proof generation failed: {reason}")]
    ProofGenerationFailed { reason: String },

    /// Proof verification failed
    #[error("Proof verification failed: {reason}")]
    ProofVerificationFailed { reason: String },

    /// A pipeline stage exceeded the configured timeout
    #[error("{stage} timed out after {limit:?}")]
    ProofTimeout { stage: String, limit: Duration },

    /// External toolkit binary could not be launched
    #[error("Failed to launch {program}: {reason}")]
    LaunchFailed { program: String, reason: String },

    /// Configuration error
    #[error("EZKL configuration error: {reason}")]
    ConfigError { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error (catch-all)
    #[error("EZKL error: {0}")]
    Other(String),
}

/// Result type for EZKL operations
pub type EzklResult<T> = Result<T, EzklError>;

impl EzklError {
    /// Create an InvalidInput error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a WitnessGenerationFailed error
    pub fn witness_generation_failed(reason: impl Into<String>) -> Self {
        Self::WitnessGenerationFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidWitness error
    pub fn invalid_witness(reason: impl Into<String>) -> Self {
        Self::InvalidWitness {
            reason: reason.into(),
        }
    }

    /// Create a ProofGenerationFailed error
    pub fn proof_generation_failed(reason: impl Into<String>) -> Self {
        Self::ProofGenerationFailed {
            reason: reason.into(),
        }
    }

    /// Create a ProofVerificationFailed error
    pub fn proof_verification_failed(reason: impl Into<String>) -> Self {
        Self::ProofVerificationFailed {
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// Check if the caller sent something the circuit cannot accept
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Check if this error indicates a pipeline stage problem
    pub fn is_stage_error(&self) -> bool {
        matches!(
            self,
            Self::WitnessGenerationFailed { .. }
                | Self::InvalidWitness { .. }
                | Self::InvalidFelt { .. }
                | Self::ProofGenerationFailed { .. }
                | Self::ProofVerificationFailed { .. }
                | Self::ProofTimeout { .. }
                | Self::LaunchFailed { .. }
        )
    }

    /// Check if this error indicates a setup problem on the host
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::ArtifactNotFound { .. }
                | Self::InvalidSettings { .. }
                | Self::InvalidVerifierAddress { .. }
                | Self::ConfigError { .. }
        )
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::ArtifactNotFound { path } => format!(
                "Artifact not found at {:?}. Run the EZKL setup (compile-circuit, setup, create-evm-verifier) before starting the server.",
                path
            ),
            Self::LaunchFailed { program, .. } => format!(
                "Could not run '{}'. Install the ezkl CLI or set EZKL_BIN, or use ZKML_BACKEND=mock.",
                program
            ),
            Self::ProofTimeout { stage, limit } => format!(
                "{} timed out after {:?}. Check system resources or raise ZKML_STAGE_TIMEOUT_SECS.",
                stage, limit
            ),
            _ => self.to_string(),
        }
    }
}
