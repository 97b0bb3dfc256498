// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EZKL Configuration Module
//!
//! Provides the proving pipeline configuration from environment variables:
//! where the pre-provisioned setup artifacts live, which backend drives the
//! pipeline, and the shape of the compiled circuit.

use super::error::{EzklError, EzklResult};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Which implementation drives witness/proof/verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Shell out to the `ezkl` CLI
    EzklCli,
    /// Deterministic in-process mock
    Mock,
}

impl FromStr for BackendKind {
    type Err = EzklError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ezkl-cli" | "ezkl" | "cli" => Ok(Self::EzklCli),
            "mock" => Ok(Self::Mock),
            other => Err(EzklError::config_error(format!(
                "unknown backend '{}', expected 'ezkl-cli' or 'mock'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EzklCli => write!(f, "ezkl-cli"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// EZKL Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EzklConfig {
    /// Backend driving the pipeline
    pub backend: BackendKind,

    /// Path to the `ezkl` executable (CLI backend only)
    pub ezkl_bin: PathBuf,

    /// Path to compiled circuit
    pub compiled_circuit_path: PathBuf,

    /// Path to proving key
    pub proving_key_path: PathBuf,

    /// Path to verification key (produced by setup, not read directly)
    pub verifying_key_path: PathBuf,

    /// Path to circuit settings (output scales)
    pub settings_path: PathBuf,

    /// Path to the structured reference string
    pub srs_path: PathBuf,

    /// File holding the deployed EVM verifier address
    pub verifier_address_path: PathBuf,

    /// RPC endpoint used for on-chain verification
    pub rpc_url: String,

    /// Flattened input length expected by the circuit
    pub input_len: usize,

    /// Number of class outputs decoded from the witness
    pub num_classes: usize,

    /// Upper bound on concurrently running pipelines
    pub max_concurrent_proofs: usize,

    /// Per-stage timeout; `None` waits indefinitely
    pub stage_timeout: Option<Duration>,

    /// Skip on-chain verification (verification reported as null)
    pub skip_verification: bool,
}

impl Default for EzklConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::EzklCli,
            ezkl_bin: PathBuf::from("ezkl"),
            compiled_circuit_path: PathBuf::from("network.compiled"),
            proving_key_path: PathBuf::from("key.pk"),
            verifying_key_path: PathBuf::from("key.vk"),
            settings_path: PathBuf::from("settings.json"),
            srs_path: PathBuf::from("kzg.srs"),
            verifier_address_path: PathBuf::from("address.json"),
            rpc_url: "http://127.0.0.1:3030".to_string(),
            input_len: 784,
            num_classes: 10,
            max_concurrent_proofs: 1,
            stage_timeout: None,
            skip_verification: false,
        }
    }
}

impl EzklConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `ZKML_BACKEND`: `ezkl-cli` or `mock` (default: ezkl-cli)
    /// - `EZKL_BIN`: path to the ezkl executable
    /// - `ZKML_COMPILED_CIRCUIT`, `ZKML_PROVING_KEY`, `ZKML_VERIFYING_KEY`,
    ///   `ZKML_SETTINGS`, `ZKML_SRS`, `ZKML_VERIFIER_ADDRESS_FILE`: artifact paths
    /// - `ZKML_RPC_URL`: verifier RPC endpoint
    /// - `ZKML_INPUT_LEN`, `ZKML_NUM_CLASSES`: circuit shape
    /// - `ZKML_MAX_CONCURRENT_PROOFS`: pipeline concurrency
    /// - `ZKML_STAGE_TIMEOUT_SECS`: per-stage timeout (unset = none)
    /// - `ZKML_SKIP_VERIFY`: true/false
    pub fn from_env() -> EzklResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> EzklResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);

        let backend = match lookup("ZKML_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.backend,
        };

        let stage_timeout = match lookup("ZKML_STAGE_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(parse_number(
                "ZKML_STAGE_TIMEOUT_SECS",
                &value,
            )?)),
            None => None,
        };

        Ok(Self {
            backend,
            ezkl_bin: path("EZKL_BIN", defaults.ezkl_bin),
            compiled_circuit_path: path("ZKML_COMPILED_CIRCUIT", defaults.compiled_circuit_path),
            proving_key_path: path("ZKML_PROVING_KEY", defaults.proving_key_path),
            verifying_key_path: path("ZKML_VERIFYING_KEY", defaults.verifying_key_path),
            settings_path: path("ZKML_SETTINGS", defaults.settings_path),
            srs_path: path("ZKML_SRS", defaults.srs_path),
            verifier_address_path: path(
                "ZKML_VERIFIER_ADDRESS_FILE",
                defaults.verifier_address_path,
            ),
            rpc_url: lookup("ZKML_RPC_URL").unwrap_or(defaults.rpc_url),
            input_len: match lookup("ZKML_INPUT_LEN") {
                Some(v) => parse_number("ZKML_INPUT_LEN", &v)?,
                None => defaults.input_len,
            },
            num_classes: match lookup("ZKML_NUM_CLASSES") {
                Some(v) => parse_number("ZKML_NUM_CLASSES", &v)?,
                None => defaults.num_classes,
            },
            max_concurrent_proofs: match lookup("ZKML_MAX_CONCURRENT_PROOFS") {
                Some(v) => parse_number("ZKML_MAX_CONCURRENT_PROOFS", &v)?,
                None => defaults.max_concurrent_proofs,
            },
            stage_timeout,
            skip_verification: lookup("ZKML_SKIP_VERIFY")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> EzklResult<()> {
        if self.input_len == 0 {
            return Err(EzklError::config_error("input_len must be > 0"));
        }

        if self.num_classes == 0 {
            return Err(EzklError::config_error("num_classes must be > 0"));
        }

        if self.max_concurrent_proofs == 0 {
            return Err(EzklError::config_error("max_concurrent_proofs must be > 0"));
        }

        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(EzklError::config_error(format!(
                "rpc_url must be an http(s) URL, got '{}'",
                self.rpc_url
            )));
        }

        Ok(())
    }

    /// Check that the artifacts the backend reads are present
    ///
    /// The mock backend only needs the settings document.
    pub fn check_artifacts(&self) -> EzklResult<()> {
        let required: Vec<&Path> = match self.backend {
            BackendKind::EzklCli => vec![
                &self.compiled_circuit_path,
                &self.proving_key_path,
                &self.settings_path,
                &self.srs_path,
            ],
            BackendKind::Mock => vec![&self.settings_path],
        };

        for path in required {
            if !path.exists() {
                return Err(EzklError::ArtifactNotFound {
                    path: path.to_path_buf(),
                });
            }
        }

        if !self.verifying_key_path.exists() {
            tracing::debug!(
                "Verification key {:?} not present (only used during setup)",
                self.verifying_key_path
            );
        }

        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> EzklResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| EzklError::config_error(format!("{} must be a number, got '{}'", key, value)))
}

/// Read the deployed verifier address
///
/// The file holds either the bare address or a JSON string literal. Trailing
/// whitespace is ignored.
pub fn load_verifier_address(path: impl AsRef<Path>) -> EzklResult<Address> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EzklError::ArtifactNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path)?;
    parse_verifier_address(&raw)
}

/// Parse a verifier address from file contents
pub fn parse_verifier_address(raw: &str) -> EzklResult<Address> {
    let trimmed = raw.trim();
    let unquoted = match serde_json::from_str::<String>(trimmed) {
        Ok(s) => s,
        Err(_) => trimmed.to_string(),
    };

    if unquoted.is_empty() {
        return Err(EzklError::InvalidVerifierAddress {
            reason: "address file is empty".to_string(),
        });
    }

    unquoted
        .trim()
        .parse::<Address>()
        .map_err(|e| EzklError::InvalidVerifierAddress {
            reason: format!("'{}': {}", unquoted.trim(), e),
        })
}
