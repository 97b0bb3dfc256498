// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EZKL CLI backend
//!
//! Drives the `ezkl` executable as a subprocess for each stage:
//!
//! ```text
//! ezkl gen-witness -D input.json -M network.compiled -O witness.json
//! ezkl prove --witness witness.json --compiled-circuit network.compiled \
//!            --pk-path key.pk --proof-path proof.json --srs-path kzg.srs
//! ezkl verify-evm --proof-path proof.json --addr-verifier 0x.. --rpc-url http://..
//! ```

use super::backend::{ProveOutcome, ProvingBackend};
use super::config::{BackendKind, EzklConfig};
use super::error::{EzklError, EzklResult};
use super::witness::Witness;
use async_trait::async_trait;
use ethers::types::Address;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, warn};

/// Keep error messages readable when the toolkit dumps a long log
const MAX_STDERR_CHARS: usize = 2_000;

#[derive(Debug, Clone)]
pub struct EzklCliBackend {
    bin: PathBuf,
    compiled_circuit_path: PathBuf,
    proving_key_path: PathBuf,
    srs_path: PathBuf,
    rpc_url: String,
}

impl EzklCliBackend {
    pub fn from_config(config: &EzklConfig) -> Self {
        Self {
            bin: config.ezkl_bin.clone(),
            compiled_circuit_path: config.compiled_circuit_path.clone(),
            proving_key_path: config.proving_key_path.clone(),
            srs_path: config.srs_path.clone(),
            rpc_url: config.rpc_url.clone(),
        }
    }

    fn gen_witness_args(&self, input_path: &Path, witness_path: &Path) -> Vec<OsString> {
        vec![
            "gen-witness".into(),
            "-D".into(),
            input_path.into(),
            "-M".into(),
            self.compiled_circuit_path.clone().into(),
            "-O".into(),
            witness_path.into(),
        ]
    }

    fn prove_args(&self, witness_path: &Path, proof_path: &Path) -> Vec<OsString> {
        vec![
            "prove".into(),
            "--witness".into(),
            witness_path.into(),
            "--compiled-circuit".into(),
            self.compiled_circuit_path.clone().into(),
            "--pk-path".into(),
            self.proving_key_path.clone().into(),
            "--proof-path".into(),
            proof_path.into(),
            "--srs-path".into(),
            self.srs_path.clone().into(),
        ]
    }

    fn verify_args(&self, proof_path: &Path, verifier: Address) -> Vec<OsString> {
        vec![
            "verify-evm".into(),
            "--proof-path".into(),
            proof_path.into(),
            "--addr-verifier".into(),
            // Debug formatting prints the full address; Display abbreviates it
            format!("{:?}", verifier).into(),
            "--rpc-url".into(),
            self.rpc_url.clone().into(),
        ]
    }

    async fn run(&self, args: Vec<OsString>) -> EzklResult<Output> {
        debug!("Running {} {:?}", self.bin.display(), args);
        Command::new(&self.bin)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| EzklError::LaunchFailed {
                program: self.bin.display().to_string(),
                reason: e.to_string(),
            })
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let detail = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.to_string()
    };

    let tail: String = if detail.chars().count() > MAX_STDERR_CHARS {
        let skip = detail.chars().count() - MAX_STDERR_CHARS;
        detail.chars().skip(skip).collect()
    } else {
        detail
    };

    format!("exit status {}: {}", output.status, tail)
}

#[async_trait]
impl ProvingBackend for EzklCliBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::EzklCli
    }

    async fn gen_witness(&self, input_path: &Path, witness_path: &Path) -> EzklResult<Witness> {
        let output = self.run(self.gen_witness_args(input_path, witness_path)).await?;
        if !output.status.success() {
            return Err(EzklError::witness_generation_failed(failure_reason(&output)));
        }
        Witness::load(witness_path)
    }

    async fn prove(&self, witness_path: &Path, proof_path: &Path) -> EzklResult<ProveOutcome> {
        let output = self.run(self.prove_args(witness_path, proof_path)).await?;
        if !output.status.success() {
            return Err(EzklError::proof_generation_failed(failure_reason(&output)));
        }

        let raw = match tokio::fs::read_to_string(proof_path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("⚠️  ezkl prove exited cleanly but left no proof file: {}", e);
                return Ok(ProveOutcome::none());
            }
        };

        let document: Value = serde_json::from_str(&raw)
            .map_err(|e| EzklError::proof_generation_failed(format!("unreadable proof: {}", e)))?;
        Ok(ProveOutcome::from_proof_document(&document))
    }

    async fn verify(&self, proof_path: &Path, verifier: Address) -> EzklResult<Value> {
        let output = self.run(self.verify_args(proof_path, verifier)).await?;
        if !output.status.success() {
            return Err(EzklError::proof_verification_failed(failure_reason(&output)));
        }
        Ok(Value::Bool(true))
    }
}
