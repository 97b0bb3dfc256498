// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Proving Service
//!
//! Runs the witness → proof → verification pipeline for one request inside
//! a private temporary directory and times each stage. Requests share only
//! the immutable setup (backend, settings, verifier address); concurrency is
//! bounded by a semaphore sized from configuration.

use super::types::{ProofRequest, ProofResult, ProofStats};
use crate::crypto::ezkl::{
    backend_from_config, load_verifier_address, CircuitSettings, EzklConfig, EzklError,
    EzklResult, ProverMetrics, ProvingBackend,
};
use ethers::types::Address;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Tunables injected at construction
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Deployed verifier; `None` skips verification
    pub verifier: Option<Address>,
    pub input_len: usize,
    pub num_classes: usize,
    pub max_concurrent_proofs: usize,
    pub stage_timeout: Option<Duration>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        let config = EzklConfig::default();
        Self {
            verifier: None,
            input_len: config.input_len,
            num_classes: config.num_classes,
            max_concurrent_proofs: config.max_concurrent_proofs,
            stage_timeout: config.stage_timeout,
        }
    }
}

impl ServiceOptions {
    pub fn from_config(config: &EzklConfig, verifier: Option<Address>) -> Self {
        Self {
            verifier,
            input_len: config.input_len,
            num_classes: config.num_classes,
            max_concurrent_proofs: config.max_concurrent_proofs,
            stage_timeout: config.stage_timeout,
        }
    }
}

pub struct ProvingService {
    backend: Arc<dyn ProvingBackend>,
    settings: CircuitSettings,
    options: ServiceOptions,
    permits: Semaphore,
    metrics: ProverMetrics,
}

impl ProvingService {
    pub fn new(
        backend: Arc<dyn ProvingBackend>,
        settings: CircuitSettings,
        options: ServiceOptions,
    ) -> Self {
        let permits = Semaphore::new(options.max_concurrent_proofs.max(1));
        Self {
            backend,
            settings,
            options,
            permits,
            metrics: ProverMetrics::new(),
        }
    }

    /// Load settings and the verifier address, then build the configured backend
    pub fn from_config(config: &EzklConfig) -> EzklResult<Self> {
        config.validate()?;
        config.check_artifacts()?;

        let settings = CircuitSettings::load(&config.settings_path)?;
        info!(
            "📐 Circuit settings loaded (output scale {})",
            settings.output_scale()
        );

        let verifier = if config.skip_verification {
            warn!("⚠️  On-chain verification disabled (ZKML_SKIP_VERIFY)");
            None
        } else {
            let address = load_verifier_address(&config.verifier_address_path)?;
            info!("🔗 Verifier contract at {:?} via {}", address, config.rpc_url);
            Some(address)
        };

        let backend = backend_from_config(config, settings.output_scale());
        info!("🔐 Proving backend: {}", backend.kind());

        Ok(Self::new(
            backend,
            settings,
            ServiceOptions::from_config(config, verifier),
        ))
    }

    pub fn metrics(&self) -> &ProverMetrics {
        &self.metrics
    }

    pub fn backend(&self) -> &dyn ProvingBackend {
        self.backend.as_ref()
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Prove one inference request
    pub async fn prove(&self, request: &ProofRequest) -> EzklResult<ProofResult> {
        self.metrics.record_request();

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| EzklError::Other("proving service is shutting down".to_string()))?;

        let result = self.run_pipeline(request).await;
        if let Err(e) = &result {
            warn!("❌ Proving pipeline failed: {}", e);
            self.metrics.record_error();
        }
        result
    }

    fn validate(&self, request: &ProofRequest) -> EzklResult<()> {
        let values = request
            .input
            .input_data
            .first()
            .ok_or_else(|| EzklError::invalid_input("input_data must contain one input tensor"))?;

        if values.len() != self.options.input_len {
            return Err(EzklError::invalid_input(format!(
                "circuit expects {} input values, got {}",
                self.options.input_len,
                values.len()
            )));
        }
        Ok(())
    }

    async fn timed<T, F>(&self, stage: &str, stage_future: F) -> EzklResult<(T, Duration)>
    where
        F: Future<Output = EzklResult<T>>,
    {
        let start = Instant::now();
        let output = match self.options.stage_timeout {
            Some(limit) => tokio::time::timeout(limit, stage_future)
                .await
                .map_err(|_| EzklError::ProofTimeout {
                    stage: stage.to_string(),
                    limit,
                })??,
            None => stage_future.await?,
        };
        let elapsed = start.elapsed();
        debug!("{} took {:.3}s", stage, elapsed.as_secs_f64());
        Ok((output, elapsed))
    }

    async fn run_pipeline(&self, request: &ProofRequest) -> EzklResult<ProofResult> {
        let start = Instant::now();
        self.validate(request)?;

        let workdir = tempfile::Builder::new().prefix("zkml-prove-").tempdir()?;
        let input_path = workdir.path().join("input.json");
        let witness_path = workdir.path().join("witness.json");
        let proof_path = workdir.path().join("proof.json");

        tokio::fs::write(&input_path, serde_json::to_vec(&request.input)?).await?;

        let (witness, witness_time) = self
            .timed(
                "Witness generation",
                self.backend.gen_witness(&input_path, &witness_path),
            )
            .await?;
        self.metrics.record_witness(witness_time);

        let (outcome, proof_time) = self
            .timed(
                "Proof generation",
                self.backend.prove(&witness_path, &proof_path),
            )
            .await?;
        self.metrics.record_proof(proof_time, outcome.has_proof());

        let (verification, verify_time) = match (self.options.verifier, outcome.has_proof()) {
            (Some(address), true) => {
                let (verification, elapsed) = self
                    .timed(
                        "Proof verification",
                        self.backend.verify(&proof_path, address),
                    )
                    .await?;
                self.metrics.record_verification(elapsed);
                (verification, elapsed)
            }
            (None, _) => {
                debug!("No verifier configured, skipping verification");
                (Value::Null, Duration::ZERO)
            }
            (Some(_), false) => {
                warn!("⚠️  Proof generation produced no proof, skipping verification");
                (Value::Null, Duration::ZERO)
            }
        };

        let predicted_label =
            witness.predicted_label(self.settings.output_scale(), self.options.num_classes)?;
        info!(
            "Actual: {:?} Predicted: {}",
            request.label, predicted_label
        );

        let stats = ProofStats::from_durations(witness_time, proof_time, verify_time, start.elapsed());

        Ok(ProofResult {
            proof: outcome.has_proof(),
            verification,
            actual_label: request.label,
            predicted_label,
            stats,
        })
    }
}
