// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sequential evaluation loop
//!
//! For each sampled image: run the reference model, submit the proof request,
//! and append a CSV row when the service reports success. Per-sample failures
//! are logged and skipped; setup and log-write failures abort the batch.

use super::client::ProverClient;
use super::dataset::SampleSet;
use super::error::EvalResult;
use super::preprocess::Preprocess;
use super::record::{CsvResultLog, ExecutionRecord};
use super::reference_model::ReferenceModel;
use crate::prover::ProofRequest;
use serde::Serialize;
use tracing::{info, warn};

/// Samples per batch when no limit is given
pub const DEFAULT_MAX_SAMPLES: usize = 210;

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub max_samples: usize,
    pub seed: Option<u64>,
    pub preprocess: Preprocess,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            seed: None,
            preprocess: Preprocess::default(),
        }
    }
}

/// Batch outcome counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub proofs: usize,
    pub verified: usize,
    /// Circuit prediction equals ground truth
    pub zkml_correct: usize,
    /// Reference prediction equals ground truth
    pub reference_correct: usize,
    /// Circuit and reference predictions agree
    pub agreement: usize,
}

impl BatchSummary {
    pub fn record(&mut self, record: &ExecutionRecord) {
        self.succeeded += 1;
        if record.proof {
            self.proofs += 1;
        }
        if record.verified() {
            self.verified += 1;
        }
        if let Some(actual) = record.actual_label {
            if actual == record.zkml_predicted_label as i64 {
                self.zkml_correct += 1;
            }
            if actual == record.torch_model_prediction as i64 {
                self.reference_correct += 1;
            }
        }
        if record.zkml_predicted_label == record.torch_model_prediction {
            self.agreement += 1;
        }
    }

    /// Build from rows already in a results file
    pub fn from_records(records: &[ExecutionRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.attempted += 1;
            summary.record(record);
        }
        summary
    }

    /// Fraction of successful samples, 0 when nothing succeeded
    pub fn rate(&self, count: usize) -> f64 {
        if self.succeeded == 0 {
            0.0
        } else {
            count as f64 / self.succeeded as f64
        }
    }

    pub fn log(&self) {
        info!(
            "📊 Batch complete: {} attempted, {} succeeded, {} failed",
            self.attempted, self.succeeded, self.failed
        );
        info!(
            "   proofs {} / verified {}",
            self.proofs, self.verified
        );
        info!(
            "   zkml accuracy {:.3}, reference accuracy {:.3}, agreement {:.3}",
            self.rate(self.zkml_correct),
            self.rate(self.reference_correct),
            self.rate(self.agreement)
        );
    }
}

pub struct BatchRunner {
    client: ProverClient,
    model: Box<dyn ReferenceModel>,
    log: CsvResultLog,
    options: RunnerOptions,
}

impl BatchRunner {
    pub fn new(
        client: ProverClient,
        model: Box<dyn ReferenceModel>,
        log: CsvResultLog,
        options: RunnerOptions,
    ) -> Self {
        Self {
            client,
            model,
            log,
            options,
        }
    }

    pub async fn run(&mut self, samples: &SampleSet) -> EvalResult<BatchSummary> {
        let mut summary = BatchSummary::default();
        info!(
            "🚀 Evaluating up to {} samples against {} ({} preprocessing)",
            self.options.max_samples,
            self.client.prove_url(),
            self.options.preprocess
        );

        for (idx, sample) in samples
            .shuffled(self.options.max_samples, self.options.seed)
            .enumerate()
        {
            println!("========== {}", idx);
            summary.attempted += 1;

            let pixels = self.options.preprocess.apply(&sample.pixels);

            let reference = match self.model.predict(&pixels) {
                Ok(prediction) => prediction,
                Err(e) if e.is_sample_error() => {
                    warn!("Sample {}: reference model failed: {}", idx + 1, e);
                    summary.failed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let request = ProofRequest::new(
                pixels.iter().map(|&p| p as f64).collect(),
                sample.label as i64,
            );

            match self.client.prove(&request).await {
                Ok(result) => {
                    println!("Request {}: Success", idx + 1);
                    let record = ExecutionRecord::new(&result, &reference);
                    info!(
                        "actual {} | reference {} | zkml {} | proof {} | verification '{}'",
                        sample.label,
                        record.torch_model_prediction,
                        record.zkml_predicted_label,
                        record.proof,
                        record.verification
                    );
                    self.log.append(&record)?;
                    summary.record(&record);
                }
                Err(e) if e.is_sample_error() => {
                    println!("Request {}: Failed", idx + 1);
                    warn!("Request {}: {}", idx + 1, e);
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }
}
