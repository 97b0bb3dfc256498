// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EZKL Prometheus Metrics
//!
//! Counters for the proving pipeline, rendered in Prometheus text format by
//! the `/metrics` route.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Pipeline metrics
#[derive(Debug, Clone, Default)]
pub struct ProverMetrics {
    /// Number of `/prove` requests received
    requests_total: Arc<AtomicU64>,
    /// Number of pipelines that produced a proof
    proofs_generated: Arc<AtomicU64>,
    /// Number of pipelines whose prove stage yielded no proof
    proofs_missing: Arc<AtomicU64>,
    /// Number of verifications run
    verifications_total: Arc<AtomicU64>,
    /// Number of pipelines that failed
    errors_total: Arc<AtomicU64>,
    /// Cumulative stage times in microseconds
    witness_us: Arc<AtomicU64>,
    proof_us: Arc<AtomicU64>,
    verify_us: Arc<AtomicU64>,
}

impl ProverMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_witness(&self, elapsed: Duration) {
        self.witness_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_proof(&self, elapsed: Duration, produced: bool) {
        self.proof_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        if produced {
            self.proofs_generated.fetch_add(1, Ordering::Relaxed);
        } else {
            self.proofs_missing.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_verification(&self, elapsed: Duration) {
        self.verify_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        self.verifications_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn proofs_generated(&self) -> u64 {
        self.proofs_generated.load(Ordering::Relaxed)
    }

    pub fn proofs_missing(&self) -> u64 {
        self.proofs_missing.load(Ordering::Relaxed)
    }

    pub fn verifications_total(&self) -> u64 {
        self.verifications_total.load(Ordering::Relaxed)
    }

    pub fn errors_total(&self) -> u64 {
        self.errors_total.load(Ordering::Relaxed)
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        let seconds = |counter: &AtomicU64| counter.load(Ordering::Relaxed) as f64 / 1_000_000.0;

        format!(
            "# HELP zkml_prove_requests_total Total /prove requests\n\
             # TYPE zkml_prove_requests_total counter\n\
             zkml_prove_requests_total {}\n\
             # HELP zkml_proofs_generated_total Pipelines that produced a proof\n\
             # TYPE zkml_proofs_generated_total counter\n\
             zkml_proofs_generated_total {}\n\
             # HELP zkml_proofs_missing_total Pipelines whose prove stage produced no proof\n\
             # TYPE zkml_proofs_missing_total counter\n\
             zkml_proofs_missing_total {}\n\
             # HELP zkml_verifications_total Verifications run\n\
             # TYPE zkml_verifications_total counter\n\
             zkml_verifications_total {}\n\
             # HELP zkml_prove_errors_total Failed pipelines\n\
             # TYPE zkml_prove_errors_total counter\n\
             zkml_prove_errors_total {}\n\
             # HELP zkml_stage_seconds_total Cumulative time spent per stage\n\
             # TYPE zkml_stage_seconds_total counter\n\
             zkml_stage_seconds_total{{stage=\"witness\"}} {:.6}\n\
             zkml_stage_seconds_total{{stage=\"prove\"}} {:.6}\n\
             zkml_stage_seconds_total{{stage=\"verify\"}} {:.6}\n",
            self.requests_total(),
            self.proofs_generated(),
            self.proofs_missing(),
            self.verifications_total(),
            self.errors_total(),
            seconds(&self.witness_us),
            seconds(&self.proof_us),
            seconds(&self.verify_us),
        )
    }
}
