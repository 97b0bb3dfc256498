// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EZKL Zero-Knowledge Proof Module
//!
//! Integration with the EZKL toolkit for proving MNIST inference over a
//! pre-compiled circuit. Compilation, key generation and verifier deployment
//! happen ahead of time; this module only consumes their artifacts.
//!
//! ## Module Structure
//!
//! - `config`: Environment-based configuration and verifier address loading
//! - `settings`: Circuit settings (output scales)
//! - `felt`: Field element encoding/decoding
//! - `witness`: Witness documents and prediction decoding
//! - `backend`: The `ProvingBackend` seam
//! - `cli_backend`: Backend driving the `ezkl` executable
//! - `mock`: Deterministic in-process backend
//! - `error`: EZKL-specific error types
//! - `metrics`: Prometheus counters

pub mod backend;
pub mod cli_backend;
pub mod config;
pub mod error;
pub mod felt;
pub mod metrics;
pub mod mock;
pub mod settings;
pub mod witness;

// Re-export commonly used types
pub use backend::{backend_from_config, ProveOutcome, ProvingBackend};
pub use cli_backend::EzklCliBackend;
pub use config::{load_verifier_address, BackendKind, EzklConfig};
pub use error::{EzklError, EzklResult};
pub use felt::{felt_to_float, felt_to_integer, float_to_felt};
pub use metrics::ProverMetrics;
pub use mock::MockBackend;
pub use settings::CircuitSettings;
pub use witness::{argmax, Witness};

/// EZKL CLI release the argument layout targets
pub const SUPPORTED_EZKL_VERSION: &str = "22.3.0";
