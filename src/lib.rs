// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod crypto;
pub mod eval;
pub mod prover;
pub mod version;

pub use api::{create_app, ApiConfig, AppState};
pub use crypto::ezkl::{EzklConfig, EzklError, EzklResult};
pub use prover::{ProofRequest, ProofResult, ProofStats, ProvingService};
