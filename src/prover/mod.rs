// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! MNIST proving service
//!
//! Accepts a flattened image, runs it through the compiled circuit and returns
//! the proof outcome, the predicted class and per-stage timings.

pub mod service;
pub mod types;

pub use service::{ProvingService, ServiceOptions};
pub use types::{InputData, ProofRequest, ProofResult, ProofStats};
