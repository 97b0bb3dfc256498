// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Proof API Module
//!
//! This module provides the POST /prove endpoint, which proves one MNIST
//! inference over the compiled circuit and reports the per-stage timings.

pub mod handler;

pub use handler::{parse_proof_request, prove_handler};
