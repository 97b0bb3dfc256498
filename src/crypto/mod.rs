// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Zero-knowledge proving primitives
//!
//! - **EZKL**: witness generation, proving and EVM verification of MNIST
//!   inference over a pre-compiled circuit

pub mod ezkl;
