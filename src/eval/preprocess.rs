// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pixel preprocessing shared by the reference model and the proof request

use clap::ValueEnum;
use std::fmt;

/// MNIST training mean and standard deviation
pub const MNIST_MEAN: f32 = 0.1307;
pub const MNIST_STD: f32 = 0.3081;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preprocess {
    /// Scale to [0, 1] and round, matching drawing-board input
    #[default]
    Binarize,
    /// Scale, normalise with the MNIST mean/std, then round
    NormalizedRound,
}

impl Preprocess {
    pub fn apply(&self, pixels: &[u8]) -> Vec<f32> {
        pixels
            .iter()
            .map(|&p| {
                let scaled = p as f32 / 255.0;
                match self {
                    Preprocess::Binarize => scaled.round(),
                    Preprocess::NormalizedRound => ((scaled - MNIST_MEAN) / MNIST_STD).round(),
                }
            })
            .collect()
    }
}

impl fmt::Display for Preprocess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preprocess::Binarize => write!(f, "binarize"),
            Preprocess::NormalizedRound => write!(f, "normalized-round"),
        }
    }
}
