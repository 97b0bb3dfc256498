// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evaluation driver
//!
//! Samples MNIST test images, classifies each with the reference model,
//! submits it to the proving service and records the outcome as CSV.
//!
//! ## Module Structure
//!
//! - `dataset`: MNIST loading and randomised sampling
//! - `preprocess`: Pixel preprocessing modes
//! - `reference_model`: ONNX reference classifier
//! - `client`: HTTP client for `POST /prove`
//! - `record`: CSV result log
//! - `runner`: The sequential batch loop and its summary
//! - `error`: Driver error types

pub mod client;
pub mod dataset;
pub mod error;
pub mod preprocess;
pub mod record;
pub mod reference_model;
pub mod runner;

pub use client::ProverClient;
pub use dataset::{Sample, SampleSet, ShuffledSamples, IMAGE_PIXELS, IMAGE_SIDE};
pub use error::{EvalError, EvalResult};
pub use preprocess::Preprocess;
pub use record::{CsvResultLog, ExecutionRecord, CSV_HEADERS};
pub use reference_model::{OnnxReferenceModel, ReferenceModel, ReferencePrediction};
pub use runner::{BatchRunner, BatchSummary, RunnerOptions, DEFAULT_MAX_SAMPLES};
