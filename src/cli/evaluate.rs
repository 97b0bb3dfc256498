// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::eval::{
    BatchRunner, BatchSummary, CsvResultLog, OnnxReferenceModel, Preprocess, ProverClient,
    RunnerOptions, SampleSet, DEFAULT_MAX_SAMPLES,
};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Proof endpoint of the proving server
    #[arg(long, env = "ZKML_API_URL", default_value = "http://127.0.0.1:8000/prove")]
    pub api_url: String,

    /// Directory holding the MNIST IDX files
    #[arg(long, env = "ZKML_MNIST_DIR", default_value = "./test/MNIST/raw")]
    pub mnist_dir: PathBuf,

    /// ONNX export of the reference classifier
    #[arg(long, env = "ZKML_REFERENCE_MODEL", default_value = "models/mnist.onnx")]
    pub model: PathBuf,

    /// Results file, appended to across runs
    #[arg(long, env = "ZKML_RESULTS_CSV", default_value = "zkp_execution_results.csv")]
    pub output: PathBuf,

    /// Number of samples to submit
    #[arg(long, default_value_t = DEFAULT_MAX_SAMPLES)]
    pub max_samples: usize,

    /// Fix the sampling order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pixel preprocessing applied before inference and proving
    #[arg(long, value_enum, default_value_t = Preprocess::Binarize)]
    pub preprocess: Preprocess,

    /// Per-request HTTP timeout in seconds (none by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Arguments for the summarize command
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Results file to read
    #[arg(long, env = "ZKML_RESULTS_CSV", default_value = "zkp_execution_results.csv")]
    pub output: PathBuf,
}

pub async fn run_batch(args: RunArgs) -> Result<()> {
    let samples = SampleSet::load_mnist_test(&args.mnist_dir)
        .with_context(|| format!("Failed to load MNIST from {}", args.mnist_dir.display()))?;
    let model = OnnxReferenceModel::load(&args.model)?;
    let client = ProverClient::new(&args.api_url, args.timeout_secs.map(Duration::from_secs))?;

    let mut runner = BatchRunner::new(
        client,
        Box::new(model),
        CsvResultLog::new(&args.output),
        RunnerOptions {
            max_samples: args.max_samples,
            seed: args.seed,
            preprocess: args.preprocess,
        },
    );

    let summary = runner.run(&samples).await?;
    summary.log();
    info!("Results appended to {}", args.output.display());
    Ok(())
}

pub fn summarize(args: SummarizeArgs) -> Result<()> {
    let records = CsvResultLog::new(&args.output)
        .read_all()
        .with_context(|| format!("Failed to read {}", args.output.display()))?;

    let summary = BatchSummary::from_records(&records);
    summary.log();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
