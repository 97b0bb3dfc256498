// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod evaluate;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// ZKML MNIST evaluation driver
#[derive(Parser, Debug)]
#[command(name = "zkml-eval")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Benchmark the ZKML proving server against a reference model", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prove a random batch of MNIST test images and log the results
    Run(evaluate::RunArgs),

    /// Summarise an existing results file
    Summarize(evaluate::SummarizeArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => evaluate::run_batch(args).await,
        Commands::Summarize(args) => evaluate::summarize(args),
    }
}
