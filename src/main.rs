// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use std::env;
use zkml_mnist_node::{
    api::{start_server, ApiConfig, AppState},
    crypto::ezkl::EzklConfig,
    prover::ProvingService,
    version,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting ZKML MNIST proving server...\n");
    println!("📦 BUILD VERSION: {}", version::VERSION);
    println!("📅 Build Date: {}", version::BUILD_DATE);
    println!();

    let ezkl_config = EzklConfig::from_env().context("Invalid EZKL configuration")?;
    let api_config = ApiConfig::from_env();

    println!("🔐 Loading circuit artifacts...");
    let service = match ProvingService::from_config(&ezkl_config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return Err(e).context("Failed to initialise proving service");
        }
    };
    println!(
        "✅ {} ready ({} backend, {} input values)",
        version::get_version_string(),
        ezkl_config.backend,
        ezkl_config.input_len
    );

    start_server(AppState::new(service, api_config)).await?;

    println!("👋 Proving server stopped");
    Ok(())
}
