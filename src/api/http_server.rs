// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers::{health_handler, index_handler, metrics_handler};
use super::prove::prove_handler;
use crate::prover::ProvingService;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: String,
    /// Report failures with 4xx/5xx instead of HTTP 200
    pub strict_status_codes: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8000".to_string(),
            strict_status_codes: false,
        }
    }
}

impl ApiConfig {
    /// Environment variables: `ZKML_LISTEN_ADDR`, `ZKML_STRICT_STATUS_CODES`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            listen_addr: lookup("ZKML_LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            strict_status_codes: lookup("ZKML_STRICT_STATUS_CODES")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.strict_status_codes),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProvingService>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(service: ProvingService, config: ApiConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/prove", post(prove_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🌐 Proving server listening on {}", listener.local_addr()?);
    if state.config.strict_status_codes {
        info!("Strict HTTP status codes enabled");
    }

    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("🛑 Shutdown signal received");
    }
}
