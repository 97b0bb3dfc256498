// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod prove;

pub use errors::{ApiEnvelope, ApiError};
pub use handlers::{HealthResponse, WELCOME_MESSAGE};
pub use http_server::{create_app, start_server, ApiConfig, AppState};
pub use prove::prove_handler;
