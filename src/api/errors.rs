// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::crypto::ezkl::EzklError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body-level envelope used by every route
///
/// Callers in compatibility mode always receive HTTP 200 and must inspect
/// `status` to tell success from failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiEnvelope<T> {
    Ok { res: T },
    Error { message: String },
}

impl<T> ApiEnvelope<T> {
    pub fn ok(res: T) -> Self {
        ApiEnvelope::Ok { res }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiEnvelope::Error {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ApiEnvelope::Ok { .. })
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiEnvelope::Ok { res } => Ok(res),
            ApiEnvelope::Error { message } => Err(message),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    ServiceUnavailable(String),
    InternalError(String),
    Timeout(String),
}

impl ApiError {
    pub fn to_envelope<T>(&self) -> ApiEnvelope<T> {
        let message = match self {
            ApiError::InvalidRequest(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::InternalError(msg)
            | ApiError::Timeout(msg) => msg.clone(),
        };
        ApiEnvelope::error(message)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::InternalError(_) => 500,
            ApiError::Timeout(_) => 504,
        }
    }
}

impl From<EzklError> for ApiError {
    fn from(err: EzklError) -> Self {
        let message = err.to_string();
        match err {
            EzklError::InvalidInput { .. } => ApiError::InvalidRequest(message),
            EzklError::ProofTimeout { .. } => ApiError::Timeout(message),
            EzklError::ArtifactNotFound { .. }
            | EzklError::InvalidSettings { .. }
            | EzklError::InvalidVerifierAddress { .. }
            | EzklError::ConfigError { .. }
            | EzklError::LaunchFailed { .. } => ApiError::ServiceUnavailable(message),
            _ => ApiError::InternalError(message),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Timeout(msg) => write!(f, "Request timed out: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
