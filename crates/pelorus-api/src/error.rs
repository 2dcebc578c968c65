//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Terminal failures (persistence, missing verdicts, bad requests) map to
//! status codes with a JSON error body; per-check soft failures never
//! reach this type — they live in verdict evidence.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "PERSIST_FAILURE").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced resource does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Verdict or approval write did not commit (500). The cause is
    /// surfaced: a verdict must never be reported persisted when the row
    /// did not commit, and the caller needs to know why.
    #[error("verdict persistence failed: {0}")]
    Persist(#[source] sqlx::Error),

    /// Unexpected internal failure (500). Message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Persist(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PERSIST_FAILURE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            // Generic internal details stay out of responses.
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Persist(_) => tracing::error!(error = %self, "verdict persistence failed"),
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<pelorus_core::ValidationError> for AppError {
    fn from(err: pelorus_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
