// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request-level error type and its HTTP mapping.
//!
//! Only malformed JSON is reported to the caller as a client error. Every
//! other failure collapses to a generic 500; details go to the log.

use crate::db::DbError;
use crate::models::TransformError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Invalid JSON: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("Transformation failed: {0}")]
    Transform(#[from] TransformError),

    #[error("Database write failed: {0}")]
    Backend(#[from] DbError),
}

impl IngestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            IngestError::Transform(_) | IngestError::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let body = match &self {
            IngestError::MalformedRequest(err) => {
                tracing::warn!(error = %err, "Rejected request body");
                "Invalid JSON Received"
            }
            IngestError::Transform(err) => {
                tracing::error!(error = %err, "Transformation error");
                "Server Error"
            }
            IngestError::Backend(err) => {
                tracing::error!(error = %err, "Database error");
                "Server Error"
            }
        };

        (self.status_code(), body).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, IngestError>;
