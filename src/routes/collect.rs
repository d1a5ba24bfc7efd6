// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Collection route for health exports.

use crate::error::IngestError;
use crate::services::IngestionHandler;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;

/// Collection routes. GET is accepted for compatibility with exporters
/// that probe the endpoint; without a body it is rejected as invalid JSON.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/collect", get(collect).post(collect))
}

/// Ingest one export.
///
/// Responds `200 Success`, `400 Invalid JSON Received` or `500 Server Error`.
async fn collect(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let started = Instant::now();
    tracing::info!(bytes = body.len(), "Request received");

    let handler = IngestionHandler::new(state.sink.as_ref(), state.config.chunk_size);

    match handler.ingest(&body).await {
        Ok(summary) => {
            tracing::info!(
                metrics = summary.metrics,
                metric_points = summary.metric_points,
                workouts = summary.workouts,
                workout_points = summary.workout_points,
                chunks = summary.chunks,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Export ingested"
            );
            (StatusCode::OK, "Success").into_response()
        }
        Err(e @ IngestError::MalformedRequest(_)) => e.into_response(),
        Err(e) => {
            tracing::error!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Export ingestion failed"
            );
            e.into_response()
        }
    }
}
