// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ingestion of one health export.
//!
//! Handles the core workflow:
//! 1. Parse the request body as JSON
//! 2. Build points for every metric, then write them all in chunks
//! 3. For each workout, build its route points and write them in chunks
//!
//! Metric points are buffered in full before the first write. Workouts are
//! written one at a time.

use crate::db::PointSink;
use crate::error::{IngestError, Result};
use crate::models::{HealthExport, Point};
use crate::services::{ChunkedWriter, PointBuilder, RouteBuilder};
use serde_json::Value;

/// Counts of what one request wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub metrics: usize,
    pub metric_points: usize,
    pub workouts: usize,
    pub workout_points: usize,
    pub chunks: usize,
}

/// Orchestrates point building and chunked writes for one request.
pub struct IngestionHandler<'a> {
    writer: ChunkedWriter<'a>,
}

impl<'a> IngestionHandler<'a> {
    pub fn new(sink: &'a dyn PointSink, chunk_size: usize) -> Self {
        Self {
            writer: ChunkedWriter::new(sink, chunk_size),
        }
    }

    /// Ingest a raw request body.
    pub async fn ingest(&self, body: &[u8]) -> Result<IngestSummary> {
        let root: Value = serde_json::from_slice(body).map_err(IngestError::MalformedRequest)?;
        self.ingest_value(&root).await
    }

    /// Ingest an already-decoded export.
    pub async fn ingest_value(&self, root: &Value) -> Result<IngestSummary> {
        let export = HealthExport::from_value(root)?;
        let mut summary = IngestSummary::default();

        tracing::info!(metrics = export.metrics.len(), "Ingesting metrics");
        let points = build_metric_points(&export)?;
        summary.metrics = export.metrics.len();
        tracing::info!(points = points.len(), "Metric transformation complete");

        let written = self.writer.write(&points).await?;
        summary.metric_points = written.points;
        summary.chunks += written.chunks;
        tracing::info!(
            points = written.points,
            chunks = written.chunks,
            "Metrics written"
        );
        drop(points);

        tracing::info!(workouts = export.workouts.len(), "Ingesting workout routes");
        for workout in export.workouts() {
            let builder = RouteBuilder::new(workout?);
            let id = builder.id().to_string();
            let points = builder.collect::<std::result::Result<Vec<Point>, _>>()?;

            let written = self.writer.write(&points).await?;
            tracing::debug!(
                workout = %id,
                points = written.points,
                chunks = written.chunks,
                "Workout route written"
            );

            summary.workouts += 1;
            summary.workout_points += written.points;
            summary.chunks += written.chunks;
        }

        Ok(summary)
    }
}

/// Build points for every metric, in order, stopping at the first error.
fn build_metric_points(export: &HealthExport<'_>) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for metric in export.metrics() {
        let builder = PointBuilder::new(metric?);
        points.reserve(builder.size_hint().0);
        for point in builder {
            points.push(point?);
        }
    }
    Ok(points)
}
