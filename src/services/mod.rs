// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - transformation and write pipeline.

pub mod geohash;
pub mod ingest;
pub mod metrics;
pub mod workouts;
pub mod writer;

pub use ingest::{IngestSummary, IngestionHandler};
pub use metrics::{PointBuilder, SampleValue};
pub use workouts::RouteBuilder;
pub use writer::{ChunkedWriter, WriteSummary};
