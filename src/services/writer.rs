// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chunked, sequential point writes.
//!
//! Points are split into contiguous chunks of at most `chunk_size` and each
//! chunk is written with one backend call. A chunk is only issued after the
//! previous one has been acknowledged. The first failure stops the write;
//! chunks already written stay written.

use crate::db::{DbError, PointSink};
use crate::models::Point;

/// Outcome of a successful chunked write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub points: usize,
    pub chunks: usize,
}

/// Writes point sequences to a sink in bounded chunks.
pub struct ChunkedWriter<'a> {
    sink: &'a dyn PointSink,
    chunk_size: usize,
}

impl<'a> ChunkedWriter<'a> {
    /// `chunk_size` values below one are treated as one.
    pub fn new(sink: &'a dyn PointSink, chunk_size: usize) -> Self {
        Self {
            sink,
            chunk_size: chunk_size.max(1),
        }
    }

    pub async fn write(&self, points: &[Point]) -> Result<WriteSummary, DbError> {
        let total_chunks = points.len().div_ceil(self.chunk_size);
        let mut summary = WriteSummary::default();

        for (index, chunk) in points.chunks(self.chunk_size).enumerate() {
            tracing::debug!(
                chunk = index + 1,
                total_chunks,
                size = chunk.len(),
                "Writing chunk"
            );

            if let Err(e) = self.sink.write_points(chunk).await {
                tracing::error!(
                    chunk = index + 1,
                    total_chunks,
                    written = summary.points,
                    error = %e,
                    "Chunk write failed, abandoning remaining chunks"
                );
                return Err(e);
            }

            summary.points += chunk.len();
            summary.chunks += 1;
        }

        Ok(summary)
    }
}
