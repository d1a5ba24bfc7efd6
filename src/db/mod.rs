//! Database layer (InfluxDB).

pub mod influx;
pub mod memory;

pub use influx::InfluxClient;
pub use memory::MemorySink;

use crate::models::Point;
use futures_util::future::BoxFuture;
use std::time::Duration;

/// Destination for batches of points.
///
/// Implementations must be safe to share between concurrent requests.
pub trait PointSink: Send + Sync {
    /// Write one batch. Resolves once the backend has acknowledged or
    /// rejected it.
    fn write_points<'a>(&'a self, points: &'a [Point]) -> BoxFuture<'a, Result<(), DbError>>;
}

/// Database errors.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("InfluxDB request failed: {0}")]
    Influx(#[from] influxdb::Error),

    #[error("Database request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database rejected write: {0}")]
    Rejected(String),

    #[error("Failed to encode point: {0}")]
    Encoding(String),
}
