// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Health-Ingest: store health exports in InfluxDB
//!
//! This crate receives health-data exports (metric samples and workout GPS
//! routes) over HTTP, reshapes every record into a time-series point and
//! writes the points to InfluxDB in bounded-size batches.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::PointSink;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sink: Arc<dyn PointSink>,
}
