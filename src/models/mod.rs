// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod export;
pub mod point;

pub use export::{HealthExport, Metric, MetricSample, RoutePoint, TransformError, Workout};
pub use point::Point;
