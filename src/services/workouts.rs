// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout route to point conversion.

use crate::models::{Point, RoutePoint, TransformError, Workout};
use crate::services::geohash;
use serde_json::Value;
use std::slice;

/// Measurement all route points are written to.
pub const WORKOUT_MEASUREMENT: &str = "workouts";

/// Lazily converts the GPS route of one workout into points, in order.
///
/// Every point carries the same `id` tag and a 7-character `geohash` tag.
/// The geohash is stored as a tag because fields are numeric.
pub struct RouteBuilder<'a> {
    id: String,
    route: slice::Iter<'a, Value>,
}

impl<'a> RouteBuilder<'a> {
    pub fn new(workout: Workout<'a>) -> Self {
        Self {
            id: workout.id(),
            route: workout.route.iter(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn build(&self, raw: &Value) -> Result<Point, TransformError> {
        let sample = RoutePoint::from_value(raw)?;

        Ok(Point::new(WORKOUT_MEASUREMENT, sample.timestamp.clone())
            .tag("id", self.id.as_str())
            .tag(
                "geohash",
                geohash::encode(sample.coord, geohash::ROUTE_PRECISION),
            )
            .field("lat", sample.lat())
            .field("lng", sample.lon()))
    }
}

impl Iterator for RouteBuilder<'_> {
    type Item = Result<Point, TransformError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.route.next()?;
        Some(self.build(raw))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.route.size_hint()
    }
}
