// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Borrowed views over a decoded health export.
//!
//! The request body is decoded into a generic [`serde_json::Value`] tree and
//! walked explicitly here, so that structural problems inside the payload are
//! reported as [`TransformError`]s rather than as JSON parse failures.
//!
//! Expected shape:
//!
//! ```text
//! { "data": {
//!     "metrics":  [ { "name": str, "data": [ { "date": ts, <key>: value, ... } ] } ],
//!     "workouts": [ { "name": str, "start": str, "end": str,
//!                     "route": [ { "timestamp": ts, "lat": num, "lon": num } ] } ] } }
//! ```

use geo::Coord;
use serde_json::{Map, Value};

/// Key holding the timestamp of a metric sample.
pub const DATE_KEY: &str = "date";

/// Errors raised while reshaping an export into points.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Expected {0} to be a JSON object")]
    NotAnObject(&'static str),

    #[error("Missing required key {key:?} in {context}")]
    MissingKey {
        context: &'static str,
        key: &'static str,
    },

    #[error("Key {key:?} in {context} must be {expected}")]
    WrongType {
        context: &'static str,
        key: &'static str,
        expected: &'static str,
    },

    #[error("Coordinate out of range: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

/// Top level of an export: the `data.metrics` and `data.workouts` arrays.
///
/// Either array may be absent, in which case it is treated as empty.
#[derive(Debug, Clone, Copy)]
pub struct HealthExport<'a> {
    pub metrics: &'a [Value],
    pub workouts: &'a [Value],
}

impl<'a> HealthExport<'a> {
    pub fn from_value(root: &'a Value) -> Result<Self, TransformError> {
        let root = as_object(root, "request body")?;

        let Some(data) = root.get("data") else {
            return Ok(Self {
                metrics: &[],
                workouts: &[],
            });
        };
        let data = as_object(data, "data")?;

        Ok(Self {
            metrics: optional_array(data, "data", "metrics")?,
            workouts: optional_array(data, "data", "workouts")?,
        })
    }

    pub fn metrics(&self) -> impl Iterator<Item = Result<Metric<'a>, TransformError>> + 'a {
        self.metrics.iter().map(Metric::from_value)
    }

    pub fn workouts(&self) -> impl Iterator<Item = Result<Workout<'a>, TransformError>> + 'a {
        self.workouts.iter().map(Workout::from_value)
    }
}

/// A named metric and its raw samples.
#[derive(Debug, Clone, Copy)]
pub struct Metric<'a> {
    pub name: &'a str,
    pub samples: &'a [Value],
}

impl<'a> Metric<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self, TransformError> {
        let obj = as_object(value, "metric")?;
        Ok(Self {
            name: required_str(obj, "metric", "name")?,
            samples: required_array(obj, "metric", "data")?,
        })
    }
}

/// One metric reading: its `date` plus every other key, unclassified.
#[derive(Debug, Clone, Copy)]
pub struct MetricSample<'a> {
    pub date: &'a Value,
    entries: &'a Map<String, Value>,
}

impl<'a> MetricSample<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self, TransformError> {
        let entries = as_object(value, "metric sample")?;
        Ok(Self {
            date: required(entries, "metric sample", DATE_KEY)?,
            entries,
        })
    }

    /// All keys except `date`, with their values.
    pub fn values(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        self.entries.iter().filter(|(key, _)| key.as_str() != DATE_KEY)
    }
}

/// A workout and its raw GPS route.
#[derive(Debug, Clone, Copy)]
pub struct Workout<'a> {
    pub name: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub route: &'a [Value],
}

impl<'a> Workout<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self, TransformError> {
        let obj = as_object(value, "workout")?;
        Ok(Self {
            name: required_str(obj, "workout", "name")?,
            start: required_str(obj, "workout", "start")?,
            end: required_str(obj, "workout", "end")?,
            route: required_array(obj, "workout", "route")?,
        })
    }

    /// Identity shared by every point of this workout: `name-start-end`.
    ///
    /// Not unambiguous when the parts themselves contain `-`.
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.name, self.start, self.end)
    }
}

/// One GPS sample of a workout route.
#[derive(Debug, Clone, Copy)]
pub struct RoutePoint<'a> {
    pub timestamp: &'a Value,
    /// `x` is longitude, `y` is latitude.
    pub coord: Coord<f64>,
}

impl<'a> RoutePoint<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self, TransformError> {
        let obj = as_object(value, "route point")?;
        let timestamp = required(obj, "route point", "timestamp")?;
        let lat = required_f64(obj, "route point", "lat")?;
        let lon = required_f64(obj, "route point", "lon")?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(TransformError::InvalidCoordinate { lat, lon });
        }

        Ok(Self {
            timestamp,
            coord: Coord { x: lon, y: lat },
        })
    }

    pub fn lat(&self) -> f64 {
        self.coord.y
    }

    pub fn lon(&self) -> f64 {
        self.coord.x
    }
}

// ─── Helpers ─────────────────────────────────────────────────

fn as_object<'a>(
    value: &'a Value,
    context: &'static str,
) -> Result<&'a Map<String, Value>, TransformError> {
    value
        .as_object()
        .ok_or(TransformError::NotAnObject(context))
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    context: &'static str,
    key: &'static str,
) -> Result<&'a Value, TransformError> {
    obj.get(key)
        .ok_or(TransformError::MissingKey { context, key })
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    context: &'static str,
    key: &'static str,
) -> Result<&'a str, TransformError> {
    required(obj, context, key)?
        .as_str()
        .ok_or(TransformError::WrongType {
            context,
            key,
            expected: "a string",
        })
}

fn required_array<'a>(
    obj: &'a Map<String, Value>,
    context: &'static str,
    key: &'static str,
) -> Result<&'a [Value], TransformError> {
    required(obj, context, key)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or(TransformError::WrongType {
            context,
            key,
            expected: "an array",
        })
}

fn optional_array<'a>(
    obj: &'a Map<String, Value>,
    context: &'static str,
    key: &'static str,
) -> Result<&'a [Value], TransformError> {
    match obj.get(key) {
        None => Ok(&[]),
        Some(_) => required_array(obj, context, key),
    }
}

fn required_f64(
    obj: &Map<String, Value>,
    context: &'static str,
    key: &'static str,
) -> Result<f64, TransformError> {
    required(obj, context, key)?
        .as_f64()
        .ok_or(TransformError::WrongType {
            context,
            key,
            expected: "a number",
        })
}
