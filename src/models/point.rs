// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time-series point, the unit written to the database.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One time-series point.
///
/// `time` is carried exactly as it appeared in the export; conversion to
/// epoch nanoseconds happens only when the point is encoded for the wire.
/// Tag and field keys never overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub measurement: String,
    pub time: Value,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, f64>,
}

impl Point {
    pub fn new(measurement: impl Into<String>, time: Value) -> Self {
        Self {
            measurement: measurement.into(),
            time,
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}
