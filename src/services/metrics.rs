// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metric sample to point conversion.
//!
//! Each sample is classified independently: JSON numbers become float
//! fields, every other value becomes a string tag. The field set may differ
//! from one sample to the next within the same metric.

use crate::models::{Metric, MetricSample, Point, TransformError};
use serde_json::Value;
use std::slice;

/// Classification of one sample value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue<'a> {
    Number(f64),
    Text(&'a str),
    /// Booleans, null, arrays and objects.
    Other(&'a Value),
}

impl<'a> SampleValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map_or(SampleValue::Other(value), SampleValue::Number),
            Value::String(s) => SampleValue::Text(s),
            other => SampleValue::Other(other),
        }
    }

    /// Tag representation of a non-numeric value. `None` for numbers.
    pub fn to_tag(&self) -> Option<String> {
        match self {
            SampleValue::Number(_) => None,
            SampleValue::Text(s) => Some((*s).to_string()),
            SampleValue::Other(v) => Some(v.to_string()),
        }
    }
}

/// Lazily converts the samples of one metric into points, in order.
pub struct PointBuilder<'a> {
    name: &'a str,
    samples: slice::Iter<'a, Value>,
}

impl<'a> PointBuilder<'a> {
    pub fn new(metric: Metric<'a>) -> Self {
        Self {
            name: metric.name,
            samples: metric.samples.iter(),
        }
    }

    fn build(&self, raw: &Value) -> Result<Point, TransformError> {
        let sample = MetricSample::from_value(raw)?;
        let mut point = Point::new(self.name, sample.date.clone());

        for (key, value) in sample.values() {
            match SampleValue::classify(value) {
                SampleValue::Number(n) => {
                    point.fields.insert(key.clone(), n);
                }
                text => {
                    if let Some(tag) = text.to_tag() {
                        point.tags.insert(key.clone(), tag);
                    }
                }
            }
        }

        Ok(point)
    }
}

impl Iterator for PointBuilder<'_> {
    type Item = Result<Point, TransformError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.samples.next()?;
        Some(self.build(raw))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn build_all(metric: &Value) -> Result<Vec<Point>, TransformError> {
        PointBuilder::new(Metric::from_value(metric)?).collect()
    }

    #[test]
    fn test_numeric_value_becomes_field() {
        let metric = json!({
            "name": "heart_rate",
            "data": [{ "date": "2023-01-01T00:00:00Z", "value": 72 }]
        });
        let points = build_all(&metric).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].measurement, "heart_rate");
        assert_eq!(points[0].time, json!("2023-01-01T00:00:00Z"));
        assert_eq!(points[0].fields.get("value"), Some(&72.0));
        assert!(points[0].tags.is_empty());
    }

    #[test]
    fn test_mixed_sample_classification() {
        let metric = json!({
            "name": "sleep_analysis",
            "data": [{
                "date": "2023-01-01 00:00:00 -0800",
                "asleep": 6.5,
                "inBed": 7,
                "source": "Watch",
                "complete": true,
                "missing": null,
                "extra": { "a": 1 }
            }]
        });
        let points = build_all(&metric).unwrap();
        let point = &points[0];

        assert_eq!(point.fields.get("asleep"), Some(&6.5));
        assert_eq!(point.fields.get("inBed"), Some(&7.0));
        assert_eq!(point.tags.get("source").map(String::as_str), Some("Watch"));
        assert_eq!(point.tags.get("complete").map(String::as_str), Some("true"));
        assert_eq!(point.tags.get("missing").map(String::as_str), Some("null"));
        assert_eq!(point.tags.get("extra").map(String::as_str), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_every_json_number_is_a_field() {
        let metric = json!({
            "name": "m",
            "data": [{
                "date": "t1",
                "big": u64::MAX,
                "negative": i64::MIN,
                "tiny": 1e-300,
                "zero": 0
            }]
        });
        let point = &build_all(&metric).unwrap()[0];

        assert_eq!(point.fields.get("big"), Some(&(u64::MAX as f64)));
        assert_eq!(point.fields.get("negative"), Some(&(i64::MIN as f64)));
        assert_eq!(point.fields.get("tiny"), Some(&1e-300));
        assert_eq!(point.fields.get("zero"), Some(&0.0));
        assert!(point.tags.is_empty());
    }

    #[test]
    fn test_tags_and_fields_partition_sample_keys() {
        let sample = json!({ "date": 1, "a": 1, "b": "x", "c": 2.5, "d": false });
        let metric = json!({ "name": "m", "data": [sample.clone()] });
        let point = &build_all(&metric).unwrap()[0];

        let tags: BTreeSet<_> = point.tags.keys().cloned().collect();
        let fields: BTreeSet<_> = point.fields.keys().cloned().collect();
        assert!(tags.is_disjoint(&fields));

        let union: BTreeSet<_> = tags.union(&fields).cloned().collect();
        let expected: BTreeSet<_> = sample
            .as_object()
            .unwrap()
            .keys()
            .filter(|k| k.as_str() != "date")
            .cloned()
            .collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_classification_is_per_sample() {
        let metric = json!({
            "name": "m",
            "data": [
                { "date": "t1", "qty": 1 },
                { "date": "t2", "qty": "n/a" }
            ]
        });
        let points = build_all(&metric).unwrap();
        assert!(points[0].fields.contains_key("qty"));
        assert!(points[1].tags.contains_key("qty"));
        assert!(!points[1].fields.contains_key("qty"));
    }

    #[test]
    fn test_preserves_input_order() {
        let metric = json!({
            "name": "steps",
            "data": [
                { "date": "t3", "qty": 3 },
                { "date": "t1", "qty": 1 },
                { "date": "t2", "qty": 2 }
            ]
        });
        let times: Vec<_> = build_all(&metric)
            .unwrap()
            .into_iter()
            .map(|p| p.time)
            .collect();
        assert_eq!(times, vec![json!("t3"), json!("t1"), json!("t2")]);
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let metric = json!({ "name": "m", "data": [{ "qty": 1 }] });
        assert!(matches!(
            build_all(&metric),
            Err(TransformError::MissingKey { key: "date", .. })
        ));
    }

    #[test]
    fn test_non_object_sample_is_an_error() {
        let metric = json!({ "name": "m", "data": [42] });
        assert!(matches!(
            build_all(&metric),
            Err(TransformError::NotAnObject("metric sample"))
        ));
    }

    #[test]
    fn test_builder_is_lazy() {
        let metric = json!({ "name": "m", "data": [{ "date": "t1", "qty": 1 }, 42] });
        let mut builder = PointBuilder::new(Metric::from_value(&metric).unwrap());
        assert_eq!(builder.size_hint(), (2, Some(2)));
        assert!(builder.next().unwrap().is_ok());
        assert!(builder.next().unwrap().is_err());
        assert!(builder.next().is_none());
    }
}
