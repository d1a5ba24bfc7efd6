// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! InfluxDB 1.x client.
//!
//! Provides:
//! - Database creation at startup (`CREATE DATABASE` is idempotent)
//! - Batched point writes, one HTTP request per batch

use crate::config::Config;
use crate::db::{DbError, PointSink};
use crate::models::Point;
use crate::time_utils::to_epoch_nanos;
use futures_util::future::BoxFuture;
use influxdb::{Client, InfluxDbWriteable, ReadQuery, Timestamp, WriteQuery};
use std::future::Future;
use std::time::Duration;

/// InfluxDB client.
#[derive(Clone)]
pub struct InfluxClient {
    client: Client,
    url: String,
    database: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl InfluxClient {
    /// Create a client from configuration. No request is made yet.
    pub fn new(config: &Config) -> Self {
        let credentials = config.influx_username.as_ref().map(|user| {
            let password = config.influx_password.clone().unwrap_or_default();
            (user.clone(), password)
        });

        let url = config.influx_url();
        let client = connect(&url, &config.influx_database, credentials.as_ref());

        Self {
            client,
            url,
            database: config.influx_database.clone(),
            credentials,
            timeout: config.influx_timeout,
        }
    }

    /// Name of the database writes go to.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Create `name` unless it already exists.
    pub async fn create_database_if_absent(&self, name: &str) -> Result<(), DbError> {
        let query = ReadQuery::new(format!(
            "CREATE DATABASE \"{}\"",
            name.replace('"', "\\\"")
        ));

        self.with_timeout(self.client.query(query)).await?;
        tracing::info!(database = name, "Database ready");
        Ok(())
    }

    /// Direct subsequent writes to `name`.
    pub fn select_database(&mut self, name: &str) {
        self.client = connect(&self.url, name, self.credentials.as_ref());
        self.database = name.to_string();
    }

    /// Write one batch of points.
    pub async fn write(&self, points: &[Point]) -> Result<(), DbError> {
        if points.is_empty() {
            return Ok(());
        }

        let batch = points
            .iter()
            .map(write_query)
            .collect::<Result<Vec<_>, _>>()?;

        self.with_timeout(self.client.query(batch)).await?;
        Ok(())
    }

    async fn with_timeout<F>(&self, request: F) -> Result<String, DbError>
    where
        F: Future<Output = Result<String, influxdb::Error>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(body)) => Ok(body),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "InfluxDB request failed");
                Err(e.into())
            }
            Err(_) => Err(DbError::Timeout(self.timeout)),
        }
    }
}

impl PointSink for InfluxClient {
    fn write_points<'a>(&'a self, points: &'a [Point]) -> BoxFuture<'a, Result<(), DbError>> {
        Box::pin(self.write(points))
    }
}

fn connect(url: &str, database: &str, credentials: Option<&(String, String)>) -> Client {
    let client = Client::new(url, database);
    match credentials {
        Some((user, password)) => client.with_auth(user, password),
        None => client,
    }
}

/// Convert a point into a nanosecond-precision write query.
///
/// Tags with an empty value are dropped. A point without fields, or with a
/// non-finite field, cannot be stored and is an encoding error.
pub fn write_query(point: &Point) -> Result<WriteQuery, DbError> {
    let nanos = to_epoch_nanos(&point.time)
        .map_err(|e| DbError::Encoding(format!("{} in {:?}", e, point.measurement)))?;
    let nanos = u128::try_from(nanos).map_err(|_| {
        DbError::Encoding(format!(
            "timestamp {} in {:?} is before the epoch",
            point.time, point.measurement
        ))
    })?;

    if point.fields.is_empty() {
        return Err(DbError::Encoding(format!(
            "point in {:?} at {} has no fields",
            point.measurement, point.time
        )));
    }

    let mut query = Timestamp::Nanoseconds(nanos).into_query(escape_backslashes(&point.measurement));

    for (key, value) in &point.tags {
        if value.is_empty() {
            continue;
        }
        query = query.add_tag(escape_backslashes(key), value.as_str());
    }

    for (key, value) in &point.fields {
        if !value.is_finite() {
            return Err(DbError::Encoding(format!(
                "field {key:?} in {:?} is not finite: {value}",
                point.measurement
            )));
        }
        query = query.add_field(escape_backslashes(key), *value);
    }

    Ok(query)
}

/// The client escapes separators in names but leaves backslashes alone, so
/// a trailing `\` would swallow the separator after it.
fn escape_backslashes(name: &str) -> String {
    name.replace('\\', "\\\\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use influxdb::Query;
    use serde_json::json;

    fn line(point: &Point) -> String {
        write_query(point).unwrap().build().unwrap().get()
    }

    #[test]
    fn test_tags_and_fields_in_key_order() {
        let point = Point::new("workouts", json!(5))
            .tag("id", "Run-s1-e1")
            .tag("geohash", "s000000")
            .field("lng", 2.0)
            .field("lat", 1.5);

        assert_eq!(
            line(&point),
            "workouts,geohash=s000000,id=Run-s1-e1 lat=1.5,lng=2 5"
        );
    }

    #[test]
    fn test_time_is_converted_to_nanoseconds() {
        let point = Point::new("heart_rate", json!("2023-01-01T00:00:00Z")).field("value", 72.0);
        assert_eq!(line(&point), "heart_rate value=72 1672531200000000000");
    }

    #[test]
    fn test_separators_are_escaped() {
        let point = Point::new("step count", json!(1))
            .tag("source", "Apple Watch, v2")
            .tag("a=b", "c=d")
            .field("total qty", 1.0);

        assert_eq!(
            line(&point),
            r"step\ count,a\=b=c\=d,source=Apple\ Watch\,\ v2 total\ qty=1 1"
        );
    }

    #[test]
    fn test_trailing_backslash_does_not_merge_tags() {
        let point = Point::new("m", json!(1))
            .tag("a", "C:\\")
            .tag("b", "x")
            .field("qty", 1.0);

        let line = line(&point);
        assert!(line.contains(r"a=C:\\,b=x "), "{line}");
    }

    #[test]
    fn test_backslashes_in_names_are_escaped() {
        let point = Point::new("dir\\", json!(1))
            .tag("k\\", "v")
            .field("f\\", 1.0);

        assert_eq!(line(&point), r"dir\\,k\\=v f\\=1 1");
    }

    #[test]
    fn test_empty_tag_values_are_omitted() {
        let point = Point::new("m", json!(1))
            .tag("empty", "")
            .tag("source", "x")
            .field("qty", 1.0);
        assert_eq!(line(&point), "m,source=x qty=1 1");
    }

    #[test]
    fn test_point_without_fields_is_rejected() {
        let point = Point::new("m", json!(1)).tag("source", "x");
        assert!(matches!(write_query(&point), Err(DbError::Encoding(_))));
    }

    #[test]
    fn test_non_finite_field_is_rejected() {
        let point = Point::new("m", json!(1)).field("qty", f64::NAN);
        assert!(matches!(write_query(&point), Err(DbError::Encoding(_))));
    }

    #[test]
    fn test_bad_time_is_rejected() {
        for time in [json!("not a time"), json!(1.5), json!(-1), json!(null)] {
            let point = Point::new("m", time.clone()).field("qty", 1.0);
            assert!(
                matches!(write_query(&point), Err(DbError::Encoding(_))),
                "{time}"
            );
        }
    }
}
