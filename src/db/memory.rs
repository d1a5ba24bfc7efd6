// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory point sink for testing (offline mode).

use crate::db::{DbError, PointSink};
use crate::models::Point;
use futures_util::future::BoxFuture;
use std::sync::{Mutex, MutexGuard};

/// Records every batch it receives.
///
/// Can be told to reject a given write call to exercise failure paths.
#[derive(Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<Point>>>,
    fail_on_call: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `n`th write call (zero-based) and every call after it.
    pub fn failing_from(n: usize) -> Self {
        Self {
            batches: Mutex::default(),
            fail_on_call: Some(n),
        }
    }

    /// Batches written so far, in call order.
    pub fn batches(&self) -> Vec<Vec<Point>> {
        self.lock().clone()
    }

    /// All points written so far, flattened.
    pub fn points(&self) -> Vec<Point> {
        self.lock().iter().flatten().cloned().collect()
    }

    pub fn write_calls(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Vec<Point>>> {
        self.batches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PointSink for MemorySink {
    fn write_points<'a>(&'a self, points: &'a [Point]) -> BoxFuture<'a, Result<(), DbError>> {
        Box::pin(async move {
            let mut batches = self.lock();
            if self.fail_on_call.is_some_and(|n| batches.len() >= n) {
                return Err(DbError::Rejected("simulated write failure".to_string()));
            }
            batches.push(points.to_vec());
            Ok(())
        })
    }
}
