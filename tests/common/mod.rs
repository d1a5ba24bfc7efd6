// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use health_ingest::config::Config;
use health_ingest::db::MemorySink;
use health_ingest::routes::create_router;
use health_ingest::AppState;
use std::sync::Arc;

/// Create a test app backed by the given in-memory sink.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with(sink: Arc<MemorySink>, config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState { config, sink });
    (create_router(state.clone()), state)
}

/// Create a test app with default config and a recording sink.
/// Returns the router and the sink, for inspecting writes.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let (app, _) = create_test_app_with(sink.clone(), Config::default());
    (app, sink)
}

/// Read a response body as a string.
#[allow(dead_code)]
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
