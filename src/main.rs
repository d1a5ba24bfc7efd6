// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health-Ingest API Server
//!
//! Receives health-data exports on `/collect` and stores them as
//! time-series points in InfluxDB.

use health_ingest::{config::Config, db::InfluxClient, AppState};
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        influx = %config.influx_url(),
        database = %config.influx_database,
        chunk_size = config.chunk_size,
        "Starting Health-Ingest"
    );

    // Connect to InfluxDB and make sure the database exists
    let mut influx = InfluxClient::new(&config);
    influx.create_database_if_absent(&config.influx_database).await?;
    influx.select_database(&config.influx_database);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        sink: Arc::new(influx),
    });

    // Build router
    let app = health_ingest::routes::create_router(state);

    let endpoint = format!("http://{}:{}/collect", local_ip(), config.port);
    tracing::info!(endpoint = %endpoint, "Local network endpoint");

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Address other devices on the local network can reach us at.
///
/// Connecting a UDP socket sends no packets; it only asks the OS which
/// interface would route to the target.
fn local_ip() -> IpAddr {
    UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .and_then(|socket| {
            socket.connect((Ipv4Addr::new(192, 0, 2, 1), 80))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not determine local address");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        })
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("health_ingest=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
