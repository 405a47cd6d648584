// ABOUTME: HTTP server assembly and lifecycle for the dietrack API
// ABOUTME: Builds the router with tracing, CORS, body limit and timeout layers, then serves it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use dietrack_providers::http_client::initialize_shared_client;
use tokio::net::TcpListener;
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{signal as unix_signal, SignalKind};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::constants::limits::MAX_REQUEST_BODY_BYTES;
use crate::constants::timeouts::REQUEST_TIMEOUT_SECS;
use crate::middleware::setup_cors;
use crate::nutrition::NutritionCascade;
use crate::routes::{HealthRoutes, NutritionRoutes};

/// Router with every route and middleware layer
pub fn build_router(cascade: Arc<NutritionCascade>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(NutritionRoutes::routes(cascade))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(setup_cors())
        .layer(TraceLayer::new_for_http())
}

/// Serve the API until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound or the server fails
pub async fn run(config: ServerConfig) -> Result<()> {
    initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );

    let cascade = Arc::new(NutritionCascade::from_config(&config.nutrition));
    info!(
        providers = ?cascade.active_sources(),
        "Nutrition cascade ready"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, environment = %config.environment, "HTTP server listening");

    axum::serve(listener, build_router(cascade))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
