// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Reports liveness together with the service name and version
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::constants::endpoints::HEALTH_CHECK;
use crate::constants::service::{SERVICE_NAME, SERVICE_VERSION};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes() -> Router {
        Router::new().route(HEALTH_CHECK, get(Self::handle_health))
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": SERVICE_VERSION,
            "timestamp": Utc::now().to_rfc3339()
        }))
    }
}
