// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Browser clients on any origin may call the lookup endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use http::{header::HeaderName, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS policy: any origin, `GET`/`POST`/`OPTIONS`, JSON content type
#[must_use]
pub fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
