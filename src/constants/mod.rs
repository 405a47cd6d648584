// ABOUTME: Application constants grouped by domain
// ABOUTME: Unit conversions, endpoint paths, ports and lookup defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! Constants module

/// Gram conversion factors
pub mod units;

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Bulk nutrition lookup endpoint
    pub const NUTRITION_LOOKUP: &str = "/api/nutrition-lookup";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Timeouts in seconds
pub mod timeouts {
    /// Bound on the remote phase of a bulk lookup
    pub const NUTRITION_LOOKUP_TIMEOUT_SECS: u64 = 30;
    /// Overall HTTP client request timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
    /// HTTP client connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Bound on one inbound HTTP request
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
}

/// Lookup limits
pub mod limits {
    /// Suggestions offered for an unresolved food
    pub const MAX_SUGGESTIONS: usize = 5;
    /// Largest accepted request body for the lookup endpoint
    pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
}

/// Progress milestones for bulk lookups
pub mod progress {
    /// Percent reached once every item went through the local table
    pub const LOCAL_PHASE_PERCENT: u8 = 50;
    /// Percent reported while the remote batch is in flight
    pub const REMOTE_PHASE_PERCENT: u8 = 60;
    /// Completion
    pub const DONE_PERCENT: u8 = 100;
}

/// Service identity
pub mod service {
    /// Service name reported in logs and health checks
    pub const SERVICE_NAME: &str = "dietrack";
    /// Service version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}
