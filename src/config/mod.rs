// ABOUTME: Configuration management for the server and the nutrition lookup pipeline
// ABOUTME: Environment-only configuration loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! Configuration module
//!
//! - **Environment**: server settings (`HTTP_PORT`, `ENVIRONMENT`, client timeouts)
//! - **Nutrition**: provider credentials, base URLs and bulk lookup settings

/// Server configuration from environment variables
pub mod environment;

/// Nutrition provider and bulk lookup configuration
pub mod nutrition;

pub use environment::{Environment, HttpClientConfig, ServerConfig};
pub use nutrition::NutritionLookupConfig;
