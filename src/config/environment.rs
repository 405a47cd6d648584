// ABOUTME: Environment-based server configuration
// ABOUTME: Port, deployment environment, HTTP client timeouts and nutrition settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::env;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::nutrition::NutritionLookupConfig;
use crate::constants::{ports, timeouts};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Timeouts for the shared outbound HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: timeouts::HTTP_CLIENT_TIMEOUT_SECS,
            connect_timeout_secs: timeouts::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Outbound HTTP client settings
    pub http_client: HttpClientConfig,
    /// Nutrition providers and bulk lookup
    pub nutrition: NutritionLookupConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            http_client: HttpClientConfig {
                timeout_secs: env_var_or(
                    "HTTP_CLIENT_TIMEOUT_SECS",
                    &timeouts::HTTP_CLIENT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid HTTP_CLIENT_TIMEOUT_SECS value")?,
                connect_timeout_secs: env_var_or(
                    "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                    &timeouts::HTTP_CLIENT_CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid HTTP_CLIENT_CONNECT_TIMEOUT_SECS value")?,
            },
            nutrition: NutritionLookupConfig::from_env()?,
        };

        info!(
            port = config.http_port,
            environment = %config.environment,
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Environment variable or a default
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Environment variable when set and not blank
pub(crate) fn env_var_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
