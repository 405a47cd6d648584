// ABOUTME: Shared HTTP client with connection pooling for nutrition provider calls
// ABOUTME: Singleton with configurable timeouts plus response decoding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::sync::OnceLock;
use std::time::Duration;

use dietrack_core::errors::{AppError, AppResult, ErrorCode};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Longest error body echoed into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration
///
/// Call once at startup before any provider is built. Without it the
/// defaults apply (30s timeout, 10s connect timeout).
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    let _ = CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs));
}

/// Get the shared HTTP client for provider API calls
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS
            .get()
            .copied()
            .unwrap_or((DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS));

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Map a transport failure to an `AppError`
pub fn transport_error(service: &str, error: &reqwest::Error) -> AppError {
    if error.is_connect() || error.is_timeout() {
        AppError::external_unavailable(service, error.to_string())
    } else {
        AppError::external_service(service, error.to_string())
    }
}

/// Check the status and decode a JSON body
///
/// # Errors
///
/// Returns an external service error for non-2xx statuses, unreadable bodies
/// and bodies that do not match `T`.
pub async fn decode_json<T: DeserializeOwned>(
    service: &str,
    response: Response,
) -> AppResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(service, &e))?;

    if !status.is_success() {
        return Err(status_error(service, status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        AppError::external_service(service, format!("JSON parse error: {e}")).with_source(e)
    })
}

fn status_error(service: &str, status: StatusCode, body: &str) -> AppError {
    let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    let error = AppError::external_service(service, format!("HTTP {status}: {snippet}"));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError {
            code: ErrorCode::ExternalAuthFailed,
            ..error
        },
        StatusCode::TOO_MANY_REQUESTS => AppError {
            code: ErrorCode::ExternalRateLimited,
            ..error
        },
        _ => error,
    }
}
