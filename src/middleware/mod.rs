// ABOUTME: HTTP middleware for the dietrack API
// ABOUTME: CORS configuration shared by every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

/// Cross-origin request policy
pub mod cors;

pub use cors::setup_cors;
