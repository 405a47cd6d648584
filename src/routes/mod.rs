// ABOUTME: HTTP route definitions grouped by domain
// ABOUTME: Health checks and the bulk nutrition lookup endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! Each domain module holds route definitions and thin handlers that delegate
//! to the nutrition pipeline.

/// Health check routes
pub mod health;
/// Bulk nutrition lookup routes
pub mod nutrition;

pub use health::HealthRoutes;
pub use nutrition::{NutritionLookupRequest, NutritionLookupResponse, NutritionRoutes};
