// ABOUTME: Main library entry point for the dietrack nutrition service
// ABOUTME: Food lookup cascade, bulk orchestration, weekly progress and the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![deny(unsafe_code)]

//! # Dietrack
//!
//! Weekly diet plan tracking built around a multi-source nutrition lookup.
//!
//! ## Features
//!
//! - **Local first**: an embedded table of common Italian foods resolves most
//!   plan lines without any network call
//! - **Provider cascade**: Nutritionix, USDA `FoodData` Central, `OpenFoodFacts`
//!   and an LLM estimator are consulted in order when the table misses
//! - **Bulk lookup**: whole plans resolve in two phases with progress reporting
//! - **Weekly progress**: consumed against planned macros, with meal
//!   recommendations for the rest of the week
//!
//! ## Architecture
//!
//! - **Nutrition**: unit and name normalization, local table, cascade, bulk
//! - **Progress**: week boundaries, aggregation and recommendations
//! - **Plan extraction**: parsing of model-extracted weekly plans
//! - **Routes**: axum HTTP surface over the cascade
//! - **Config**: environment-only settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dietrack::config::NutritionLookupConfig;
//! use dietrack::models::FoodQuery;
//! use dietrack::nutrition::NutritionCascade;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cascade = NutritionCascade::from_config(&NutritionLookupConfig::default());
//!     let result = cascade.resolve(&FoodQuery::new("petto di pollo", 150.0, "g")).await;
//!     println!("{:?}", result.nutrition);
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants grouped by concern
pub mod constants;

/// Unified error handling, re-exported from `dietrack-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models, re-exported from `dietrack-core`
pub mod models;

/// Food lookup: units, names, local table, provider cascade and bulk lookup
pub mod nutrition;

/// Parsing of weekly plans extracted from photos by a vision model
pub mod plan_extraction;

/// Weekly progress and recommendations
pub mod progress;

/// HTTP route handlers
pub mod routes;

/// Server assembly and lifecycle
pub mod server;
