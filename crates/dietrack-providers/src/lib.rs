// ABOUTME: External nutrition data providers behind a single async trait
// ABOUTME: Nutritionix, USDA FoodData Central, OpenFoodFacts and an LLM estimator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![deny(unsafe_code)]

//! # Dietrack Providers
//!
//! Adapters for the remote nutrition sources consulted after the local food
//! table. Each adapter validates its provider's loosely typed JSON at the
//! boundary and reports either a hit, a miss with suggestions, or an error.
//! Deciding what an error means (skip to the next provider) is left to the
//! cascade in the main crate.
//!
//! Providers are compiled in through feature flags:
//!
//! - `provider-nutritionix`
//! - `provider-usda`
//! - `provider-openfoodfacts`
//! - `provider-llm`

/// Shared HTTP client with connection pooling
pub mod http_client;

/// Provider trait and the report type every adapter returns
pub mod spi;

/// Nutritionix natural language nutrients endpoint
#[cfg(feature = "provider-nutritionix")]
pub mod nutritionix;

/// USDA `FoodData` Central search with caching and rate limiting
#[cfg(feature = "provider-usda")]
pub mod usda;

/// `OpenFoodFacts` public product search
#[cfg(feature = "provider-openfoodfacts")]
pub mod openfoodfacts;

/// OpenAI-compatible chat completion used as a last-resort estimator
#[cfg(feature = "provider-llm")]
pub mod llm_estimator;

pub use spi::{MacroBasis, NutritionProvider, ProviderHit, ProviderReport};
