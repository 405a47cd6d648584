// ABOUTME: USDA FoodData Central search client returning per-100g macros
// ABOUTME: Biases searches toward raw ingredients, caches hits and rate limits requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! USDA `FoodData` Central provider
//!
//! Searches `"{name} raw"` so basic ingredients outrank branded products,
//! takes the top hit's per-100g nutrients and offers the first five hit
//! descriptions as suggestions whether or not the top hit is used.
//!
//! # Features
//! - Search result caching (24 hours by default)
//! - Rate limiting (30 requests per minute by default)
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dietrack_core::errors::AppResult;
use dietrack_core::models::{FoodQuery, MacroVector, NutritionSource};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::debug;

use crate::http_client::{decode_json, shared_client, transport_error};
use crate::spi::{NutritionProvider, ProviderReport};

const SERVICE: &str = "USDA API";

/// Nutrient IDs used by `FoodData` Central
pub mod nutrient_ids {
    /// Energy (kcal)
    pub const ENERGY_KCAL: u32 = 1008;
    /// Energy, Atwater general factors (kcal), reported by Foundation foods
    pub const ENERGY_ATWATER_GENERAL: u32 = 2047;
    /// Protein (g)
    pub const PROTEIN: u32 = 1003;
    /// Carbohydrate, by difference (g)
    pub const CARBOHYDRATE: u32 = 1005;
    /// Total lipid (g)
    pub const FAT: u32 = 1004;
    /// Fiber, total dietary (g)
    pub const FIBER: u32 = 1079;
}

/// Number of suggestions kept from a search
const MAX_SUGGESTIONS: usize = 5;

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaConfig {
    /// USDA API key; the provider is disabled without one
    pub api_key: Option<String>,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Cache TTL in seconds (default: 86400 = 24 hours)
    pub cache_ttl_secs: u64,
    /// Rate limit per minute (default: 30)
    pub rate_limit_per_minute: u32,
    /// Search page size (default: 5)
    pub page_size: u32,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.nal.usda.gov/fdc/v1".to_owned(),
            cache_ttl_secs: 86_400,
            rate_limit_per_minute: 30,
            page_size: 5,
        }
    }
}

/// One search hit with its abridged nutrient list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFood {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    #[serde(default)]
    pub description: String,
    /// Per-100g nutrient values
    #[serde(default)]
    pub food_nutrients: Vec<SearchNutrient>,
}

/// Nutrient entry in a search hit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNutrient {
    /// Nutrient ID
    pub nutrient_id: Option<u32>,
    /// Amount per 100g
    pub value: Option<f64>,
}

impl SearchFood {
    fn nutrient(&self, id: u32) -> Option<f64> {
        self.food_nutrients
            .iter()
            .find(|n| n.nutrient_id == Some(id))
            .and_then(|n| n.value)
    }

    /// Per-100g macros of this hit; absent nutrients count as zero
    #[must_use]
    pub fn macros_per_100g(&self) -> MacroVector {
        let calories = self
            .nutrient(nutrient_ids::ENERGY_KCAL)
            .or_else(|| self.nutrient(nutrient_ids::ENERGY_ATWATER_GENERAL))
            .unwrap_or(0.0);
        MacroVector {
            calories,
            protein: self.nutrient(nutrient_ids::PROTEIN).unwrap_or(0.0),
            carbs: self.nutrient(nutrient_ids::CARBOHYDRATE).unwrap_or(0.0),
            fat: self.nutrient(nutrient_ids::FAT).unwrap_or(0.0),
            fiber: Some(self.nutrient(nutrient_ids::FIBER).unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Sliding-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    fn can_request(&mut self) -> bool {
        let now = Instant::now();
        self.requests
            .retain(|&t| now.duration_since(t) < self.window);
        self.requests.len() < self.limit as usize
    }

    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }

    async fn wait_if_needed(&mut self) {
        while !self.can_request() {
            sleep(Duration::from_secs(1)).await;
        }
    }
}

/// USDA `FoodData` Central provider
pub struct UsdaProvider {
    config: UsdaConfig,
    client: Client,
    search_cache: Arc<RwLock<HashMap<String, CacheEntry<Vec<SearchFood>>>>>,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl UsdaProvider {
    /// Create a provider using the shared HTTP client
    #[must_use]
    pub fn new(config: UsdaConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));
        Self {
            config,
            client: shared_client().clone(),
            search_cache: Arc::new(RwLock::new(HashMap::new())),
            rate_limiter: Arc::new(RwLock::new(rate_limiter)),
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Search foods, serving repeated queries from cache
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the request fails or the
    /// response cannot be parsed.
    pub async fn search_foods(&self, search: &str) -> AppResult<Vec<SearchFood>> {
        {
            let cache = self.search_cache.read().await;
            if let Some(entry) = cache.get(search) {
                if Instant::now() < entry.expires_at {
                    return Ok(entry.data.clone());
                }
            }
        }

        let api_key = self.api_key().unwrap_or_default();

        {
            let mut limiter = self.rate_limiter.write().await;
            limiter.wait_if_needed().await;
            limiter.record_request();
        }

        let url = format!("{}/foods/search", self.config.base_url.trim_end_matches('/'));
        let page_size = self.config.page_size.to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("api_key", api_key),
                ("query", search),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        let parsed: SearchResponse = decode_json(SERVICE, response).await?;

        {
            let mut cache = self.search_cache.write().await;
            let now = Instant::now();
            cache.retain(|_, entry| entry.expires_at > now);
            cache.insert(
                search.to_owned(),
                CacheEntry {
                    data: parsed.foods.clone(),
                    expires_at: Instant::now() + Duration::from_secs(self.config.cache_ttl_secs),
                },
            );
        }

        Ok(parsed.foods)
    }

    /// Clear the search cache
    pub async fn clear_cache(&self) {
        self.search_cache.write().await.clear();
    }

    /// Number of cached searches
    pub async fn cache_len(&self) -> usize {
        self.search_cache.read().await.len()
    }
}

#[async_trait]
impl NutritionProvider for UsdaProvider {
    fn source(&self) -> NutritionSource {
        NutritionSource::Usda
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    async fn lookup(&self, query: &FoodQuery) -> AppResult<ProviderReport> {
        if !self.is_configured() {
            return Ok(ProviderReport::miss());
        }

        let foods = self.search_foods(&format!("{} raw", query.name)).await?;
        let Some(top) = foods.first() else {
            debug!(food = %query.name, "USDA search returned no foods");
            return Ok(ProviderReport::miss());
        };

        let suggestions = foods
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|food| food.description.clone())
            .collect();

        Ok(ProviderReport::per_100g(top.macros_per_100g()).with_suggestions(suggestions))
    }
}
