// ABOUTME: OpenFoodFacts Italian product search returning per-100g macros
// ABOUTME: Excludes snacks, skips implausible energy values and tolerates string numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use async_trait::async_trait;
use dietrack_core::errors::AppResult;
use dietrack_core::models::{FoodQuery, MacroVector, NutritionSource};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::http_client::{decode_json, shared_client, transport_error};
use crate::spi::{NutritionProvider, ProviderReport};

const SERVICE: &str = "OpenFoodFacts";

/// Products requested per search
const PAGE_SIZE: &str = "10";

/// Number of suggestions kept from a search
const MAX_SUGGESTIONS: usize = 5;

/// Upper bound (exclusive) for a believable kcal per 100g
const MAX_PLAUSIBLE_KCAL_PER_100G: f64 = 1000.0;

/// `OpenFoodFacts` configuration
#[derive(Debug, Clone)]
pub struct OpenFoodFactsConfig {
    /// Whether to query the service at all
    pub enabled: bool,
    /// Base URL, default <https://it.openfoodfacts.org>
    pub base_url: String,
    /// `User-Agent` sent with every request
    pub user_agent: String,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://it.openfoodfacts.org".to_owned(),
            user_agent: concat!("dietrack/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Accept JSON numbers, numeric strings (comma or dot decimals) and null
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }))
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    product_name_it: Option<String>,
    product_name: Option<String>,
    nutriments: Option<Nutriments>,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_f64")]
    energy_kcal_100g: Option<f64>,
    #[serde(rename = "proteins_100g", default, deserialize_with = "lenient_f64")]
    proteins_100g: Option<f64>,
    #[serde(rename = "carbohydrates_100g", default, deserialize_with = "lenient_f64")]
    carbohydrates_100g: Option<f64>,
    #[serde(rename = "fat_100g", default, deserialize_with = "lenient_f64")]
    fat_100g: Option<f64>,
    #[serde(rename = "fiber_100g", default, deserialize_with = "lenient_f64")]
    fiber_100g: Option<f64>,
}

impl Product {
    fn display_name(&self) -> String {
        [&self.product_name_it, &self.product_name]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| "Unknown".to_owned())
    }

    fn plausible_nutriments(&self) -> Option<&Nutriments> {
        self.nutriments.as_ref().filter(|n| {
            n.energy_kcal_100g
                .is_some_and(|kcal| kcal > 0.0 && kcal < MAX_PLAUSIBLE_KCAL_PER_100G)
        })
    }
}

impl Nutriments {
    fn macros_per_100g(&self) -> MacroVector {
        MacroVector {
            calories: self.energy_kcal_100g.unwrap_or(0.0),
            protein: self.proteins_100g.unwrap_or(0.0),
            carbs: self.carbohydrates_100g.unwrap_or(0.0),
            fat: self.fat_100g.unwrap_or(0.0),
            fiber: self.fiber_100g.filter(|fiber| *fiber != 0.0),
        }
    }
}

/// `OpenFoodFacts` search provider
pub struct OpenFoodFactsProvider {
    config: OpenFoodFactsConfig,
    client: Client,
}

impl OpenFoodFactsProvider {
    /// Create a provider using the shared HTTP client
    #[must_use]
    pub fn new(config: OpenFoodFactsConfig) -> Self {
        Self {
            config,
            client: shared_client().clone(),
        }
    }
}

#[async_trait]
impl NutritionProvider for OpenFoodFactsProvider {
    fn source(&self) -> NutritionSource {
        NutritionSource::OpenFoodFacts
    }

    fn is_configured(&self) -> bool {
        self.config.enabled
    }

    async fn lookup(&self, query: &FoodQuery) -> AppResult<ProviderReport> {
        let url = format!("{}/cgi/search.pl", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .query(&[
                ("search_terms", query.name.as_str()),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", PAGE_SIZE),
                ("lc", "it"),
                ("tagtype_0", "categories"),
                ("tag_contains_0", "does_not_contain"),
                ("tag_0", "en:snacks"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        let parsed: SearchResponse = decode_json(SERVICE, response).await?;
        if parsed.products.is_empty() {
            debug!(food = %query.name, "OpenFoodFacts returned no products");
            return Ok(ProviderReport::miss());
        }

        let suggestions: Vec<String> = parsed
            .products
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(Product::display_name)
            .collect();

        let Some(nutriments) = parsed.products.iter().find_map(Product::plausible_nutriments)
        else {
            return Ok(ProviderReport::suggestions_only(suggestions));
        };

        Ok(ProviderReport::per_100g(nutriments.macros_per_100g()).with_suggestions(suggestions))
    }
}
