// ABOUTME: Nutritionix natural language client returning pre-scaled macros
// ABOUTME: Sends "{quantity} {unit} {name}" and reads the first parsed food
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use async_trait::async_trait;
use dietrack_core::errors::AppResult;
use dietrack_core::macros::round_one_decimal;
use dietrack_core::models::{FoodQuery, MacroVector, NutritionSource};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::{decode_json, shared_client, transport_error};
use crate::spi::{NutritionProvider, ProviderReport};

const SERVICE: &str = "Nutritionix";

/// Nutritionix API configuration
#[derive(Debug, Clone)]
pub struct NutritionixConfig {
    /// Application ID (`x-app-id` header)
    pub app_id: Option<String>,
    /// Application key (`x-app-key` header)
    pub app_key: Option<String>,
    /// Base URL, default <https://trackapi.nutritionix.com/v2>
    pub base_url: String,
}

impl Default for NutritionixConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            base_url: "https://trackapi.nutritionix.com/v2".to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NaturalRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct NaturalResponse {
    #[serde(default)]
    foods: Vec<NaturalFood>,
}

#[derive(Debug, Deserialize)]
struct NaturalFood {
    nf_calories: Option<f64>,
    nf_protein: Option<f64>,
    nf_total_carbohydrate: Option<f64>,
    nf_total_fat: Option<f64>,
    nf_dietary_fiber: Option<f64>,
}

impl NaturalFood {
    fn to_macros(&self) -> MacroVector {
        MacroVector {
            calories: self.nf_calories.unwrap_or(0.0).round(),
            protein: round_one_decimal(self.nf_protein.unwrap_or(0.0)),
            carbs: round_one_decimal(self.nf_total_carbohydrate.unwrap_or(0.0)),
            fat: round_one_decimal(self.nf_total_fat.unwrap_or(0.0)),
            fiber: self.nf_dietary_fiber,
        }
    }
}

/// Nutritionix natural language nutrients provider
pub struct NutritionixProvider {
    config: NutritionixConfig,
    client: Client,
}

impl NutritionixProvider {
    /// Create a provider using the shared HTTP client
    #[must_use]
    pub fn new(config: NutritionixConfig) -> Self {
        Self {
            config,
            client: shared_client().clone(),
        }
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (self.config.app_id.as_deref(), self.config.app_key.as_deref()) {
            (Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => Some((id, key)),
            _ => None,
        }
    }
}

#[async_trait]
impl NutritionProvider for NutritionixProvider {
    fn source(&self) -> NutritionSource {
        NutritionSource::Nutritionix
    }

    fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    async fn lookup(&self, query: &FoodQuery) -> AppResult<ProviderReport> {
        let Some((app_id, app_key)) = self.credentials() else {
            return Ok(ProviderReport::miss());
        };

        let url = format!(
            "{}/natural/nutrients",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .header("x-app-id", app_id)
            .header("x-app-key", app_key)
            .json(&NaturalRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        let parsed: NaturalResponse = decode_json(SERVICE, response).await?;
        let Some(food) = parsed.foods.first() else {
            debug!(food = %query.name, "Nutritionix returned no foods");
            return Ok(ProviderReport::miss());
        };

        Ok(ProviderReport::absolute(food.to_macros()))
    }
}
