// ABOUTME: Nutrition provider credentials and bulk lookup settings from the environment
// ABOUTME: Missing credentials disable a provider, they are never an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::time::Duration;

use anyhow::{Context, Result};

#[cfg(feature = "provider-llm")]
use dietrack_providers::llm_estimator::LlmEstimatorConfig;
#[cfg(feature = "provider-nutritionix")]
use dietrack_providers::nutritionix::NutritionixConfig;
#[cfg(feature = "provider-openfoodfacts")]
use dietrack_providers::openfoodfacts::OpenFoodFactsConfig;
#[cfg(feature = "provider-usda")]
use dietrack_providers::usda::UsdaConfig;

use super::environment::{env_var_opt, env_var_or};
use crate::constants::timeouts::NUTRITION_LOOKUP_TIMEOUT_SECS;

/// Settings for the provider cascade and the bulk orchestrator
#[derive(Debug, Clone)]
pub struct NutritionLookupConfig {
    /// Nutritionix credentials and endpoint
    #[cfg(feature = "provider-nutritionix")]
    pub nutritionix: NutritionixConfig,
    /// USDA `FoodData` Central key, endpoint, cache and rate limit
    #[cfg(feature = "provider-usda")]
    pub usda: UsdaConfig,
    /// `OpenFoodFacts` switch and endpoint
    #[cfg(feature = "provider-openfoodfacts")]
    pub openfoodfacts: OpenFoodFactsConfig,
    /// LLM estimator key, endpoint and model
    #[cfg(feature = "provider-llm")]
    pub llm: LlmEstimatorConfig,
    /// Remote batch endpoint for bulk phase two; in-process when unset
    pub lookup_url: Option<String>,
    /// Wall-clock budget for bulk phase two
    pub lookup_timeout: Duration,
}

impl Default for NutritionLookupConfig {
    fn default() -> Self {
        Self {
            #[cfg(feature = "provider-nutritionix")]
            nutritionix: NutritionixConfig::default(),
            #[cfg(feature = "provider-usda")]
            usda: UsdaConfig::default(),
            #[cfg(feature = "provider-openfoodfacts")]
            openfoodfacts: OpenFoodFactsConfig::default(),
            #[cfg(feature = "provider-llm")]
            llm: LlmEstimatorConfig::default(),
            lookup_url: None,
            lookup_timeout: Duration::from_secs(NUTRITION_LOOKUP_TIMEOUT_SECS),
        }
    }
}

impl NutritionLookupConfig {
    /// Load provider settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric or boolean variable does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let lookup_timeout_secs: u64 = env_var_or(
            "NUTRITION_LOOKUP_TIMEOUT_SECS",
            &NUTRITION_LOOKUP_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .context("Invalid NUTRITION_LOOKUP_TIMEOUT_SECS value")?;

        Ok(Self {
            #[cfg(feature = "provider-nutritionix")]
            nutritionix: NutritionixConfig {
                app_id: env_var_opt("NUTRITIONIX_APP_ID"),
                app_key: env_var_opt("NUTRITIONIX_APP_KEY"),
                base_url: env_var_or("NUTRITIONIX_BASE_URL", &defaults.nutritionix.base_url),
            },
            #[cfg(feature = "provider-usda")]
            usda: UsdaConfig {
                api_key: env_var_opt("USDA_API_KEY"),
                base_url: env_var_or("USDA_BASE_URL", &defaults.usda.base_url),
                ..defaults.usda
            },
            #[cfg(feature = "provider-openfoodfacts")]
            openfoodfacts: OpenFoodFactsConfig {
                enabled: env_var_or("OPENFOODFACTS_ENABLED", "true")
                    .parse()
                    .context("Invalid OPENFOODFACTS_ENABLED value")?,
                base_url: env_var_or("OPENFOODFACTS_BASE_URL", &defaults.openfoodfacts.base_url),
                ..defaults.openfoodfacts
            },
            #[cfg(feature = "provider-llm")]
            llm: LlmEstimatorConfig {
                api_key: env_var_opt("OPENAI_API_KEY"),
                base_url: env_var_or("OPENAI_BASE_URL", &defaults.llm.base_url),
                model: env_var_or("NUTRITION_LLM_MODEL", &defaults.llm.model),
                ..defaults.llm
            },
            lookup_url: env_var_opt("NUTRITION_LOOKUP_URL"),
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
        })
    }
}
