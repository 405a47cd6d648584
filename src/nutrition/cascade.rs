// ABOUTME: Sequential provider cascade resolving one food query to nutrition data
// ABOUTME: Local table first, then the configured remote providers, first hit wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Provider Cascade
//!
//! Providers are consulted strictly in order. A provider that is not
//! configured is skipped without a call. A provider that fails is logged and
//! treated as having found nothing, so one broken upstream never aborts a
//! lookup. The first provider to return macros wins.
//!
//! Suggestions come from the first provider that offered any; later lists
//! are ignored.

use std::sync::Arc;

use dietrack_core::macros::round_one_decimal;
use dietrack_providers::{MacroBasis, NutritionProvider, ProviderHit};
use tracing::{debug, warn};

#[cfg(feature = "provider-llm")]
use dietrack_providers::llm_estimator::LlmEstimatorProvider;
#[cfg(feature = "provider-nutritionix")]
use dietrack_providers::nutritionix::NutritionixProvider;
#[cfg(feature = "provider-openfoodfacts")]
use dietrack_providers::openfoodfacts::OpenFoodFactsProvider;
#[cfg(feature = "provider-usda")]
use dietrack_providers::usda::UsdaProvider;

use crate::config::NutritionLookupConfig;
use crate::constants::units::GRAMS_PER_BASIS;
use crate::models::{FoodLookupResult, FoodQuery, MacroVector, NutritionResult};

use super::local::LocalFoodProvider;
use super::normalizer::normalize;
use super::units::grams_for;

/// Ordered list of nutrition providers
#[derive(Clone, Default)]
pub struct NutritionCascade {
    providers: Vec<Arc<dyn NutritionProvider>>,
}

impl NutritionCascade {
    /// Cascade over an explicit provider list, consulted in the given order
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn NutritionProvider>>) -> Self {
        Self { providers }
    }

    /// Local table followed by every compiled-in remote provider
    #[must_use]
    pub fn from_config(config: &NutritionLookupConfig) -> Self {
        let mut providers: Vec<Arc<dyn NutritionProvider>> = vec![Arc::new(LocalFoodProvider)];
        providers.extend(Self::remote_providers(config));
        Self { providers }
    }

    /// Remote providers only, for callers that already tried the local table
    #[must_use]
    pub fn remote_only(config: &NutritionLookupConfig) -> Self {
        Self {
            providers: Self::remote_providers(config),
        }
    }

    #[allow(unused_variables, unused_mut)]
    fn remote_providers(config: &NutritionLookupConfig) -> Vec<Arc<dyn NutritionProvider>> {
        let mut providers: Vec<Arc<dyn NutritionProvider>> = Vec::new();
        #[cfg(feature = "provider-nutritionix")]
        providers.push(Arc::new(NutritionixProvider::new(config.nutritionix.clone())));
        #[cfg(feature = "provider-usda")]
        providers.push(Arc::new(UsdaProvider::new(config.usda.clone())));
        #[cfg(feature = "provider-openfoodfacts")]
        providers.push(Arc::new(OpenFoodFactsProvider::new(
            config.openfoodfacts.clone(),
        )));
        #[cfg(feature = "provider-llm")]
        providers.push(Arc::new(LlmEstimatorProvider::new(config.llm.clone())));
        providers
    }

    /// Sources of the configured providers, in cascade order
    #[must_use]
    pub fn active_sources(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|provider| provider.is_configured())
            .map(|provider| provider.source().as_str())
            .collect()
    }

    /// Resolve one query. Never fails: when nothing is found the result asks
    /// for manual input and carries whatever suggestions were collected.
    pub async fn resolve(&self, query: &FoodQuery) -> FoodLookupResult {
        let mut suggestions: Vec<String> = Vec::new();

        for provider in &self.providers {
            let source = provider.source();
            if !provider.is_configured() {
                debug!(provider = source.as_str(), "Skipping unconfigured provider");
                continue;
            }

            let report = match provider.lookup(query).await {
                Ok(report) => report,
                Err(e) => {
                    warn!(
                        provider = source.as_str(),
                        food = %query.name,
                        error = %e,
                        "Nutrition provider failed, trying next"
                    );
                    continue;
                }
            };

            if suggestions.is_empty() && !report.suggestions.is_empty() {
                suggestions = report.suggestions;
            }

            if let Some(hit) = report.hit {
                let macros = Self::full_quantity(query, hit);
                debug!(
                    provider = source.as_str(),
                    food = %query.name,
                    calories = macros.calories,
                    "Resolved nutrition"
                );
                return FoodLookupResult::resolved(query, NutritionResult::new(macros, source))
                    .with_suggestions(suggestions);
            }
            debug!(provider = source.as_str(), food = %query.name, "No match");
        }

        debug!(
            food = %query.name,
            suggestions = suggestions.len(),
            "No provider resolved food, manual input needed"
        );
        FoodLookupResult::unresolved(query, suggestions)
    }

    fn full_quantity(query: &FoodQuery, hit: ProviderHit) -> MacroVector {
        match hit.basis {
            MacroBasis::Absolute => hit.macros,
            MacroBasis::Per100Grams => {
                let factor = grams_for(query, &normalize(&query.name), None) / GRAMS_PER_BASIS;
                MacroVector {
                    calories: (hit.macros.calories * factor).round(),
                    protein: round_one_decimal(hit.macros.protein * factor),
                    carbs: round_one_decimal(hit.macros.carbs * factor),
                    fat: round_one_decimal(hit.macros.fat * factor),
                    fiber: hit.macros.fiber.map(|fiber| round_one_decimal(fiber * factor)),
                }
            }
        }
    }
}
