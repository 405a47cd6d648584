// ABOUTME: Resolves food queries against the local Italian nutrition table
// ABOUTME: Also supplies near-match names from the table for unresolved foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use async_trait::async_trait;
use dietrack_core::macros::round_one_decimal;
use dietrack_providers::{NutritionProvider, ProviderReport};

use crate::constants::limits::MAX_SUGGESTIONS;
use crate::constants::units::GRAMS_PER_BASIS;
use crate::errors::AppResult;
use crate::models::{FoodQuery, MacroVector, NutritionResult, NutritionSource};

use super::food_table::{self, LocalFoodEntry};
use super::normalizer::{fold, normalize};
use super::units::grams_for;

/// Macros for the full quantity of `query` from the local table, or `None`
/// when the food is not in the table
#[must_use]
pub fn lookup_local(query: &FoodQuery) -> Option<NutritionResult> {
    local_macros(query).map(|macros| NutritionResult::new(macros, NutritionSource::Local))
}

fn local_macros(query: &FoodQuery) -> Option<MacroVector> {
    let key = normalize(&query.name);
    let entry = food_table::get(&key)?;
    let factor = grams_for(query, &key, entry.default_serving_grams) / GRAMS_PER_BASIS;
    Some(scaled(entry, factor))
}

fn scaled(entry: &LocalFoodEntry, factor: f64) -> MacroVector {
    MacroVector::new(
        (entry.calories_per_100g * factor).round(),
        round_one_decimal(entry.protein_per_100g * factor),
        round_one_decimal(entry.carbs_per_100g * factor),
        round_one_decimal(entry.fat_per_100g * factor),
    )
}

/// Up to five table keys related to `query` by containment in either direction
#[must_use]
pub fn local_suggestions(query: &str) -> Vec<String> {
    let folded = fold(query);
    food_table::keys_containing(&folded)
        .take(MAX_SUGGESTIONS)
        .map(str::to_owned)
        .collect()
}

/// The local table as the first link of the provider cascade
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFoodProvider;

#[async_trait]
impl NutritionProvider for LocalFoodProvider {
    fn source(&self) -> NutritionSource {
        NutritionSource::Local
    }

    async fn lookup(&self, query: &FoodQuery) -> AppResult<ProviderReport> {
        Ok(local_macros(query).map_or_else(ProviderReport::miss, ProviderReport::absolute))
    }
}
