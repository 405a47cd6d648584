// ABOUTME: Integration tests for unit conversion, name normalization and the local table
// ABOUTME: Exercises the offline half of the lookup pipeline end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use dietrack::models::{Confidence, FoodQuery, NutritionSource};
use dietrack::nutrition::units::{grams_per_unit, piece_grams};
use dietrack::nutrition::{
    grams_for, local_suggestions, lookup_local, normalize, LocalFoodProvider,
};
use dietrack_providers::{MacroBasis, NutritionProvider};

// ============================================================================
// Unit conversion
// ============================================================================

#[test]
fn test_grams_for_mass_and_household_units() {
    assert_eq!(grams_for(&FoodQuery::new("riso", 2.0, "kg"), "riso", None), 2000.0);
    assert_eq!(
        grams_for(&FoodQuery::new("olio", 1.0, "cucchiaio"), "olio", None),
        15.0
    );
    assert_eq!(
        grams_for(&FoodQuery::new("olio", 2.0, "Cucchiaini"), "olio", None),
        10.0
    );
    assert_eq!(grams_for(&FoodQuery::new("latte", 250.0, "ml"), "latte", None), 250.0);
}

#[test]
fn test_grams_for_pieces_prefers_table_serving() {
    assert_eq!(
        grams_for(&FoodQuery::new("uova", 3.0, "pz"), "uovo", Some(50.0)),
        150.0
    );
    // Serving-size list when the entry has no serving
    assert_eq!(piece_grams("yogurt greco", None), 150.0);
    // Nobody knows: one piece is 100 g
    assert_eq!(piece_grams("bistecca", None), 100.0);
    assert_eq!(piece_grams("bistecca", Some(0.0)), 100.0);
}

#[test]
fn test_grams_for_cans_and_unknown_units() {
    assert_eq!(grams_per_unit("scatoletta"), 80.0);
    assert_eq!(grams_per_unit("scatola"), 80.0);
    assert_eq!(grams_per_unit("boh"), 1.0);
    assert_eq!(grams_for(&FoodQuery::new("tonno", 2.0, "boh"), "tonno", None), 2.0);
}

#[test]
fn test_grams_for_clamps_bad_quantities() {
    assert_eq!(grams_for(&FoodQuery::new("riso", -5.0, "g"), "riso", None), 0.0);
    assert_eq!(grams_for(&FoodQuery::new("riso", f64::NAN, "g"), "riso", None), 0.0);
    assert_eq!(grams_for(&FoodQuery::new("mela", 0.0, "pz"), "mela", None), 0.0);
    assert!(grams_for(&FoodQuery::new("mela", 0.5, "pz"), "mela", None) > 0.0);
}

// ============================================================================
// Name normalization
// ============================================================================

#[test]
fn test_normalize_article_and_adjective_variants_reach_same_key() {
    assert_eq!(normalize("Un' Mela Fresca"), normalize("mela"));
    assert_eq!(normalize("mela"), "mela");
    assert_eq!(normalize("La Pasta"), "pasta");
    assert_eq!(normalize("Petto di Pollo"), "petto di pollo");
}

#[test]
fn test_normalize_reaches_accented_keys() {
    assert_eq!(normalize("Caffè"), "caffè");
    assert_eq!(normalize("caffe"), "caffè");
}

#[test]
fn test_normalize_unknown_food_returns_cleaned_name() {
    assert_eq!(normalize("Il Quinotto  Andino"), "quinotto andino");
}

// ============================================================================
// Local lookup
// ============================================================================

#[test]
fn test_lookup_local_scales_per_100g() {
    let result = lookup_local(&FoodQuery::new("pollo", 200.0, "g")).unwrap();
    assert_eq!(result.source, NutritionSource::Local);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.macros.calories, 330.0);
    assert_eq!(result.macros.protein, 62.0);
    assert_eq!(result.macros.fiber, None);
}

#[test]
fn test_lookup_local_oat_flakes_from_plan_line() {
    let result = lookup_local(&FoodQuery::new("avena", 40.0, "g")).unwrap();
    assert_eq!(result.macros.calories, 156.0);
    assert_eq!(result.macros.protein, 6.8);
    assert_eq!(result.macros.carbs, 26.5);
    assert_eq!(result.macros.fat, 2.8);
}

#[test]
fn test_lookup_local_pieces_use_entry_serving() {
    // Two eggs at 50 g each
    let result = lookup_local(&FoodQuery::new("uovo", 2.0, "pz")).unwrap();
    assert_eq!(result.macros.calories, 155.0);
    assert_eq!(result.macros.protein, 13.0);
}

#[test]
fn test_lookup_local_miss() {
    assert!(lookup_local(&FoodQuery::new("quinotto andino", 100.0, "g")).is_none());
}

#[test]
fn test_local_suggestions_capped_at_five() {
    let suggestions = local_suggestions("pollo");
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);
    assert!(suggestions.iter().all(|s| s.contains("pollo")));
    assert!(local_suggestions("").is_empty());
}

#[tokio::test]
async fn test_local_provider_reports_absolute_hit() {
    common::init_test_logging();
    let provider = LocalFoodProvider;
    assert_eq!(provider.source(), NutritionSource::Local);

    let report = provider
        .lookup(&FoodQuery::new("riso", 80.0, "g"))
        .await
        .unwrap();
    let hit = report.hit.unwrap();
    assert_eq!(hit.basis, MacroBasis::Absolute);
    assert_eq!(hit.macros.calories, 104.0);

    let miss = provider
        .lookup(&FoodQuery::new("quinotto andino", 80.0, "g"))
        .await
        .unwrap();
    assert!(miss.hit.is_none());
}
