// ABOUTME: Converts a quantity and free-text unit into grams for nutrition scaling
// ABOUTME: Count units resolve through per-food piece weights before falling back to 100 g
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use crate::constants::units::{
    CAN_GRAMS, DEFAULT_PIECE_GRAMS, UNKNOWN_UNIT_GRAMS, UNIT_GRAMS,
};
use crate::models::FoodQuery;

use super::food_table;

/// Units that count whole pieces of a food
const PIECE_UNITS: [&str; 3] = ["pz", "pezzo", "pezzi"];

/// Units that count cans
const CAN_UNITS: [&str; 2] = ["scatoletta", "scatola"];

/// Grams for a single unit of `unit`, ignoring piece units
#[must_use]
pub fn grams_per_unit(unit: &str) -> f64 {
    let unit = unit.trim().to_lowercase();
    if CAN_UNITS.contains(&unit.as_str()) {
        return CAN_GRAMS;
    }
    UNIT_GRAMS
        .iter()
        .find(|(name, _)| *name == unit)
        .map_or(UNKNOWN_UNIT_GRAMS, |(_, grams)| *grams)
}

/// Weight of one piece of `food`: the table entry's serving first, then the
/// serving-size list, then 100 g
#[must_use]
pub fn piece_grams(food: &str, db_serving: Option<f64>) -> f64 {
    db_serving
        .filter(|grams| *grams > 0.0)
        .or_else(|| food_table::serving_size_for(food))
        .unwrap_or(DEFAULT_PIECE_GRAMS)
}

/// Total grams for `query`, where `food` is the normalized food name.
///
/// Positive for any positive quantity. Zero, negative and NaN quantities
/// count as zero, so the result is `0.0` for them.
#[must_use]
pub fn grams_for(query: &FoodQuery, food: &str, db_serving: Option<f64>) -> f64 {
    let quantity = if query.quantity.is_nan() {
        0.0
    } else {
        query.quantity.max(0.0)
    };
    let unit = query.unit.trim().to_lowercase();
    let per_unit = if PIECE_UNITS.contains(&unit.as_str()) {
        piece_grams(food, db_serving)
    } else {
        grams_per_unit(&unit)
    };
    quantity * per_unit
}
