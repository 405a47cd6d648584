// ABOUTME: Nutrition resolution pipeline from free-text food lines to macro values
// ABOUTME: Unit and name normalization, local table, provider cascade and bulk lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Nutrition Resolution
//!
//! A food line from a diet plan (`"2 pz uovo"`) is resolved in stages:
//!
//! 1. [`units`] turns quantity and unit into grams
//! 2. [`normalizer`] maps the name onto a [`food_table`] key
//! 3. [`local`] answers from the table when it can
//! 4. [`cascade`] falls through the remote providers in order
//! 5. [`bulk`] runs all of the above over a whole plan with progress reporting

/// Two-phase bulk lookup orchestrator
pub mod bulk;

/// Sequential provider cascade
pub mod cascade;

/// Static per-100g table of common Italian foods
pub mod food_table;

/// Local table lookup and suggestions
pub mod local;

/// Food name canonicalization
pub mod normalizer;

/// Quantity and unit to grams
pub mod units;

pub use bulk::{BatchLookup, BulkLookup, CascadeBatchLookup, HttpBatchLookup, LookupProgress};
pub use cascade::NutritionCascade;
pub use local::{local_suggestions, lookup_local, LocalFoodProvider};
pub use normalizer::normalize;
pub use units::grams_for;
