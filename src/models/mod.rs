// ABOUTME: Domain models re-exported from dietrack-core
// ABOUTME: Food queries, nutrition results, diet plans, meal logs and progress views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Data Models
//!
//! - `FoodQuery`: a food name with quantity and unit as written in a plan
//! - `NutritionResult`: resolved macros with source and confidence
//! - `FoodLookupResult` / `BulkLookupResult`: per-item and batch lookup outcomes
//! - `DietPlan`, `PlannedMeal`, `MealLog`: plan targets and what was eaten
//! - `WeekProgress`, `RecommendationsReport`: weekly adherence views

pub use dietrack_core::models::*;
