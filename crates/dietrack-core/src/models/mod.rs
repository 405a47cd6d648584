// ABOUTME: Core data models for the dietrack nutrition pipeline
// ABOUTME: Re-exports food lookup, diet plan and weekly progress types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Data Models
//!
//! Data structures shared by the nutrition lookup pipeline, the persistence
//! boundary and the weekly progress calculator. All wire shapes serialize in
//! `camelCase` to match the web client.
//!
//! ## Core Models
//!
//! - `MacroVector`: calories, protein, carbs, fat and optional fiber for a stated quantity
//! - `FoodQuery`: a free-text food mention with quantity and unit
//! - `NutritionResult`: resolved macros tagged with source and confidence
//! - `FoodLookupResult`: per-query outcome of the provider cascade
//! - `DietPlan`, `PlannedMeal`, `MealLog`: persisted inputs to progress tracking
//! - `WeekProgress`, `Recommendation`: derived weekly views

mod food;
mod plan;
mod progress;

// Food lookup domain
pub use food::{
    BulkLookupResult, Confidence, FoodLookupResult, FoodQuery, MacroTargets, MacroVector,
    NutritionResult, NutritionSource,
};

// Diet plan domain
pub use plan::{DayOfWeek, DietPlan, MealLog, MealType, PlannedMeal};

// Progress domain
pub use progress::{
    DailyProgress, MacroImpact, MacroPercentages, Recommendation, RecommendationKind,
    RecommendationPriority, RecommendationsReport, WeekProgress,
};
