// ABOUTME: Weekly progress models: percentages, daily breakdown and recommendations
// ABOUTME: Derived views recomputed on every request, never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::food::{MacroTargets, MacroVector};
use super::plan::{DayOfWeek, MealType};

/// Consumed-over-target percentages with a weighted overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MacroPercentages {
    /// Calories percentage
    pub calories: u32,
    /// Protein percentage
    pub protein: u32,
    /// Carbs percentage
    pub carbs: u32,
    /// Fat percentage
    pub fat: u32,
    /// Weighted adherence score
    pub overall: u32,
}

/// One day of the weekly breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    /// Local calendar date
    pub date: NaiveDate,
    /// Position in the week
    pub day_of_week: DayOfWeek,
    /// Sum of that day's logs
    pub consumed: MacroVector,
    /// Number of logs on that day
    pub meal_count: usize,
}

/// Weekly adherence view for one user and one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekProgress {
    /// Plan the targets come from
    pub diet_plan_id: Uuid,
    /// Plan name
    pub diet_plan_name: String,
    /// Start of the week window, inclusive
    pub week_start: DateTime<Utc>,
    /// End of the week window, exclusive
    pub week_end: DateTime<Utc>,
    /// Weekly targets
    pub targets: MacroTargets,
    /// Sum of all logs in the window
    pub consumed: MacroVector,
    /// Targets minus consumed, clamped at zero
    pub remaining: MacroVector,
    /// Consumed over targets
    pub percentages: MacroPercentages,
    /// Distinct local dates with at least one log
    pub days_logged: usize,
    /// Whole days since `week_start`, capped at 7
    pub days_elapsed: u32,
    /// Logs in the window
    pub total_meals_logged: usize,
    /// Meals scheduled by the plan
    pub planned_meals_count: usize,
    /// Seven entries, Monday first
    pub daily_breakdown: Vec<DailyProgress>,
}

/// Recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Replace a planned meal
    Swap,
    /// Add food on top of the plan
    Add,
}

/// How strongly a recommendation is pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    /// Needed to reach targets
    Required,
    /// Worth doing
    Suggested,
    /// Nice to have
    Optional,
}

/// Signed macro delta a recommendation would cause
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroImpact {
    /// Calories delta
    pub calories: f64,
    /// Protein delta
    pub protein: f64,
    /// Carbs delta
    pub carbs: f64,
    /// Fat delta
    pub fat: f64,
}

/// A single deficit-driven suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Stable identifier
    pub id: String,
    /// Category
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Priority
    pub priority: RecommendationPriority,
    /// Targeted meal slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    /// Targeted weekday
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    /// Name of the planned meal being replaced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_meal: Option<String>,
    /// What to do
    pub suggestion: String,
    /// Why
    pub reason: String,
    /// Expected macro change
    pub macro_impact: MacroImpact,
}

/// Recommendations with the remaining budget they were derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsReport {
    /// Remaining weekly macros
    pub remaining: MacroVector,
    /// Remaining spread over the days left
    pub daily_target_for_remaining: MacroVector,
    /// Days left in the week
    pub days_left: u32,
    /// Generated suggestions
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationsReport {
    /// Report for a week with no days left
    #[must_use]
    pub const fn closed_week(remaining: MacroVector) -> Self {
        Self {
            remaining,
            daily_target_for_remaining: MacroVector::ZERO,
            days_left: 0,
            recommendations: Vec::new(),
        }
    }
}
