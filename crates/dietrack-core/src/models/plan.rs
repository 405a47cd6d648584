// ABOUTME: Diet plan models: planned meals, logged meals, meal types and weekdays
// ABOUTME: Persisted by the CRUD layer and consumed read-only by progress tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::food::{MacroTargets, MacroVector};

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Parse meal type from string, folding the five-slot plan layout into four types
    ///
    /// `morning_snack`, `afternoon_snack` and anything unrecognised become `Snack`.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            _ => Self::Snack,
        }
    }
}

/// Day of the week, Monday first
///
/// Serialized as its index (Monday = 0 ... Sunday = 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    /// Monday (0)
    Monday = 0,
    /// Tuesday (1)
    Tuesday = 1,
    /// Wednesday (2)
    Wednesday = 2,
    /// Thursday (3)
    Thursday = 3,
    /// Friday (4)
    Friday = 4,
    /// Saturday (5)
    Saturday = 5,
    /// Sunday (6)
    Sunday = 6,
}

impl DayOfWeek {
    /// All days in week order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based index from Monday
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Day for a zero-based index, `None` past Sunday
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Monday),
            1 => Some(Self::Tuesday),
            2 => Some(Self::Wednesday),
            3 => Some(Self::Thursday),
            4 => Some(Self::Friday),
            5 => Some(Self::Saturday),
            6 => Some(Self::Sunday),
            _ => None,
        }
    }

    /// English day name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.index()
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("invalid day of week index: {value}"))
    }
}

/// A meal scheduled by the diet plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    /// Meal identifier
    pub id: Uuid,
    /// Owning plan
    pub diet_plan_id: Uuid,
    /// Scheduled weekday
    pub day_of_week: DayOfWeek,
    /// Meal slot
    pub meal_type: MealType,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Planned macros
    pub macros: MacroVector,
    /// Position within the day
    #[serde(default)]
    pub sort_order: u32,
}

/// A weekly diet plan with its macro targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    /// Plan identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Plan name
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whole-week macro targets
    pub weekly_targets: MacroTargets,
    /// Scheduled meals
    #[serde(default)]
    pub meals: Vec<PlannedMeal>,
    /// Only one plan per user is active at a time
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// A meal the user actually ate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    /// Log identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Plan active when the meal was logged
    pub diet_plan_id: Uuid,
    /// When the meal was eaten
    pub logged_at: DateTime<Utc>,
    /// Meal slot
    pub meal_type: MealType,
    /// Display name
    pub name: String,
    /// Consumed macros
    pub macros: MacroVector,
    /// Whether this replaced a planned meal
    #[serde(default)]
    pub is_substitute: bool,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
