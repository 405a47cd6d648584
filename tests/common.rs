// ABOUTME: Shared helpers for dietrack integration tests
// ABOUTME: Quiet tracing setup plus diet plan and meal log builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![allow(dead_code, clippy::missing_panics_doc, clippy::must_use_candidate)]

use std::env;
use std::sync::Once;

use chrono::{DateTime, Utc};
use dietrack::models::{DayOfWeek, DietPlan, MacroVector, MealLog, MealType, PlannedMeal};
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Planned meal on `day`
pub fn planned_meal(
    plan_id: Uuid,
    day: DayOfWeek,
    meal_type: MealType,
    name: &str,
    macros: MacroVector,
) -> PlannedMeal {
    PlannedMeal {
        id: Uuid::new_v4(),
        diet_plan_id: plan_id,
        day_of_week: day,
        meal_type,
        name: name.to_owned(),
        description: None,
        macros,
        sort_order: 0,
    }
}

/// Active plan for `user_id` with the given weekly targets and meals
pub fn diet_plan(
    user_id: Uuid,
    weekly_targets: MacroVector,
    meals: impl FnOnce(Uuid) -> Vec<PlannedMeal>,
) -> DietPlan {
    let id = Uuid::new_v4();
    let now = Utc::now();
    DietPlan {
        id,
        user_id,
        name: "Piano settimanale".to_owned(),
        description: None,
        weekly_targets,
        meals: meals(id),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Meal eaten by the plan's owner at `logged_at`
pub fn meal_log(plan: &DietPlan, logged_at: DateTime<Utc>, macros: MacroVector) -> MealLog {
    MealLog {
        id: Uuid::new_v4(),
        user_id: plan.user_id,
        diet_plan_id: plan.id,
        logged_at,
        meal_type: MealType::Lunch,
        name: "pasto".to_owned(),
        macros,
        is_substitute: false,
        notes: None,
    }
}
