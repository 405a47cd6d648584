// ABOUTME: Read access to diet plans and meal logs for progress computation
// ABOUTME: Async trait with an in-memory implementation for tests and local runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{DietPlan, MealLog};

/// Source of plans and logs consumed by the progress calculator
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// The user's active diet plan, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    async fn active_plan(&self, user_id: Uuid) -> AppResult<Option<DietPlan>>;

    /// Meals logged by the user with `start <= logged_at < end`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    async fn meals_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<MealLog>>;
}

/// Plans and logs held in process memory
#[derive(Clone, Default)]
pub struct InMemoryProgressRepository {
    plans: Arc<RwLock<Vec<DietPlan>>>,
    meals: Arc<RwLock<Vec<MealLog>>>,
}

impl InMemoryProgressRepository {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a plan by id. An active plan deactivates the
    /// user's other plans.
    pub async fn save_plan(&self, plan: DietPlan) {
        let mut plans = self.plans.write().await;
        if plan.is_active {
            for other in plans.iter_mut().filter(|p| p.user_id == plan.user_id) {
                other.is_active = false;
            }
        }
        if let Some(existing) = plans.iter_mut().find(|p| p.id == plan.id) {
            *existing = plan;
        } else {
            plans.push(plan);
        }
    }

    /// Record an eaten meal
    pub async fn log_meal(&self, meal: MealLog) {
        self.meals.write().await.push(meal);
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn active_plan(&self, user_id: Uuid) -> AppResult<Option<DietPlan>> {
        Ok(self
            .plans
            .read()
            .await
            .iter()
            .find(|plan| plan.user_id == user_id && plan.is_active)
            .cloned())
    }

    async fn meals_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<MealLog>> {
        let mut meals: Vec<MealLog> = self
            .meals
            .read()
            .await
            .iter()
            .filter(|meal| {
                meal.user_id == user_id && meal.logged_at >= start && meal.logged_at < end
            })
            .cloned()
            .collect();
        meals.sort_by_key(|meal| meal.logged_at);
        Ok(meals)
    }
}
