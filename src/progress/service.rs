// ABOUTME: Progress operations for a user: week progress and recommendations
// ABOUTME: Loads the active plan and the week's logs, then runs the pure calculators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{DayOfWeek, DietPlan, RecommendationsReport, WeekProgress};

use super::calculator::{compute_week_progress, week_start_for};
use super::recommendations::generate_recommendations;
use super::repository::ProgressRepository;

/// Week progress and recommendations over a [`ProgressRepository`]
#[derive(Clone)]
pub struct ProgressService {
    repository: Arc<dyn ProgressRepository>,
    offset: FixedOffset,
}

impl ProgressService {
    /// Service computing calendar days in `offset` local time
    #[must_use]
    pub fn new(repository: Arc<dyn ProgressRepository>, offset: FixedOffset) -> Self {
        Self { repository, offset }
    }

    async fn require_active_plan(&self, user_id: Uuid) -> AppResult<DietPlan> {
        self.repository
            .active_plan(user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Active diet plan").with_resource_id(user_id.to_string())
            })
    }

    async fn progress_for(
        &self,
        plan: &DietPlan,
        user_id: Uuid,
        week_start: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> AppResult<WeekProgress> {
        let start = week_start.unwrap_or_else(|| week_start_for(now, self.offset));
        let logs = self
            .repository
            .meals_between(user_id, start, start + Duration::days(7))
            .await?;
        debug!(
            user_id = %user_id,
            meals = logs.len(),
            week_start = %start,
            "Computing week progress"
        );
        Ok(compute_week_progress(plan, &logs, start, now, self.offset))
    }

    /// Progress for the week starting at `week_start`, or the current week
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the user has no active plan, or the
    /// repository error when data cannot be loaded
    pub async fn get_week_progress(
        &self,
        user_id: Uuid,
        week_start: Option<DateTime<Utc>>,
    ) -> AppResult<WeekProgress> {
        self.get_week_progress_at(user_id, week_start, Utc::now()).await
    }

    /// [`Self::get_week_progress`] evaluated at `now`
    ///
    /// # Errors
    ///
    /// See [`Self::get_week_progress`]
    pub async fn get_week_progress_at(
        &self,
        user_id: Uuid,
        week_start: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> AppResult<WeekProgress> {
        let plan = self.require_active_plan(user_id).await?;
        self.progress_for(&plan, user_id, week_start, now).await
    }

    /// Recommendations for the rest of the current week
    ///
    /// # Errors
    ///
    /// See [`Self::get_week_progress`]
    pub async fn get_recommendations(&self, user_id: Uuid) -> AppResult<RecommendationsReport> {
        self.get_recommendations_at(user_id, Utc::now()).await
    }

    /// [`Self::get_recommendations`] evaluated at `now`
    ///
    /// # Errors
    ///
    /// See [`Self::get_week_progress`]
    pub async fn get_recommendations_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<RecommendationsReport> {
        let plan = self.require_active_plan(user_id).await?;
        let progress = self.progress_for(&plan, user_id, None, now).await?;
        let today = DayOfWeek::from(now.with_timezone(&self.offset).weekday());
        Ok(generate_recommendations(&progress, &plan, today))
    }
}
