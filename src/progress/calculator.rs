// ABOUTME: Pure weekly progress computation from a diet plan and its meal logs
// ABOUTME: Week windows start Monday 00:00 in the user's offset and span seven days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use dietrack_core::macros::{calculate_percentages, subtract_macros, sum_macros};

use crate::models::{DailyProgress, DayOfWeek, DietPlan, MacroVector, MealLog, WeekProgress};

/// Days in a progress window
const WEEK_DAYS: i64 = 7;

/// Milliseconds in a day
const MS_PER_DAY: f64 = 86_400_000.0;

/// Monday 00:00 of the week containing `now`, in `offset` local time
#[must_use]
pub fn week_start_for(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = now.with_timezone(&offset);
    let days_since_monday = i64::from(local.weekday().num_days_from_monday());
    let monday = local.date_naive() - Duration::days(days_since_monday);
    (monday.and_time(NaiveTime::MIN) - offset).and_utc()
}

/// Calendar date of `instant` in `offset` local time
fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Whole days since `week_start`, rounded up and capped at seven
fn days_elapsed(week_start: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    #[allow(clippy::cast_precision_loss)]
    let days = ((now - week_start).num_milliseconds() as f64 / MS_PER_DAY).ceil();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let days = days.clamp(0.0, WEEK_DAYS as f64) as u32;
    days
}

/// Targets minus consumed, clamped at zero; fiber only when the plan targets it
fn remaining_for(targets: &MacroVector, consumed: &MacroVector) -> MacroVector {
    let remaining = subtract_macros(targets, consumed);
    MacroVector {
        fiber: targets
            .fiber
            .filter(|fiber| *fiber != 0.0)
            .and(remaining.fiber),
        ..remaining
    }
}

/// Progress of `plan` over the week starting at `week_start`.
///
/// Only logs with `week_start <= logged_at < week_start + 7 days` count.
/// Daily buckets and the logged-day count use calendar dates in `offset`.
#[must_use]
pub fn compute_week_progress(
    plan: &DietPlan,
    logs: &[MealLog],
    week_start: DateTime<Utc>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> WeekProgress {
    let week_end = week_start + Duration::days(WEEK_DAYS);
    let in_week: Vec<&MealLog> = logs
        .iter()
        .filter(|log| log.logged_at >= week_start && log.logged_at < week_end)
        .collect();

    let consumed = sum_macros(in_week.iter().map(|log| &log.macros));
    let targets = plan.weekly_targets;

    let days_logged = in_week
        .iter()
        .map(|log| local_date(log.logged_at, offset))
        .collect::<HashSet<_>>()
        .len();

    let first_day = local_date(week_start, offset);
    let daily_breakdown = DayOfWeek::ALL
        .iter()
        .zip(0..WEEK_DAYS)
        .map(|(&day_of_week, offset_days)| {
            let date = first_day + Duration::days(offset_days);
            let day_logs: Vec<&MealLog> = in_week
                .iter()
                .copied()
                .filter(|log| local_date(log.logged_at, offset) == date)
                .collect();
            DailyProgress {
                date,
                day_of_week,
                consumed: sum_macros(day_logs.iter().map(|log| &log.macros)),
                meal_count: day_logs.len(),
            }
        })
        .collect();

    WeekProgress {
        diet_plan_id: plan.id,
        diet_plan_name: plan.name.clone(),
        week_start,
        week_end,
        targets,
        consumed,
        remaining: remaining_for(&targets, &consumed),
        percentages: calculate_percentages(&consumed, &targets),
        days_logged,
        days_elapsed: days_elapsed(week_start, now),
        total_meals_logged: in_week.len(),
        planned_meals_count: plan.meals.len(),
        daily_breakdown,
    }
}
