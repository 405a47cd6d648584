// ABOUTME: Fixed-threshold recommendations derived from weekly macro deficits
// ABOUTME: Suggests a high-protein dinner swap and calorie-dense snacks late in the week
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use crate::models::{
    DayOfWeek, DietPlan, MacroImpact, MacroVector, MealType, Recommendation, RecommendationKind,
    RecommendationPriority, RecommendationsReport, WeekProgress,
};

/// Protein shortfall, in percentage points of target, that triggers a swap
const PROTEIN_DEFICIT_THRESHOLD: i64 = 30;

/// Calorie percentage under which snacks are suggested
const LOW_CALORIES_PERCENT: u32 = 50;

/// Snacks are only suggested with this many days left or fewer
const SNACK_DAYS_LEFT: u32 = 3;

const WEEK_DAYS: u32 = 7;

const HIGH_PROTEIN_SWAP_IMPACT: MacroImpact = MacroImpact {
    calories: 50.0,
    protein: 20.0,
    carbs: -10.0,
    fat: 5.0,
};

const CALORIE_SNACK_IMPACT: MacroImpact = MacroImpact {
    calories: 300.0,
    protein: 10.0,
    carbs: 30.0,
    fat: 15.0,
};

fn per_day(total: f64, days: u32) -> f64 {
    (total / f64::from(days)).round()
}

/// Recommendations for the rest of the week.
///
/// `today` decides which planned meals are still ahead: only meals on a
/// later weekday count.
#[must_use]
pub fn generate_recommendations(
    progress: &WeekProgress,
    plan: &DietPlan,
    today: DayOfWeek,
) -> RecommendationsReport {
    let remaining = progress.remaining;
    let days_left = WEEK_DAYS.saturating_sub(progress.days_elapsed);
    if days_left == 0 {
        return RecommendationsReport::closed_week(remaining);
    }

    let daily_target_for_remaining = MacroVector::new(
        per_day(remaining.calories, days_left),
        per_day(remaining.protein, days_left),
        per_day(remaining.carbs, days_left),
        per_day(remaining.fat, days_left),
    );

    let mut recommendations = Vec::new();

    let protein_deficit = 100 - i64::from(progress.percentages.protein);
    if protein_deficit > PROTEIN_DEFICIT_THRESHOLD {
        let next_dinner = plan.meals.iter().find(|meal| {
            meal.day_of_week.index() > today.index() && meal.meal_type == MealType::Dinner
        });
        if let Some(meal) = next_dinner {
            recommendations.push(Recommendation {
                id: format!("rec-{}", meal.id),
                kind: RecommendationKind::Swap,
                priority: RecommendationPriority::Required,
                meal_type: Some(meal.meal_type),
                day_of_week: Some(meal.day_of_week),
                original_meal: Some(meal.name.clone()),
                suggestion: "Swap to a high-protein alternative (+20g protein)".to_owned(),
                reason: format!(
                    "You're {}g short on weekly protein",
                    remaining.protein.round()
                ),
                macro_impact: HIGH_PROTEIN_SWAP_IMPACT,
            });
        }
    }

    if progress.percentages.calories < LOW_CALORIES_PERCENT && days_left <= SNACK_DAYS_LEFT {
        recommendations.push(Recommendation {
            id: "rec-add-snacks".to_owned(),
            kind: RecommendationKind::Add,
            priority: RecommendationPriority::Suggested,
            meal_type: None,
            day_of_week: None,
            original_meal: None,
            suggestion: "Add calorie-dense snacks".to_owned(),
            reason: format!(
                "Only {}% of weekly calories consumed with {days_left} days left",
                progress.percentages.calories
            ),
            macro_impact: CALORIE_SNACK_IMPACT,
        });
    }

    RecommendationsReport {
        remaining,
        daily_target_for_remaining,
        days_left,
        recommendations,
    }
}
