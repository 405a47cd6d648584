// ABOUTME: Macro vector arithmetic for meal, day and week aggregation
// ABOUTME: Total functions with per-call-site rounding and a weighted adherence score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Macro Aggregator
//!
//! Every function here is total: no input produces an error or a panic.
//! Rounding differs per operation and callers rely on that:
//!
//! - [`scale_macros`] and [`divide_macros`] round every field to an integer
//! - [`round_one_decimal`] is what lookups apply to protein, carbs and fat
//! - [`subtract_macros`] clamps at zero so a "remaining" value is never negative

use crate::models::{MacroPercentages, MacroTargets, MacroVector};

/// Weight of the calories percentage in the overall score
pub const CALORIES_WEIGHT: f64 = 0.40;
/// Weight of the protein percentage in the overall score
pub const PROTEIN_WEIGHT: f64 = 0.30;
/// Weight of the carbs percentage in the overall score
pub const CARBS_WEIGHT: f64 = 0.15;
/// Weight of the fat percentage in the overall score
pub const FAT_WEIGHT: f64 = 0.15;

/// Days a weekly target is spread over
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Round to one decimal place
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Element-wise sum; missing fiber counts as zero
#[must_use]
pub fn add_macros(a: &MacroVector, b: &MacroVector) -> MacroVector {
    MacroVector {
        calories: a.calories + b.calories,
        protein: a.protein + b.protein,
        carbs: a.carbs + b.carbs,
        fat: a.fat + b.fat,
        fiber: Some(a.fiber.unwrap_or(0.0) + b.fiber.unwrap_or(0.0)),
    }
}

/// Element-wise difference with every field clamped at zero
#[must_use]
pub fn subtract_macros(a: &MacroVector, b: &MacroVector) -> MacroVector {
    MacroVector {
        calories: (a.calories - b.calories).max(0.0),
        protein: (a.protein - b.protein).max(0.0),
        carbs: (a.carbs - b.carbs).max(0.0),
        fat: (a.fat - b.fat).max(0.0),
        fiber: Some((a.fiber.unwrap_or(0.0) - b.fiber.unwrap_or(0.0)).max(0.0)),
    }
}

/// Multiply every field by `factor` and round to the nearest integer
///
/// Fiber stays absent when the input has none, and also when it is zero.
#[must_use]
pub fn scale_macros(macros: &MacroVector, factor: f64) -> MacroVector {
    MacroVector {
        calories: (macros.calories * factor).round(),
        protein: (macros.protein * factor).round(),
        carbs: (macros.carbs * factor).round(),
        fat: (macros.fat * factor).round(),
        fiber: macros
            .fiber
            .filter(|fiber| *fiber != 0.0)
            .map(|fiber| (fiber * factor).round()),
    }
}

/// Fold with [`add_macros`] starting from [`MacroVector::ZERO`]
#[must_use]
pub fn sum_macros<'a, I>(items: I) -> MacroVector
where
    I: IntoIterator<Item = &'a MacroVector>,
{
    items
        .into_iter()
        .fold(MacroVector::ZERO, |acc, item| add_macros(&acc, item))
}

/// Divide by `divisor`; a non-positive divisor yields the zero vector
#[must_use]
pub fn divide_macros(macros: &MacroVector, divisor: f64) -> MacroVector {
    if divisor <= 0.0 || divisor.is_nan() {
        return MacroVector::ZERO;
    }
    scale_macros(macros, 1.0 / divisor)
}

fn percent_of(value: f64, target: f64) -> u32 {
    if target > 0.0 {
        (value / target * 100.0).round().max(0.0) as u32
    } else {
        0
    }
}

/// Per-macro consumed/target percentages plus the weighted overall score
///
/// A non-positive target yields 0 for that macro. The overall score weighs
/// calories 40%, protein 30%, carbs 15% and fat 15%.
#[must_use]
pub fn calculate_percentages(consumed: &MacroVector, targets: &MacroTargets) -> MacroPercentages {
    let calories = percent_of(consumed.calories, targets.calories);
    let protein = percent_of(consumed.protein, targets.protein);
    let carbs = percent_of(consumed.carbs, targets.carbs);
    let fat = percent_of(consumed.fat, targets.fat);

    let overall = (f64::from(calories) * CALORIES_WEIGHT
        + f64::from(protein) * PROTEIN_WEIGHT
        + f64::from(carbs) * CARBS_WEIGHT
        + f64::from(fat) * FAT_WEIGHT)
        .round() as u32;

    MacroPercentages {
        calories,
        protein,
        carbs,
        fat,
        overall,
    }
}

/// Spread weekly targets over seven days, rounding to integers
#[must_use]
pub fn macros_to_daily(weekly: &MacroTargets) -> MacroTargets {
    MacroTargets {
        calories: (weekly.calories / DAYS_PER_WEEK).round(),
        protein: (weekly.protein / DAYS_PER_WEEK).round(),
        carbs: (weekly.carbs / DAYS_PER_WEEK).round(),
        fat: (weekly.fat / DAYS_PER_WEEK).round(),
        fiber: weekly
            .fiber
            .filter(|fiber| *fiber != 0.0)
            .map(|fiber| (fiber / DAYS_PER_WEEK).round()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(calories: f64, protein: f64, carbs: f64, fat: f64) -> MacroVector {
        MacroVector::new(calories, protein, carbs, fat)
    }

    #[test]
    fn test_add_defaults_missing_fiber_to_zero() {
        let a = vector(100.0, 10.0, 20.0, 5.0).with_fiber(3.0);
        let b = vector(50.0, 5.0, 10.0, 2.0);

        let sum = add_macros(&a, &b);
        assert_eq!(sum, vector(150.0, 15.0, 30.0, 7.0).with_fiber(3.0));
    }

    #[test]
    fn test_subtract_clamps_at_zero() {
        let targets = vector(100.0, 10.0, 20.0, 5.0);
        let consumed = vector(150.0, 30.0, 10.0, 5.0).with_fiber(4.0);

        let remaining = subtract_macros(&targets, &consumed);
        assert_eq!(remaining, vector(0.0, 0.0, 10.0, 0.0).with_fiber(0.0));
    }

    #[test]
    fn test_scale_rounds_to_integers() {
        let scaled = scale_macros(&vector(155.0, 13.0, 1.1, 11.0).with_fiber(2.5), 1.5);
        assert_eq!(scaled, vector(233.0, 20.0, 2.0, 17.0).with_fiber(4.0));
    }

    #[test]
    fn test_scale_drops_zero_fiber() {
        let scaled = scale_macros(&MacroVector::ZERO, 2.0);
        assert_eq!(scaled.fiber, None);
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        assert_eq!(sum_macros(&[]), MacroVector::ZERO);
    }

    #[test]
    fn test_sum_folds_every_item() {
        let items = [
            vector(100.0, 10.0, 10.0, 1.0),
            vector(200.0, 20.0, 20.0, 2.0).with_fiber(1.0),
            vector(300.0, 30.0, 30.0, 3.0),
        ];
        assert_eq!(
            sum_macros(&items),
            vector(600.0, 60.0, 60.0, 6.0).with_fiber(1.0)
        );
    }

    #[test]
    fn test_divide_by_zero_or_negative_is_zero_vector() {
        let v = vector(1400.0, 100.0, 150.0, 50.0);
        assert_eq!(divide_macros(&v, 0.0), MacroVector::ZERO);
        assert_eq!(divide_macros(&v, -3.0), MacroVector::ZERO);
    }

    #[test]
    fn test_divide_then_scale_is_close_to_original() {
        let v = vector(1403.0, 101.0, 152.0, 47.0);
        for n in 1_u8..=7 {
            let n = f64::from(n);
            let back = scale_macros(&divide_macros(&v, n), n);
            let tolerance = n / 2.0;
            assert!((back.calories - v.calories).abs() <= tolerance);
            assert!((back.protein - v.protein).abs() <= tolerance);
            assert!((back.carbs - v.carbs).abs() <= tolerance);
            assert!((back.fat - v.fat).abs() <= tolerance);
        }
    }

    #[test]
    fn test_percentages_of_exact_targets_is_one_hundred() {
        let targets = vector(9800.0, 700.0, 1050.0, 350.0);
        let pct = calculate_percentages(&targets, &targets);
        assert_eq!(
            pct,
            MacroPercentages {
                calories: 100,
                protein: 100,
                carbs: 100,
                fat: 100,
                overall: 100,
            }
        );
    }

    #[test]
    fn test_percentages_zero_target_yields_zero() {
        let consumed = vector(500.0, 40.0, 60.0, 20.0);
        let targets = vector(1000.0, 0.0, 120.0, 0.0);
        let pct = calculate_percentages(&consumed, &targets);

        assert_eq!(pct.calories, 50);
        assert_eq!(pct.protein, 0);
        assert_eq!(pct.carbs, 50);
        assert_eq!(pct.fat, 0);
        // 50*0.4 + 0 + 50*0.15 + 0 = 27.5
        assert_eq!(pct.overall, 28);
    }

    #[test]
    fn test_percentages_weighting() {
        let consumed = vector(1000.0, 20.0, 0.0, 100.0);
        let targets = vector(1000.0, 100.0, 100.0, 100.0);
        let pct = calculate_percentages(&consumed, &targets);
        // 100*0.4 + 20*0.3 + 0*0.15 + 100*0.15 = 61
        assert_eq!(pct.overall, 61);
    }

    #[test]
    fn test_macros_to_daily() {
        let weekly = vector(9800.0, 700.0, 1050.0, 352.0).with_fiber(210.0);
        let daily = macros_to_daily(&weekly);
        assert_eq!(daily, vector(1400.0, 100.0, 150.0, 50.0).with_fiber(30.0));
    }

    #[test]
    fn test_round_one_decimal() {
        assert!((round_one_decimal(6.76) - 6.8).abs() < f64::EPSILON);
        assert!((round_one_decimal(62.0) - 62.0).abs() < f64::EPSILON);
    }
}
