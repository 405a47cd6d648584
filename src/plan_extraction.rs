// ABOUTME: Parses the JSON a vision model returns for a photographed weekly diet plan
// ABOUTME: Tolerates code fences, surrounding prose and the compact field encodings models emit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Diet Plan Extraction
//!
//! The extraction service answers with free text that should contain one JSON
//! object shaped like:
//!
//! ```json
//! {
//!   "planName": "Piano settimanale",
//!   "days": [{
//!     "day": "Lunedì",
//!     "meals": [{
//!       "type": "breakfast",
//!       "foods": [{ "name": "avena", "quantity": 40, "unit": "g" }]
//!     }]
//!   }],
//!   "weeklyTotals": { "calories": 0, "protein": 0, "carbs": 0, "fat": 0 }
//! }
//! ```
//!
//! Models also emit a compact variant (`t`/`f` keys, one-letter meal types,
//! abbreviated day names, foods as plain strings such as `"40g avena"`), which
//! is accepted too.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::{DayOfWeek, FoodQuery, MacroVector, MealType};
use crate::nutrition::normalizer::fold;

/// Longest excerpt of unparseable text echoed in errors
const MAX_SNIPPET_CHARS: usize = 100;

/// Unit assumed for foods written without one
const DEFAULT_UNIT: &str = "pz";

static CODE_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").ok());

/// `"40g avena"`, `"2 fette pane"`, `"mela"`
static FOOD_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)?\s*(?:(g|ml|pz|fette?|scatolett[ae]?)\b)?\s*(.+)$").ok()
});

/// Meal slot as written by the extraction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedMealType {
    /// Colazione
    #[serde(alias = "b")]
    Breakfast,
    /// Mid-morning snack
    #[serde(alias = "s", alias = "sm")]
    MorningSnack,
    /// Pranzo
    #[serde(alias = "l")]
    Lunch,
    /// Merenda
    #[serde(alias = "sp")]
    AfternoonSnack,
    /// Cena
    #[serde(alias = "d")]
    Dinner,
}

impl ExtractedMealType {
    /// Slot in the diet plan model; both snacks collapse into `Snack`
    #[must_use]
    pub const fn meal_type(self) -> MealType {
        match self {
            Self::Breakfast => MealType::Breakfast,
            Self::Lunch => MealType::Lunch,
            Self::Dinner => MealType::Dinner,
            Self::MorningSnack | Self::AfternoonSnack => MealType::Snack,
        }
    }

    /// Italian label shown to the user
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Colazione",
            Self::MorningSnack => "Spuntino mattina",
            Self::Lunch => "Pranzo",
            Self::AfternoonSnack => "Spuntino pomeriggio",
            Self::Dinner => "Cena",
        }
    }
}

/// One food line of a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FoodEntry")]
pub struct ExtractedFood {
    /// Food name as printed on the plan
    pub name: String,
    /// Amount in `unit`, 1 when the plan gives none
    pub quantity: f64,
    /// Unit token, `pz` when the plan gives none
    pub unit: String,
    /// Marked optional by the nutritionist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,
    /// Macros the model estimated, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroVector>,
}

impl ExtractedFood {
    /// Query for the nutrition lookup
    #[must_use]
    pub fn query(&self) -> FoodQuery {
        FoodQuery::new(self.name.clone(), self.quantity, self.unit.clone())
    }

    /// Split a plain text line such as `"40g avena"`
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        let parsed = FOOD_LINE.as_ref().and_then(|re| re.captures(text));
        let (name, quantity, unit) = parsed.map_or_else(
            || (text.to_owned(), 1.0, DEFAULT_UNIT.to_owned()),
            |caps| {
                let name = caps
                    .get(3)
                    .map(|m| m.as_str().trim())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(text);
                let quantity = caps
                    .get(1)
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .filter(|q| *q > 0.0)
                    .unwrap_or(1.0);
                let unit = caps
                    .get(2)
                    .map_or(DEFAULT_UNIT, |m| m.as_str())
                    .to_lowercase();
                (name.to_owned(), quantity, unit)
            },
        );
        Self {
            name,
            quantity,
            unit,
            is_optional: None,
            macros: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredFood {
    name: String,
    #[serde(default)]
    quantity: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    is_optional: Option<bool>,
    #[serde(default)]
    macros: Option<MacroVector>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FoodEntry {
    Text(String),
    Structured(StructuredFood),
}

impl From<FoodEntry> for ExtractedFood {
    fn from(entry: FoodEntry) -> Self {
        match entry {
            FoodEntry::Text(text) => Self::from_text(&text),
            FoodEntry::Structured(food) => Self {
                name: food.name,
                quantity: food.quantity.unwrap_or(1.0),
                unit: food
                    .unit
                    .filter(|unit| !unit.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_UNIT.to_owned()),
                is_optional: food.is_optional,
                macros: food.macros,
            },
        }
    }
}

/// One meal of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedMeal {
    /// Meal slot
    #[serde(rename = "type", alias = "t")]
    pub meal_type: ExtractedMealType,
    /// Time of day such as `07:30`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Foods in plan order
    #[serde(default, alias = "f")]
    pub foods: Vec<ExtractedFood>,
    /// Meal totals printed on the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_macros: Option<MacroVector>,
}

/// One day of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDay {
    /// Day name as written, usually Italian
    pub day: String,
    /// Meals of the day
    #[serde(default)]
    pub meals: Vec<ExtractedMeal>,
}

impl ExtractedDay {
    /// Weekday for the written name, `None` when unrecognized
    #[must_use]
    pub fn day_of_week(&self) -> Option<DayOfWeek> {
        day_from_name(&self.day)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Notes {
    One(String),
    Many(Vec<String>),
}

fn deserialize_notes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Notes>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Notes::One(note)) => vec![note],
        Some(Notes::Many(notes)) => notes,
    })
}

/// A whole extracted weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPlan {
    /// Title of the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// Issue date as printed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Nutritionist notes, one entry per note
    #[serde(default, deserialize_with = "deserialize_notes")]
    pub notes: Vec<String>,
    /// Days in plan order
    #[serde(default)]
    pub days: Vec<ExtractedDay>,
    /// Weekly totals printed on the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_totals: Option<MacroVector>,
}

impl ExtractedPlan {
    /// Every food of the plan in reading order: day, then meal, then food
    #[must_use]
    pub fn food_queries(&self) -> Vec<FoodQuery> {
        self.days
            .iter()
            .flat_map(|day| &day.meals)
            .flat_map(|meal| &meal.foods)
            .map(ExtractedFood::query)
            .collect()
    }

    /// Number of food lines in the plan
    #[must_use]
    pub fn food_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|day| &day.meals)
            .map(|meal| meal.foods.len())
            .sum()
    }
}

/// Italian weekday name
#[must_use]
pub const fn italian_day_name(day: DayOfWeek) -> &'static str {
    match day {
        DayOfWeek::Monday => "Lunedì",
        DayOfWeek::Tuesday => "Martedì",
        DayOfWeek::Wednesday => "Mercoledì",
        DayOfWeek::Thursday => "Giovedì",
        DayOfWeek::Friday => "Venerdì",
        DayOfWeek::Saturday => "Sabato",
        DayOfWeek::Sunday => "Domenica",
    }
}

/// Weekday from an Italian or English name, full or abbreviated
#[must_use]
pub fn day_from_name(name: &str) -> Option<DayOfWeek> {
    let folded = fold(name);
    let day = match folded.as_str() {
        "lunedi" | "lun" | "monday" => DayOfWeek::Monday,
        "martedi" | "mar" | "tuesday" => DayOfWeek::Tuesday,
        "mercoledi" | "mer" | "wednesday" => DayOfWeek::Wednesday,
        "giovedi" | "gio" | "thursday" => DayOfWeek::Thursday,
        "venerdi" | "ven" | "friday" => DayOfWeek::Friday,
        "sabato" | "sab" | "saturday" => DayOfWeek::Saturday,
        "domenica" | "dom" | "sunday" => DayOfWeek::Sunday,
        _ => return None,
    };
    Some(day)
}

fn snippet(text: &str) -> String {
    text.chars().take(MAX_SNIPPET_CHARS).collect()
}

/// The JSON object inside `text`: code fence contents if fenced, then the
/// span from the first `{` to the last `}`
fn json_region(text: &str) -> &str {
    let text = text.trim();
    let unfenced = CODE_FENCE
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str().trim());

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => &unfenced[start..=end],
        _ => unfenced,
    }
}

/// Parse the extraction service's raw answer
///
/// # Errors
///
/// Returns `INVALID_FORMAT` when no plan can be decoded from `text`
pub fn parse_extraction_response(text: &str) -> AppResult<ExtractedPlan> {
    let region = json_region(text);
    serde_json::from_str(region).map_err(|e| {
        AppError::invalid_format(format!(
            "Could not parse diet plan: {e} near \"{}\"",
            snippet(region)
        ))
    })
}
