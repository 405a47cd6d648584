// ABOUTME: Food lookup models: macro vectors, queries and cascade results
// ABOUTME: NutritionSource fixes the confidence attached to every resolved result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Calories and macronutrients for a stated quantity of food
///
/// Values are already scaled to the quantity they describe. `fiber` is
/// optional because several sources (the local table, the LLM estimate)
/// do not report it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroVector {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Dietary fiber in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

/// Weekly or daily targets share the macro vector shape
pub type MacroTargets = MacroVector;

impl MacroVector {
    /// The additive identity used as the seed of every sum
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: Some(0.0),
    };

    /// Build a vector without fiber
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber: None,
        }
    }

    /// Attach a fiber value
    #[must_use]
    pub const fn with_fiber(mut self, fiber: f64) -> Self {
        self.fiber = Some(fiber);
        self
    }
}

/// A free-text food mention to resolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodQuery {
    /// Food name as written by the nutritionist or the user
    pub name: String,
    /// Amount expressed in `unit`
    pub quantity: f64,
    /// Unit token such as `g`, `pz` or `cucchiaio`
    pub unit: String,
}

impl FoodQuery {
    /// Create a query
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for FoodQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.name)
    }
}

/// Where a nutrition value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionSource {
    /// Built-in Italian food table
    Local,
    /// Nutritionix natural language API
    Nutritionix,
    /// USDA `FoodData` Central
    Usda,
    /// `OpenFoodFacts` community database
    #[serde(rename = "openfoodfacts")]
    OpenFoodFacts,
    /// Language model estimate
    Estimated,
    /// Typed in by the user
    Manual,
}

impl NutritionSource {
    /// Confidence implied by this source
    #[must_use]
    pub const fn confidence(self) -> Confidence {
        match self {
            Self::Local | Self::Nutritionix | Self::Usda | Self::Manual => Confidence::High,
            Self::OpenFoodFacts => Confidence::Medium,
            Self::Estimated => Confidence::Low,
        }
    }

    /// Stable lowercase identifier, identical to the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Nutritionix => "nutritionix",
            Self::Usda => "usda",
            Self::OpenFoodFacts => "openfoodfacts",
            Self::Estimated => "estimated",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for NutritionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much to trust a nutrition value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Curated or first-party data
    High,
    /// Community data
    Medium,
    /// Model estimate
    Low,
}

/// Resolved macros for one food query
///
/// Serialized flat (`{calories, protein, ..., source, confidence}`) as the
/// web client expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionResult {
    /// Macros for the full queried quantity
    #[serde(flatten)]
    pub macros: MacroVector,
    /// Provider that produced the value
    pub source: NutritionSource,
    /// Trust level, derived from `source`
    pub confidence: Confidence,
}

impl NutritionResult {
    /// Tag macros with a source; confidence follows from the source
    #[must_use]
    pub const fn new(macros: MacroVector, source: NutritionSource) -> Self {
        Self {
            macros,
            source,
            confidence: source.confidence(),
        }
    }

    /// A value entered by the user
    #[must_use]
    pub const fn manual(macros: MacroVector) -> Self {
        Self::new(macros, NutritionSource::Manual)
    }
}

/// Outcome of resolving one [`FoodQuery`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLookupResult {
    /// Food name as queried
    pub name: String,
    /// Quantity as queried
    pub quantity: f64,
    /// Unit as queried
    pub unit: String,
    /// Resolved nutrition, `null` when nothing matched
    pub nutrition: Option<NutritionResult>,
    /// True iff no provider produced a value
    pub needs_manual_input: bool,
    /// Near-match names offered for disambiguation
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl FoodLookupResult {
    /// A query resolved by some provider
    #[must_use]
    pub fn resolved(query: &FoodQuery, nutrition: NutritionResult) -> Self {
        Self {
            name: query.name.clone(),
            quantity: query.quantity,
            unit: query.unit.clone(),
            nutrition: Some(nutrition),
            needs_manual_input: false,
            suggestions: Vec::new(),
        }
    }

    /// A query nobody could resolve
    #[must_use]
    pub fn unresolved(query: &FoodQuery, suggestions: Vec<String>) -> Self {
        Self {
            name: query.name.clone(),
            quantity: query.quantity,
            unit: query.unit.clone(),
            nutrition: None,
            needs_manual_input: true,
            suggestions,
        }
    }

    /// Attach near-match names, kept even when the query resolved
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// The query this result answers
    #[must_use]
    pub fn query(&self) -> FoodQuery {
        FoodQuery::new(self.name.clone(), self.quantity, self.unit.clone())
    }

    /// Overwrite the result with user-entered macros
    pub fn apply_manual(&mut self, macros: MacroVector) {
        self.nutrition = Some(NutritionResult::manual(macros));
        self.needs_manual_input = false;
    }

    /// Whether a nutrition value is present
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.nutrition.is_some()
    }
}

/// Ordered results of a bulk lookup with partition counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkLookupResult {
    /// One entry per input query, in input order
    pub results: Vec<FoodLookupResult>,
    /// Entries carrying nutrition
    pub resolved: usize,
    /// Entries without nutrition that are not flagged for manual input
    pub pending: usize,
    /// Entries flagged for manual input
    pub manual: usize,
}

impl BulkLookupResult {
    /// Compute the partition counts over `results`
    #[must_use]
    pub fn from_results(results: Vec<FoodLookupResult>) -> Self {
        let resolved = results.iter().filter(|r| r.is_resolved()).count();
        let pending = results
            .iter()
            .filter(|r| !r.is_resolved() && !r.needs_manual_input)
            .count();
        let manual = results
            .iter()
            .filter(|r| !r.is_resolved() && r.needs_manual_input)
            .count();
        Self {
            results,
            resolved,
            pending,
            manual,
        }
    }
}
