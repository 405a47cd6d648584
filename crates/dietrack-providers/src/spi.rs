// ABOUTME: Service provider interface for remote nutrition sources
// ABOUTME: NutritionProvider trait plus the hit/miss report every adapter returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use async_trait::async_trait;
use dietrack_core::errors::AppResult;
use dietrack_core::models::{FoodQuery, MacroVector, NutritionSource};

/// What quantity a provider's macros refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroBasis {
    /// Already scaled to the full queried quantity
    Absolute,
    /// Per 100 grams; the caller converts the query to grams and scales
    Per100Grams,
}

/// Nutrition data found by a provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderHit {
    /// Macros as reported, rounded when `basis` is `Absolute`
    pub macros: MacroVector,
    /// Quantity the macros refer to
    pub basis: MacroBasis,
}

/// Outcome of one provider call that did not fail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderReport {
    /// Usable nutrition data, if any
    pub hit: Option<ProviderHit>,
    /// Near-match names, offered to the user when nothing resolves
    pub suggestions: Vec<String>,
}

impl ProviderReport {
    /// Nothing found, nothing to suggest
    #[must_use]
    pub fn miss() -> Self {
        Self::default()
    }

    /// Nothing usable found, but these names came close
    #[must_use]
    pub fn suggestions_only(suggestions: Vec<String>) -> Self {
        Self {
            hit: None,
            suggestions,
        }
    }

    /// Macros for the full quantity
    #[must_use]
    pub fn absolute(macros: MacroVector) -> Self {
        Self {
            hit: Some(ProviderHit {
                macros,
                basis: MacroBasis::Absolute,
            }),
            suggestions: Vec::new(),
        }
    }

    /// Macros per 100 grams
    #[must_use]
    pub fn per_100g(macros: MacroVector) -> Self {
        Self {
            hit: Some(ProviderHit {
                macros,
                basis: MacroBasis::Per100Grams,
            }),
            suggestions: Vec::new(),
        }
    }

    /// Attach suggestions to a report
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

/// A source of nutrition data consulted by the lookup cascade
///
/// Implementations must not retry. Any transport failure, non-2xx status or
/// malformed body is returned as `Err` and the caller moves on.
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Source tag stamped on results from this provider
    fn source(&self) -> NutritionSource;

    /// Whether credentials and settings allow this provider to run
    fn is_configured(&self) -> bool {
        true
    }

    /// Look up one food
    ///
    /// # Errors
    ///
    /// Returns an error when the provider could not be queried or answered
    /// with something unusable.
    async fn lookup(&self, query: &FoodQuery) -> AppResult<ProviderReport>;
}
