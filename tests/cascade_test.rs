// ABOUTME: Integration tests for the provider cascade with in-memory mock providers
// ABOUTME: Verifies ordering, short-circuiting, soft failures, suggestions and scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dietrack::config::NutritionLookupConfig;
use dietrack::errors::{AppError, AppResult};
use dietrack::models::{Confidence, FoodQuery, MacroVector, NutritionSource};
use dietrack::nutrition::{LocalFoodProvider, NutritionCascade};
use dietrack_providers::{NutritionProvider, ProviderReport};

/// What a mock provider answers
#[derive(Clone)]
enum Behavior {
    Fail,
    Miss,
    Suggest(Vec<&'static str>),
    Absolute(MacroVector),
    Per100g(MacroVector),
    Per100gSuggesting(MacroVector, Vec<&'static str>),
}

/// Provider that records how often it was called
struct MockProvider {
    source: NutritionSource,
    configured: bool,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockProvider {
    fn new(source: NutritionSource, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            source,
            configured: true,
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    fn unconfigured(source: NutritionSource) -> Arc<Self> {
        Arc::new(Self {
            source,
            configured: false,
            behavior: Behavior::Miss,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NutritionProvider for MockProvider {
    fn source(&self) -> NutritionSource {
        self.source
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn lookup(&self, _query: &FoodQuery) -> AppResult<ProviderReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Fail => Err(AppError::external_unavailable(
                self.source.as_str(),
                "connection refused",
            )),
            Behavior::Miss => Ok(ProviderReport::miss()),
            Behavior::Suggest(names) => Ok(ProviderReport::suggestions_only(
                names.iter().map(|name| (*name).to_owned()).collect(),
            )),
            Behavior::Absolute(macros) => Ok(ProviderReport::absolute(*macros)),
            Behavior::Per100g(macros) => Ok(ProviderReport::per_100g(*macros)),
            Behavior::Per100gSuggesting(macros, names) => Ok(ProviderReport::per_100g(*macros)
                .with_suggestions(names.iter().map(|name| (*name).to_owned()).collect())),
        }
    }
}

fn cascade(providers: &[Arc<MockProvider>]) -> NutritionCascade {
    let mut list: Vec<Arc<dyn NutritionProvider>> = vec![Arc::new(LocalFoodProvider)];
    list.extend(
        providers
            .iter()
            .map(|provider| Arc::clone(provider) as Arc<dyn NutritionProvider>),
    );
    NutritionCascade::new(list)
}

// ============================================================================
// Ordering and short-circuiting
// ============================================================================

#[tokio::test]
async fn test_local_hit_skips_network_providers() {
    common::init_test_logging();
    let remote = MockProvider::new(
        NutritionSource::Nutritionix,
        Behavior::Absolute(MacroVector::new(1.0, 1.0, 1.0, 1.0)),
    );
    let cascade = cascade(&[Arc::clone(&remote)]);

    let result = cascade
        .resolve(&FoodQuery::new("petto di pollo", 150.0, "g"))
        .await;

    let nutrition = result.nutrition.unwrap();
    assert_eq!(nutrition.source, NutritionSource::Local);
    assert_eq!(nutrition.macros.calories, 248.0);
    assert!(!result.needs_manual_input);
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn test_first_remote_hit_wins() {
    common::init_test_logging();
    let nutritionix = MockProvider::new(NutritionSource::Nutritionix, Behavior::Miss);
    let usda = MockProvider::new(
        NutritionSource::Usda,
        Behavior::Per100g(MacroVector::new(250.0, 10.0, 30.0, 9.0)),
    );
    let llm = MockProvider::new(
        NutritionSource::Estimated,
        Behavior::Absolute(MacroVector::new(1.0, 1.0, 1.0, 1.0)),
    );
    let cascade = cascade(&[Arc::clone(&nutritionix), Arc::clone(&usda), Arc::clone(&llm)]);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 200.0, "g"))
        .await;

    let nutrition = result.nutrition.unwrap();
    assert_eq!(nutrition.source, NutritionSource::Usda);
    assert_eq!(nutrition.confidence, Confidence::High);
    assert_eq!(nutritionix.calls(), 1);
    assert_eq!(usda.calls(), 1);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_unconfigured_providers_are_never_called() {
    common::init_test_logging();
    let nutritionix = MockProvider::unconfigured(NutritionSource::Nutritionix);
    let estimator = MockProvider::new(
        NutritionSource::Estimated,
        Behavior::Absolute(MacroVector::new(120.0, 4.0, 20.0, 2.0)),
    );
    let cascade = cascade(&[Arc::clone(&nutritionix), Arc::clone(&estimator)]);

    assert_eq!(cascade.active_sources(), vec!["local", "estimated"]);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 1.0, "porzione"))
        .await;

    assert_eq!(nutritionix.calls(), 0);
    assert_eq!(result.nutrition.unwrap().source, NutritionSource::Estimated);
}

// ============================================================================
// Soft failures and suggestions
// ============================================================================

#[tokio::test]
async fn test_failing_providers_fall_through_to_manual_input() {
    common::init_test_logging();
    let providers = [
        MockProvider::new(NutritionSource::Nutritionix, Behavior::Fail),
        MockProvider::new(NutritionSource::Usda, Behavior::Fail),
        MockProvider::new(NutritionSource::OpenFoodFacts, Behavior::Fail),
        MockProvider::new(NutritionSource::Estimated, Behavior::Fail),
    ];
    let cascade = cascade(&providers);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 100.0, "g"))
        .await;

    assert!(result.needs_manual_input);
    assert!(result.nutrition.is_none());
    assert!(result.suggestions.is_empty());
    assert!(providers.iter().all(|provider| provider.calls() == 1));
}

#[tokio::test]
async fn test_first_non_empty_suggestions_are_kept() {
    common::init_test_logging();
    let providers = [
        MockProvider::new(NutritionSource::Usda, Behavior::Miss),
        MockProvider::new(
            NutritionSource::OpenFoodFacts,
            Behavior::Suggest(vec!["Quinoa bianca", "Quinoa rossa"]),
        ),
        MockProvider::new(NutritionSource::Estimated, Behavior::Suggest(vec!["Quinoa"])),
    ];
    let cascade = cascade(&providers);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 100.0, "g"))
        .await;

    assert!(result.needs_manual_input);
    assert_eq!(result.suggestions, vec!["Quinoa bianca", "Quinoa rossa"]);
}

#[tokio::test]
async fn test_resolved_result_keeps_provider_suggestions() {
    common::init_test_logging();
    let usda = MockProvider::new(
        NutritionSource::Usda,
        Behavior::Per100gSuggesting(
            MacroVector::new(100.0, 1.0, 1.0, 1.0),
            vec!["Quinoa, cooked", "Quinoa, raw"],
        ),
    );
    let cascade = cascade(&[usda]);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 100.0, "g"))
        .await;

    assert!(!result.needs_manual_input);
    assert_eq!(result.nutrition.unwrap().source, NutritionSource::Usda);
    assert_eq!(result.suggestions, vec!["Quinoa, cooked", "Quinoa, raw"]);
}

#[tokio::test]
async fn test_earlier_suggestions_survive_a_later_hit() {
    common::init_test_logging();
    let providers = [
        MockProvider::new(
            NutritionSource::Usda,
            Behavior::Suggest(vec!["Quinoa, uncooked"]),
        ),
        MockProvider::new(
            NutritionSource::Estimated,
            Behavior::Absolute(MacroVector::new(120.0, 4.0, 20.0, 2.0)),
        ),
    ];
    let cascade = cascade(&providers);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 1.0, "porzione"))
        .await;

    assert_eq!(result.nutrition.unwrap().source, NutritionSource::Estimated);
    assert_eq!(result.suggestions, vec!["Quinoa, uncooked"]);
}

// ============================================================================
// Confidence
// ============================================================================

#[tokio::test]
async fn test_confidence_follows_resolving_source() {
    common::init_test_logging();
    let cases = [
        (NutritionSource::Nutritionix, Confidence::High),
        (NutritionSource::Usda, Confidence::High),
        (NutritionSource::OpenFoodFacts, Confidence::Medium),
        (NutritionSource::Estimated, Confidence::Low),
    ];

    for (source, expected) in cases {
        let provider = MockProvider::new(
            source,
            Behavior::Absolute(MacroVector::new(200.0, 10.0, 20.0, 5.0)),
        );
        let result = cascade(&[provider])
            .resolve(&FoodQuery::new("kefir di cocco", 1.0, "pz"))
            .await;

        let nutrition = result.nutrition.unwrap();
        assert_eq!(nutrition.source, source);
        assert_eq!(nutrition.confidence, expected, "confidence for {source}");
    }

    let local = cascade(&[])
        .resolve(&FoodQuery::new("mela", 1.0, "pz"))
        .await
        .nutrition
        .unwrap();
    assert_eq!(local.confidence, Confidence::High);
}

// ============================================================================
// Scaling
// ============================================================================

#[tokio::test]
async fn test_per_100g_hits_are_scaled_to_query_grams() {
    common::init_test_logging();
    let usda = MockProvider::new(
        NutritionSource::Usda,
        Behavior::Per100g(MacroVector::new(368.0, 14.1, 64.2, 6.1).with_fiber(7.0)),
    );
    let cascade = cascade(&[usda]);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 2.0, "cucchiaio"))
        .await;

    // 2 tablespoons are 30 g
    let macros = result.nutrition.unwrap().macros;
    assert_eq!(macros.calories, 110.0);
    assert_eq!(macros.protein, 4.2);
    assert_eq!(macros.carbs, 19.3);
    assert_eq!(macros.fat, 1.8);
    assert_eq!(macros.fiber, Some(2.1));
}

#[tokio::test]
async fn test_absolute_hits_are_returned_as_is() {
    common::init_test_logging();
    let nutritionix = MockProvider::new(
        NutritionSource::Nutritionix,
        Behavior::Absolute(MacroVector::new(95.0, 0.5, 25.0, 0.3)),
    );
    let cascade = cascade(&[nutritionix]);

    let result = cascade
        .resolve(&FoodQuery::new("quinotto andino", 3.0, "pz"))
        .await;

    let nutrition = result.nutrition.unwrap();
    assert_eq!(nutrition.macros, MacroVector::new(95.0, 0.5, 25.0, 0.3));
    assert_eq!(nutrition.confidence, Confidence::High);
}

#[test]
fn test_default_config_builds_local_first_cascade() {
    let cascade = NutritionCascade::from_config(&NutritionLookupConfig::default());
    let sources = cascade.active_sources();
    assert_eq!(sources.first(), Some(&"local"));
    assert!(!sources.contains(&"usda"));
    assert!(!NutritionCascade::remote_only(&NutritionLookupConfig::default())
        .active_sources()
        .contains(&"local"));
}
