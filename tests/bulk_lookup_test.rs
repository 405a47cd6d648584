// ABOUTME: Integration tests for the two-phase bulk lookup orchestrator
// ABOUTME: Mock and wiremock batch backends cover merging, failures, timeouts and progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dietrack::config::NutritionLookupConfig;
use dietrack::errors::{AppError, AppResult};
use dietrack::models::{
    FoodLookupResult, FoodQuery, MacroVector, NutritionResult, NutritionSource,
};
use dietrack::nutrition::{BatchLookup, BulkLookup, HttpBatchLookup};
use dietrack::plan_extraction::parse_extraction_response;
use serde_json::json;
use tokio::time::sleep;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Remote backend answer
enum Reply {
    /// Resolve every food with these macros
    Resolve(MacroVector),
    /// Leave every food unresolved with one suggestion
    SuggestOnly,
    Fail,
    /// Answer after this long
    Slow(Duration),
}

struct MockBatch {
    reply: Reply,
    received: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockBatch {
    fn new(reply: Reply) -> (Self, Arc<Mutex<Vec<Vec<String>>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                reply,
                received: Arc::clone(&received),
            },
            received,
        )
    }
}

#[async_trait]
impl BatchLookup for MockBatch {
    async fn lookup_batch(&self, foods: &[FoodQuery]) -> AppResult<Vec<FoodLookupResult>> {
        self.received
            .lock()
            .unwrap()
            .push(foods.iter().map(|food| food.name.clone()).collect());

        match &self.reply {
            Reply::Resolve(macros) => Ok(foods
                .iter()
                .map(|food| {
                    FoodLookupResult::resolved(
                        food,
                        NutritionResult::new(*macros, NutritionSource::OpenFoodFacts),
                    )
                })
                .collect()),
            Reply::SuggestOnly => Ok(foods
                .iter()
                .map(|food| FoodLookupResult::unresolved(food, vec![format!("{} bio", food.name)]))
                .collect()),
            Reply::Fail => Err(AppError::external_unavailable("nutrition-lookup", "down")),
            Reply::Slow(delay) => {
                sleep(*delay).await;
                Ok(Vec::new())
            }
        }
    }
}

fn plan_foods() -> Vec<FoodQuery> {
    vec![
        FoodQuery::new("avena", 40.0, "g"),
        FoodQuery::new("quinotto andino", 80.0, "g"),
        FoodQuery::new("Petto di pollo", 150.0, "g"),
        FoodQuery::new("kefir di cocco", 150.0, "ml"),
    ]
}

// ============================================================================
// Cardinality and merging
// ============================================================================

#[tokio::test]
async fn test_empty_input_yields_empty_result() {
    common::init_test_logging();
    let (backend, received) = MockBatch::new(Reply::Fail);
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_secs(5));

    let result = bulk.lookup_bulk(&[]).await;

    assert!(result.results.is_empty());
    assert_eq!(result.resolved, 0);
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(bulk.subscribe().borrow().percent, 100);
}

#[tokio::test]
async fn test_only_local_misses_go_remote_and_order_is_kept() {
    common::init_test_logging();
    let (backend, received) = MockBatch::new(Reply::Resolve(MacroVector::new(
        300.0, 12.0, 40.0, 8.0,
    )));
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_secs(5));
    let foods = plan_foods();

    let result = bulk.lookup_bulk(&foods).await;

    assert_eq!(result.results.len(), foods.len());
    assert_eq!(result.resolved, 4);
    assert_eq!(result.manual, 0);
    assert_eq!(
        *received.lock().unwrap(),
        vec![vec![
            "quinotto andino".to_owned(),
            "kefir di cocco".to_owned()
        ]]
    );

    let names: Vec<&str> = result.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["avena", "quinotto andino", "Petto di pollo", "kefir di cocco"]
    );
    let sources: Vec<NutritionSource> = result
        .results
        .iter()
        .map(|r| r.nutrition.as_ref().unwrap().source)
        .collect();
    assert_eq!(
        sources,
        vec![
            NutritionSource::Local,
            NutritionSource::OpenFoodFacts,
            NutritionSource::Local,
            NutritionSource::OpenFoodFacts
        ]
    );
    assert!(result.results.iter().all(|r| !r.needs_manual_input));
}

#[tokio::test]
async fn test_remote_suggestions_are_merged_into_manual_items() {
    common::init_test_logging();
    let (backend, _) = MockBatch::new(Reply::SuggestOnly);
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_secs(5));

    let result = bulk.lookup_bulk(&plan_foods()).await;

    assert_eq!(result.resolved, 2);
    assert_eq!(result.manual, 2);
    let quinotto = &result.results[1];
    assert!(quinotto.needs_manual_input);
    assert_eq!(quinotto.suggestions, vec!["quinotto andino bio"]);
}

// ============================================================================
// Failures and timeouts
// ============================================================================

#[tokio::test]
async fn test_remote_failure_leaves_items_for_manual_input() {
    common::init_test_logging();
    let (backend, _) = MockBatch::new(Reply::Fail);
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_secs(5));
    let foods = plan_foods();

    let result = bulk.lookup_bulk(&foods).await;

    assert_eq!(result.results.len(), foods.len());
    assert_eq!(result.resolved, 2);
    assert_eq!(result.manual, 2);
    assert!(result.results[1].nutrition.is_none());
    assert!(result.results[3].needs_manual_input);
}

#[tokio::test]
async fn test_remote_timeout_leaves_items_for_manual_input() {
    common::init_test_logging();
    let (backend, _) = MockBatch::new(Reply::Slow(Duration::from_secs(10)));
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_millis(50));

    let result = bulk.lookup_bulk(&plan_foods()).await;

    assert_eq!(result.results.len(), 4);
    assert_eq!(result.manual, 2);
    assert_eq!(bulk.subscribe().borrow().percent, 100);
}

#[tokio::test]
async fn test_all_local_skips_remote_backend() {
    common::init_test_logging();
    let (backend, received) = MockBatch::new(Reply::Fail);
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_secs(5));

    let result = bulk
        .lookup_bulk(&[FoodQuery::new("mela", 1.0, "pz"), FoodQuery::new("riso", 80.0, "g")])
        .await;

    assert_eq!(result.resolved, 2);
    assert!(received.lock().unwrap().is_empty());
}

// ============================================================================
// Progress
// ============================================================================

#[tokio::test]
async fn test_progress_moves_through_local_then_remote_phase() {
    common::init_test_logging();
    let (backend, _) = MockBatch::new(Reply::Slow(Duration::from_millis(20)));
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_secs(5));

    let mut receiver = bulk.subscribe();
    let recorder = tokio::spawn(async move {
        let mut seen = Vec::new();
        while receiver.changed().await.is_ok() {
            let progress = receiver.borrow_and_update().clone();
            let done = progress.percent == 100;
            seen.push(progress);
            if done {
                break;
            }
        }
        seen
    });

    bulk.lookup_bulk(&plan_foods()).await;
    let seen = recorder.await.unwrap();

    let percents: Vec<u8> = seen.iter().map(|progress| progress.percent).collect();
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]), "{percents:?}");
    assert_eq!(percents.last(), Some(&100));

    let local: Vec<_> = seen
        .iter()
        .filter(|progress| progress.status.starts_with("Local lookup"))
        .collect();
    assert!(!local.is_empty());
    assert!(local.iter().all(|progress| progress.percent < 50));

    let remote = seen
        .iter()
        .find(|progress| progress.percent == 60)
        .expect("remote phase progress");
    assert_eq!(remote.status, "Searching 2 foods online");
}

// ============================================================================
// Remote endpoint transport
// ============================================================================

#[tokio::test]
async fn test_http_batch_lookup_posts_foods() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/nutrition-lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [{
                "name": "quinotto andino",
                "quantity": 80.0,
                "unit": "g",
                "nutrition": {
                    "calories": 290.0,
                    "protein": 11.0,
                    "carbs": 51.0,
                    "fat": 4.8,
                    "source": "usda",
                    "confidence": "high"
                },
                "needsManualInput": false
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBatchLookup::new(format!("{}/api/nutrition-lookup", server.uri()));
    let bulk = BulkLookup::new(Box::new(backend), Duration::from_secs(5));

    let result = bulk
        .lookup_bulk(&[
            FoodQuery::new("riso", 80.0, "g"),
            FoodQuery::new("quinotto andino", 80.0, "g"),
        ])
        .await;

    assert_eq!(result.resolved, 2);
    let remote = result.results[1].nutrition.as_ref().unwrap();
    assert_eq!(remote.source, NutritionSource::Usda);
    assert_eq!(remote.macros.calories, 290.0);
}

#[tokio::test]
async fn test_http_batch_lookup_reported_failure_is_an_error() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/nutrition-lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let backend = HttpBatchLookup::new(format!("{}/api/nutrition-lookup", server.uri()));
    let error = backend
        .lookup_batch(&[FoodQuery::new("quinotto andino", 80.0, "g")])
        .await
        .unwrap_err();

    assert!(error.to_string().contains("quota exceeded"));
}

#[tokio::test]
async fn test_extracted_plan_runs_through_configured_endpoint() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/nutrition-lookup"))
        .and(body_partial_json(json!({
            "foods": [{ "name": "kefir di cocco", "quantity": 1.0, "unit": "pz" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [{
                "name": "kefir di cocco",
                "quantity": 1.0,
                "unit": "pz",
                "nutrition": null,
                "needsManualInput": true,
                "suggestions": ["Kefir, plain"]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = r#"```json
{"days": [{"day": "Lun", "meals": [{"t": "b", "f": ["40g avena", "kefir di cocco"]}]}]}
```"#;
    let plan = parse_extraction_response(answer).unwrap();
    let config = NutritionLookupConfig {
        lookup_url: Some(format!("{}/api/nutrition-lookup", server.uri())),
        ..NutritionLookupConfig::default()
    };

    let result = BulkLookup::from_config(&config)
        .lookup_bulk(&plan.food_queries())
        .await;

    assert_eq!(result.results.len(), 2);
    assert_eq!(result.resolved, 1);
    assert_eq!(result.manual, 1);
    assert_eq!(result.results[1].suggestions, vec!["Kefir, plain"]);
}
