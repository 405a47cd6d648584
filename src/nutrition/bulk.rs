// ABOUTME: Bulk nutrition lookup in two phases: local table, then one remote batch
// ABOUTME: Always returns one result per query and publishes progress over a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Bulk Lookup
//!
//! Phase one resolves every query it can against the local table without any
//! I/O. Phase two sends the remaining queries in a single batch to a
//! [`BatchLookup`] backend under a wall-clock budget. A backend failure or a
//! timeout leaves those items flagged for manual input; the caller always
//! gets a complete, ordered result list.

use std::time::Duration;

use async_trait::async_trait;
use dietrack_providers::http_client::{decode_json, shared_client, transport_error};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::yield_now;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::NutritionLookupConfig;
use crate::constants::progress::{DONE_PERCENT, LOCAL_PHASE_PERCENT, REMOTE_PHASE_PERCENT};
use crate::errors::{AppError, AppResult};
use crate::models::{BulkLookupResult, FoodLookupResult, FoodQuery};

use super::cascade::NutritionCascade;
use super::local::lookup_local;

/// Service name used in errors from the remote lookup endpoint
const BATCH_SERVICE: &str = "nutrition-lookup";

/// Snapshot of bulk lookup progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupProgress {
    /// 0 to 100
    pub percent: u8,
    /// Human readable phase description
    pub status: String,
}

impl LookupProgress {
    fn new(percent: u8, status: impl Into<String>) -> Self {
        Self {
            percent,
            status: status.into(),
        }
    }
}

impl Default for LookupProgress {
    fn default() -> Self {
        Self::new(0, "Waiting")
    }
}

/// Resolves a batch of queries remotely, one result per query in order
#[async_trait]
pub trait BatchLookup: Send + Sync {
    /// Look up every query in `foods`
    ///
    /// # Errors
    ///
    /// Returns an error when the whole batch could not be resolved.
    async fn lookup_batch(&self, foods: &[FoodQuery]) -> AppResult<Vec<FoodLookupResult>>;
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    foods: &'a [FoodQuery],
}

#[derive(Deserialize)]
struct BatchResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    results: Vec<FoodLookupResult>,
    #[serde(default)]
    error: Option<String>,
}

/// Posts the batch to a remote `/api/nutrition-lookup` endpoint
#[derive(Debug, Clone)]
pub struct HttpBatchLookup {
    url: String,
}

impl HttpBatchLookup {
    /// Client for the endpoint at `url`
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl BatchLookup for HttpBatchLookup {
    async fn lookup_batch(&self, foods: &[FoodQuery]) -> AppResult<Vec<FoodLookupResult>> {
        let response = shared_client()
            .post(&self.url)
            .json(&BatchRequest { foods })
            .send()
            .await
            .map_err(|e| transport_error(BATCH_SERVICE, &e))?;

        let body: BatchResponse = decode_json(BATCH_SERVICE, response).await?;
        if !body.success {
            return Err(AppError::external_service(
                BATCH_SERVICE,
                body.error.unwrap_or_else(|| "lookup reported failure".to_owned()),
            ));
        }
        Ok(body.results)
    }
}

/// Runs the remote part of the cascade in-process, one food after another
#[derive(Clone)]
pub struct CascadeBatchLookup {
    cascade: NutritionCascade,
}

impl CascadeBatchLookup {
    /// Batch backend over `cascade`
    #[must_use]
    pub const fn new(cascade: NutritionCascade) -> Self {
        Self { cascade }
    }
}

#[async_trait]
impl BatchLookup for CascadeBatchLookup {
    async fn lookup_batch(&self, foods: &[FoodQuery]) -> AppResult<Vec<FoodLookupResult>> {
        let mut results = Vec::with_capacity(foods.len());
        for food in foods {
            results.push(self.cascade.resolve(food).await);
        }
        Ok(results)
    }
}

/// Two-phase bulk lookup orchestrator
pub struct BulkLookup {
    remote: Box<dyn BatchLookup>,
    budget: Duration,
    progress: watch::Sender<LookupProgress>,
}

impl BulkLookup {
    /// Orchestrator with an explicit remote backend and time budget
    #[must_use]
    pub fn new(remote: Box<dyn BatchLookup>, budget: Duration) -> Self {
        let (progress, _) = watch::channel(LookupProgress::default());
        Self {
            remote,
            budget,
            progress,
        }
    }

    /// Remote endpoint when `lookup_url` is set, in-process cascade otherwise
    #[must_use]
    pub fn from_config(config: &NutritionLookupConfig) -> Self {
        let remote: Box<dyn BatchLookup> = match &config.lookup_url {
            Some(url) => Box::new(HttpBatchLookup::new(url.clone())),
            None => Box::new(CascadeBatchLookup::new(NutritionCascade::remote_only(config))),
        };
        Self::new(remote, config.lookup_timeout)
    }

    /// Receiver that observes progress of lookups run by this orchestrator
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LookupProgress> {
        self.progress.subscribe()
    }

    fn report(&self, percent: u8, status: impl Into<String>) {
        self.progress.send_replace(LookupProgress::new(percent, status));
    }

    /// Resolve every query, local table first, then one remote batch
    pub async fn lookup_bulk(&self, queries: &[FoodQuery]) -> BulkLookupResult {
        let mut results = self.local_phase(queries).await;

        let pending: Vec<usize> = results
            .iter()
            .enumerate()
            .filter(|(_, result)| !result.is_resolved())
            .map(|(index, _)| index)
            .collect();

        info!(
            total = queries.len(),
            local = queries.len() - pending.len(),
            remote = pending.len(),
            "Local nutrition phase finished"
        );

        if !pending.is_empty() {
            self.remote_phase(queries, &pending, &mut results).await;
        }

        self.report(DONE_PERCENT, "Done");
        let bulk = BulkLookupResult::from_results(results);
        info!(
            resolved = bulk.resolved,
            pending = bulk.pending,
            manual = bulk.manual,
            "Bulk nutrition lookup finished"
        );
        bulk
    }

    async fn local_phase(&self, queries: &[FoodQuery]) -> Vec<FoodLookupResult> {
        let total = queries.len();
        let mut results = Vec::with_capacity(total);
        for (index, query) in queries.iter().enumerate() {
            self.report(
                local_percent(index, total),
                format!("Local lookup: {}", query.name),
            );
            results.push(lookup_local(query).map_or_else(
                || FoodLookupResult::unresolved(query, Vec::new()),
                |nutrition| FoodLookupResult::resolved(query, nutrition),
            ));
            // Let progress subscribers observe each step
            yield_now().await;
        }
        results
    }

    async fn remote_phase(
        &self,
        queries: &[FoodQuery],
        pending: &[usize],
        results: &mut [FoodLookupResult],
    ) {
        self.report(
            REMOTE_PHASE_PERCENT,
            format!("Searching {} foods online", pending.len()),
        );
        let batch: Vec<FoodQuery> = pending.iter().map(|&index| queries[index].clone()).collect();

        let remote = match timeout(self.budget, self.remote.lookup_batch(&batch)).await {
            Ok(Ok(remote)) => remote,
            Ok(Err(e)) => {
                warn!(error = %e, foods = batch.len(), "Remote nutrition lookup failed");
                return;
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.budget.as_secs(),
                    foods = batch.len(),
                    "Remote nutrition lookup timed out"
                );
                return;
            }
        };

        for (&index, found) in pending.iter().zip(remote) {
            let target = &mut results[index];
            if let Some(nutrition) = found.nutrition {
                target.nutrition = Some(nutrition);
                target.needs_manual_input = false;
            }
            target.suggestions = found.suggestions;
        }
    }
}

/// Phase-one progress for the item at `index`, spread over 0 to 50
fn local_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (index as f64 / total as f64 * f64::from(LOCAL_PHASE_PERCENT)).round() as u8;
    percent
}
