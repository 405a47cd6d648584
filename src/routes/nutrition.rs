// ABOUTME: Bulk nutrition lookup endpoint running the full provider cascade per food
// ABOUTME: Serves as the remote phase of bulk lookups started by other instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! Nutrition lookup routes
//!
//! - `POST /api/nutrition-lookup` - resolve `{ "foods": [...] }` in order

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::endpoints::NUTRITION_LOOKUP;
use crate::errors::AppError;
use crate::models::{FoodLookupResult, FoodQuery};
use crate::nutrition::NutritionCascade;

/// Request body of the lookup endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionLookupRequest {
    /// Foods to resolve, in order
    #[serde(default)]
    pub foods: Vec<FoodQuery>,
}

/// Response body of the lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionLookupResponse {
    /// Always true for a 200 response
    pub success: bool,
    /// One result per requested food, in request order
    pub results: Vec<FoodLookupResult>,
}

/// Routes for nutrition lookups
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition routes over `cascade`
    pub fn routes(cascade: Arc<NutritionCascade>) -> Router {
        Router::new()
            .route(NUTRITION_LOOKUP, post(Self::handle_lookup))
            .with_state(cascade)
    }

    /// Handle a batched lookup
    async fn handle_lookup(
        State(cascade): State<Arc<NutritionCascade>>,
        Json(request): Json<NutritionLookupRequest>,
    ) -> Result<Response, AppError> {
        if request.foods.is_empty() {
            return Err(AppError::invalid_input("No foods provided"));
        }

        let mut results = Vec::with_capacity(request.foods.len());
        for food in &request.foods {
            results.push(cascade.resolve(food).await);
        }

        let resolved = results.iter().filter(|r| r.is_resolved()).count();
        info!(
            foods = results.len(),
            resolved,
            "Nutrition lookup request served"
        );

        Ok((
            StatusCode::OK,
            Json(NutritionLookupResponse {
                success: true,
                results,
            }),
        )
            .into_response())
    }
}
