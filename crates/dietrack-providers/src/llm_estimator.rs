// ABOUTME: Last-resort nutrition estimate from an OpenAI-compatible chat model
// ABOUTME: Prompts in Italian for compact {cal,p,c,f} JSON and parses the first object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::sync::LazyLock;

use async_trait::async_trait;
use dietrack_core::errors::{AppError, AppResult};
use dietrack_core::macros::round_one_decimal;
use dietrack_core::models::{FoodQuery, MacroVector, NutritionSource};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::{decode_json, shared_client, transport_error};
use crate::spi::{NutritionProvider, ProviderReport};

const SERVICE: &str = "LLM estimator";

/// First flat `{...}` object in a completion
static JSON_OBJECT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{[^}]+\}").ok());

/// LLM estimator configuration
#[derive(Debug, Clone)]
pub struct LlmEstimatorConfig {
    /// API key; the provider is disabled without one
    pub api_key: Option<String>,
    /// OpenAI-compatible base URL, default <https://api.openai.com/v1>
    pub base_url: String,
    /// Chat model, default `gpt-4o-mini`
    pub model: String,
    /// Completion token cap
    pub max_tokens: u32,
}

impl Default for LlmEstimatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_owned(),
            model: "gpt-4o-mini".to_owned(),
            max_tokens: 100,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompactEstimate {
    cal: Option<f64>,
    p: Option<f64>,
    c: Option<f64>,
    f: Option<f64>,
}

/// Build the estimation prompt for a query
#[must_use]
pub fn estimation_prompt(query: &FoodQuery) -> String {
    format!(
        "Stima i valori nutrizionali per: {query}\n\
         Rispondi SOLO con JSON: {{\"cal\":number,\"p\":number,\"c\":number,\"f\":number}}\n\
         cal=calorie, p=proteine(g), c=carboidrati(g), f=grassi(g). Sii preciso, considera porzioni italiane tipiche."
    )
}

/// Extract `{cal,p,c,f}` from a completion
///
/// Returns `Ok(None)` when the text holds no `{...}` object at all.
///
/// # Errors
///
/// Returns an error when the first object is not valid JSON.
pub fn parse_estimate(content: &str) -> AppResult<Option<MacroVector>> {
    let Some(found) = JSON_OBJECT.as_ref().and_then(|re| re.find(content)) else {
        return Ok(None);
    };

    let estimate: CompactEstimate = serde_json::from_str(found.as_str()).map_err(|e| {
        AppError::external_service(SERVICE, format!("unparseable estimate: {e}")).with_source(e)
    })?;

    Ok(Some(MacroVector::new(
        estimate.cal.unwrap_or(0.0).round(),
        round_one_decimal(estimate.p.unwrap_or(0.0)),
        round_one_decimal(estimate.c.unwrap_or(0.0)),
        round_one_decimal(estimate.f.unwrap_or(0.0)),
    )))
}

/// Chat-completion backed estimator
pub struct LlmEstimatorProvider {
    config: LlmEstimatorConfig,
    client: Client,
}

impl LlmEstimatorProvider {
    /// Create a provider using the shared HTTP client
    #[must_use]
    pub fn new(config: LlmEstimatorConfig) -> Self {
        Self {
            config,
            client: shared_client().clone(),
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

#[async_trait]
impl NutritionProvider for LlmEstimatorProvider {
    fn source(&self) -> NutritionSource {
        NutritionSource::Estimated
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    async fn lookup(&self, query: &FoodQuery) -> AppResult<ProviderReport> {
        let Some(api_key) = self.api_key() else {
            return Ok(ProviderReport::miss());
        };

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: estimation_prompt(query),
            }],
            max_tokens: self.config.max_tokens,
            temperature: 0.0,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        let parsed: ChatCompletionResponse = decode_json(SERVICE, response).await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        match parse_estimate(&content)? {
            Some(macros) => Ok(ProviderReport::absolute(macros)),
            None => {
                debug!(food = %query.name, "LLM reply held no JSON object");
                Ok(ProviderReport::miss())
            }
        }
    }
}
