//! HTTP client for an OpenAI-compatible chat-completions API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::prompt;
use super::provider::{
    BudgetAdvisor, BudgetSuggestionRequest, BudgetSuggestions, SpendingAnalyst, SpendingSummary,
    SpendingSummaryRequest,
};
use crate::config::AiSettings;
use crate::error::{BudgetwiseError, BudgetwiseResult};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Talks to the prompt service over HTTP
///
/// Implements both [`BudgetAdvisor`] and [`SpendingAnalyst`].
#[derive(Debug, Clone)]
pub struct PromptServiceClient {
    base_url: Url,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    http: reqwest::Client,
}

impl PromptServiceClient {
    /// Build a client from settings, reading the API key from the environment
    ///
    /// A missing key is not an error here; requests fail with a provider
    /// error instead, so callers can fall back.
    pub fn new(settings: &AiSettings) -> BudgetwiseResult<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::with_api_key(settings, api_key)
    }

    pub fn with_api_key(settings: &AiSettings, api_key: Option<String>) -> BudgetwiseResult<Self> {
        let mut endpoint = settings.endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let base_url = Url::parse(&endpoint).map_err(|e| {
            BudgetwiseError::Config(format!("Invalid AI endpoint '{}': {}", settings.endpoint, e))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| BudgetwiseError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            model: settings.model.clone(),
            api_key,
            api_key_env: settings.api_key_env.clone(),
            http,
        })
    }

    /// Full URL requests are posted to
    pub fn completions_url(&self) -> BudgetwiseResult<Url> {
        self.base_url
            .join("chat/completions")
            .map_err(|e| BudgetwiseError::Config(format!("Invalid AI endpoint: {}", e)))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete_json<T: DeserializeOwned>(&self, system: &str, user: &str) -> BudgetwiseResult<T> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            BudgetwiseError::Provider(format!(
                "No API key: set the {} environment variable",
                self.api_key_env
            ))
        })?;
        let url = self.completions_url()?;

        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        info!(url = %url, model = %self.model, "sending prompt");
        let res = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let raw = res.text().await.unwrap_or_default();
            let body = serde_json::from_str::<ErrorResponse>(&raw)
                .map(|err| err.error.message)
                .unwrap_or(raw);
            warn!(status = status.as_u16(), "prompt service returned an error");
            return Err(status_error(status.as_u16(), body));
        }

        let completion: ChatResponse = res
            .json()
            .await
            .map_err(|e| BudgetwiseError::MalformedResponse(format!("Invalid completion body: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                BudgetwiseError::MalformedResponse("Completion contained no message".to_string())
            })?;

        parse_content(&content)
    }
}

fn status_error(status: u16, body: String) -> BudgetwiseError {
    match status {
        401 | 403 => BudgetwiseError::Provider(format!("Authentication failed ({}): {}", status, body)),
        404 => BudgetwiseError::Provider(format!("Endpoint or model not found: {}", body)),
        429 => BudgetwiseError::Provider(format!("Rate limited: {}", body)),
        _ => BudgetwiseError::Provider(format!("Request failed with status {}: {}", status, body)),
    }
}

/// Parse message content as JSON, tolerating a Markdown code fence
fn parse_content<T: DeserializeOwned>(content: &str) -> BudgetwiseResult<T> {
    let trimmed = content.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(json.trim())
        .map_err(|e| BudgetwiseError::MalformedResponse(format!("Unexpected JSON: {}", e)))
}

#[async_trait]
impl BudgetAdvisor for PromptServiceClient {
    async fn suggest_budgets(
        &self,
        request: &BudgetSuggestionRequest,
    ) -> BudgetwiseResult<BudgetSuggestions> {
        let user = prompt::budget_suggestion_prompt(request);
        self.complete_json(prompt::BUDGET_ADVISOR_SYSTEM, &user).await
    }
}

#[async_trait]
impl SpendingAnalyst for PromptServiceClient {
    async fn summarize_spending(
        &self,
        request: &SpendingSummaryRequest,
    ) -> BudgetwiseResult<SpendingSummary> {
        let user = prompt::spending_summary_prompt(request);
        self.complete_json(prompt::SPENDING_ANALYST_SYSTEM, &user).await
    }
}
