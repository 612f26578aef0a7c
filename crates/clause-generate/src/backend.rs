//! Completion backends
//!
//! [`CompletionBackend`] is the seam between the generator and the upstream
//! text service. [`OpenAiCompletions`] talks to an OpenAI-style
//! `/completions` endpoint over HTTP.

use crate::config::GenerateConfig;
use crate::error::{GenerateError, GenerateResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Model name
    pub model: String,
    /// Full prompt text
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion length limit
    pub max_tokens: u32,
}

/// Produces completion text for a prompt
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Whether the backend has the credentials it needs
    fn is_configured(&self) -> bool;

    /// Complete the request and return the first choice's text
    ///
    /// # Errors
    /// - `GenerateError::MissingApiKey` if not configured
    /// - `GenerateError::Transport` / `Upstream` on call failure
    /// - `GenerateError::EmptyCompletion` if no choice came back
    async fn complete(&self, request: &CompletionRequest) -> GenerateResult<String>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// HTTP client for an OpenAI-style completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiCompletions {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiCompletions {
    /// Create new client from configuration
    ///
    /// A missing key is reported per request, not here.
    ///
    /// # Errors
    /// - `GenerateError::Transport` if the HTTP client cannot be built
    pub fn new(config: &GenerateConfig) -> GenerateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    /// Completions endpoint URL
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletions {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> GenerateResult<String> {
        let Some(api_key) = &self.api_key else {
            return Err(GenerateError::MissingApiKey);
        };

        tracing::debug!("POST {} (model {})", self.endpoint, request.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.pointer("/error/message"))
                .and_then(Value::as_str)
                .or_else(|| status.canonical_reason())
                .unwrap_or("upstream error")
                .to_string();
            tracing::error!("Completion request failed: {} {}", status.as_u16(), message);
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or(GenerateError::EmptyCompletion)
    }
}
