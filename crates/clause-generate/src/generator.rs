//! Clause generator
//!
//! Validates the clause, builds the review prompt and asks the backend for
//! a completion, retrying transient failures.

use crate::backend::{CompletionBackend, CompletionRequest, OpenAiCompletions};
use crate::config::GenerateConfig;
use crate::error::{GenerateError, GenerateResult};
use crate::prompt::build_prompt;
use std::sync::Arc;
use std::time::Duration;

/// Produces raw parameter recommendations for clauses
#[derive(Clone)]
pub struct ClauseGenerator {
    backend: Arc<dyn CompletionBackend>,
    config: GenerateConfig,
}

impl std::fmt::Debug for ClauseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClauseGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ClauseGenerator {
    /// Create new generator over a backend
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>, config: GenerateConfig) -> Self {
        Self { backend, config }
    }

    /// Create generator talking to the configured HTTP endpoint
    ///
    /// # Errors
    /// - `GenerateError::Config` for invalid settings
    /// - `GenerateError::Transport` if the HTTP client cannot be built
    pub fn from_config(config: GenerateConfig) -> GenerateResult<Self> {
        config.validate()?;
        let backend = OpenAiCompletions::new(&config)?;
        tracing::info!("Generator using {} ({})", backend.endpoint(), config.model);
        Ok(Self::new(Arc::new(backend), config))
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Completion request for a clause
    #[must_use]
    pub fn request_for(&self, clause: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(clause),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Generate the raw recommendation text for a clause
    ///
    /// The key check comes before clause validation.
    ///
    /// # Errors
    /// - `GenerateError::MissingApiKey` if the backend has no credentials
    /// - `GenerateError::EmptyClause` for an empty or whitespace clause
    /// - backend errors once retries are exhausted
    pub async fn generate(&self, clause: &str) -> GenerateResult<String> {
        if !self.backend.is_configured() {
            return Err(GenerateError::MissingApiKey);
        }
        if clause.trim().is_empty() {
            return Err(GenerateError::EmptyClause);
        }

        let request = self.request_for(clause);
        tracing::info!("Generating parameters for clause ({} chars)", clause.len());

        let mut attempt = 0;
        loop {
            match self.backend.complete(&request).await {
                Ok(text) => {
                    tracing::debug!("Completion received ({} chars)", text.len());
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.config.retry_backoff_ms.saturating_mul(1_u64 << attempt.min(16));
                    attempt += 1;
                    tracing::warn!(
                        "Completion attempt {} failed: {}; retrying in {}ms",
                        attempt,
                        e,
                        delay
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    tracing::error!("Completion failed: {}", e);
                    return Err(e);
                }
            }
        }
    }
}
