//! Generation configuration
//!
//! Defaults match the completions model the review prompt was written for.
//! Values come from, in increasing priority: defaults, a TOML file, the
//! environment.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the model
pub const ENV_MODEL: &str = "CLAUSE_REVIEW_MODEL";

/// Generation configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// API key; never serialized
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the completions API
    pub base_url: String,
    /// Completions model
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion length limit
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Extra attempts after a retryable failure
    pub max_retries: u32,
    /// Delay before the first retry, doubled per attempt
    pub retry_backoff_ms: u64,
}

impl std::fmt::Debug for GenerateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            temperature: 0.4,
            max_tokens: 2048,
            timeout_secs: 60,
            max_retries: 1,
            retry_backoff_ms: 500,
        }
    }
}

impl GenerateConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// - `ConfigError::Toml` for malformed TOML
    /// - `ConfigError::Invalid` for out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, then apply the process environment
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - see [`GenerateConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&text)?.with_env_overrides(|key| std::env::var(key).ok());
        tracing::debug!("Loaded generation config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.model = model;
        }
        self
    }

    /// With API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// With model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With temperature
    #[inline]
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// With max tokens
    #[inline]
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_ms = backoff_ms;
        self
    }

    /// Whether an API key is present
    #[inline]
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Check value ranges
    ///
    /// # Errors
    /// - `ConfigError::Invalid` naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid("temperature", "must be within 0..=2"));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid("max_tokens", "must be positive"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be positive"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("base_url", "must not be empty"));
        }
        Ok(())
    }
}
