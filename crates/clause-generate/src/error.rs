//! Error types for clause generation
//!
//! Provides error handling for:
//! - Configuration loading (env, TOML)
//! - Request validation (API key, clause)
//! - Upstream calls (transport, HTTP status, empty completions)

use std::path::PathBuf;

/// Message returned when no API key is configured
pub const MISSING_KEY_MESSAGE: &str =
    "OpenAI API key not configured, please follow instructions in README.md";

/// Message returned for an empty clause
pub const EMPTY_CLAUSE_MESSAGE: &str = "Please enter a valid clause";

/// Message returned for failures with no better description
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during your request.";

/// Errors loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid value for {field}: {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create invalid value error
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Errors producing a completion for a clause
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// No API key configured
    #[error("API key not configured")]
    MissingApiKey,

    /// Clause is empty or whitespace
    #[error("empty clause")]
    EmptyClause,

    /// Request could not be sent or the body could not be read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned {status}: {message}")]
    Upstream {
        /// HTTP status from the service
        status: u16,
        /// Message shown to the user
        message: String,
        /// Upstream error body, passed through to callers
        body: Option<serde_json::Value>,
    },

    /// Upstream answered without any completion text
    #[error("completion contained no choices")]
    EmptyCompletion,

    /// Configuration problem
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GenerateError {
    /// Create upstream error
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// HTTP status to report to the page
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyClause => 400,
            Self::Upstream { status, .. } => *status,
            Self::MissingApiKey
            | Self::Transport(_)
            | Self::EmptyCompletion
            | Self::Config(_) => 500,
        }
    }

    /// Message safe to show to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => MISSING_KEY_MESSAGE.to_string(),
            Self::EmptyClause => EMPTY_CLAUSE_MESSAGE.to_string(),
            Self::Upstream { message, .. } => message.clone(),
            Self::Transport(_) | Self::EmptyCompletion | Self::Config(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// Whether retrying the same request may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for generation
pub type GenerateResult<T> = Result<T, GenerateError>;
