//! Application configuration
//!
//! One TOML file with a `[server]` and a `[generate]` table; both optional.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [generate]
//! model = "gpt-3.5-turbo-instruct"
//! max_tokens = 2048
//! ```

use clause_generate::{ConfigError, GenerateConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Largest accepted request body in bytes
    pub body_limit: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            body_limit: 64 * 1024,
        }
    }
}

/// Whole application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server
    pub server: ServerConfig,
    /// Completion service
    pub generate: GenerateConfig,
}

impl AppConfig {
    /// Defaults plus environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::default(),
            generate: GenerateConfig::from_env(),
        }
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// - `ConfigError::Toml` for malformed TOML
    /// - `ConfigError::Invalid` for out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.generate.validate()?;
        if config.server.body_limit == 0 {
            return Err(ConfigError::invalid("server.body_limit", "must be positive"));
        }
        Ok(config)
    }

    /// Load from an optional file, then apply the environment
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - see [`AppConfig::from_toml_str`]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::from_env());
        };

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let mut config = Self::from_toml_str(&text)?;
        config.generate = config
            .generate
            .with_env_overrides(|key| std::env::var(key).ok());
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// With bind address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.server.bind = bind;
        self
    }
}
