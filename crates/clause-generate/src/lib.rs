//! Clause Generate
//!
//! Asks a completions service for the parameter controls worth adjusting in
//! a legal clause. The returned text is untrusted; render it with
//! `clause-controls`.
//!
//! # Components
//!
//! - [`GenerateConfig`]: model, endpoint and credentials (env + TOML)
//! - [`build_prompt`]: review prompt for one clause
//! - [`CompletionBackend`]: upstream seam, [`OpenAiCompletions`] over HTTP
//! - [`ClauseGenerator`]: validation, prompt, retries
//!
//! # Example
//!
//! ```rust,no_run
//! use clause_generate::{ClauseGenerator, GenerateConfig};
//!
//! # async fn run() -> Result<(), clause_generate::GenerateError> {
//! let generator = ClauseGenerator::from_config(GenerateConfig::from_env())?;
//! let raw = generator.generate("the tenant shall pay rent monthly").await?;
//! println!("{raw}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backend;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompt;

pub use backend::{CompletionBackend, CompletionRequest, OpenAiCompletions};
pub use config::GenerateConfig;
pub use error::{ConfigError, GenerateError, GenerateResult};
pub use generator::ClauseGenerator;
pub use prompt::build_prompt;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
