//! Clause Review
//!
//! Page shell around `clause-controls`: an HTTP API for browser pages and a
//! terminal front end that renders controls as text.
//!
//! - [`server`]: `POST /api/generate` and `POST /api/render`
//! - [`review`]: submission driver and interactive commands
//! - [`text`]: plain-text control rendering
//! - [`config`]: TOML + environment configuration
//! - [`telemetry`]: tracing subscriber setup

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod review;
pub mod server;
pub mod telemetry;
pub mod text;

pub use config::{AppConfig, ServerConfig};
pub use review::{Command, ReviewError};
