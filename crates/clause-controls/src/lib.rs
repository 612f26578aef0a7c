//! Clause Controls
//!
//! Schema-driven rendering of the parameter controls a text generator
//! recommends for a legal clause.
//!
//! # Core Concepts
//!
//! - [`ParameterDescriptor`]: one normalized parameter entry
//! - [`parse`]: raw, untrusted text into descriptors (tolerant of bad entries)
//! - [`Control`]: one renderer per variant, owning its local state
//! - [`ResultSet`]: descriptors plus their position-keyed state table
//! - [`ReviewSession`]: submission lifecycle and atomic result replacement
//!
//! # Flow
//!
//! ```text
//! raw text → parse → [ParameterDescriptor] → ResultSet → [RenderedControl]
//!                ↓                               ↑
//!          ParseFailure → ErrorIndicator     Interaction
//! ```
//!
//! # Example
//!
//! ```rust
//! use clause_controls::{render_response, RenderOutcome};
//!
//! let raw = r#"{"parameters":[{"uiControl":"textInput","parameterDescription":"Notice period",
//!     "textInput":{"id":"notice","label":"Days","value":"30","placeholder":"days"}}]}"#;
//!
//! match render_response(raw) {
//!     RenderOutcome::Controls { controls } => assert_eq!(controls.len(), 1),
//!     RenderOutcome::Error { error } => panic!("{}", error.message),
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod controls;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod parser;
pub mod session;

// Re-exports for convenience
pub use controls::{
    Control, ControlState, ControlView, Interaction, RadioChoices, NO_OPTIONS_PLACEHOLDER,
};
pub use dispatch::{
    render_all, render_response, ControlKey, ErrorIndicator, RenderOutcome, RenderedControl,
    ResultSet, PARSE_ERROR_MESSAGE,
};
pub use error::{
    InteractionError, NormalizeIssue, ParseFailure, ParseFailureReason, SessionError,
    UpstreamFailure,
};
pub use model::{ControlPayload, ControlVariant, ParameterDescriptor};
pub use parser::{parse, parse_with_report, ParsedResponse};
pub use session::{ReviewSession, SessionView, SubmissionTicket};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with clause controls
    pub use crate::controls::{Control, ControlView, Interaction};
    pub use crate::dispatch::{render_response, ControlKey, RenderOutcome, ResultSet};
    pub use crate::error::{ParseFailure, SessionError, UpstreamFailure};
    pub use crate::model::{ControlVariant, ParameterDescriptor};
    pub use crate::session::ReviewSession;
}
