//! Error types for clause controls
//!
//! Provides error handling for:
//! - Whole-response parse failures (rendered as a single error indicator)
//! - Per-entry normalization issues (recovered, reported)
//! - Control interactions
//! - Session lifecycle

use crate::dispatch::ControlKey;
use crate::model::ControlVariant;
use serde::Serialize;

/// Why a raw response could not be parsed at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParseFailureReason {
    /// Raw text is not structurally valid JSON
    MalformedJson,
    /// Valid JSON, but no parameter collection could be located
    MissingParameters,
}

/// Total parse failure of a raw response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason:?}: {detail}")]
pub struct ParseFailure {
    /// Failure classification
    pub reason: ParseFailureReason,
    /// Human-readable detail (decoder message or shape description)
    pub detail: String,
}

impl ParseFailure {
    /// Create malformed JSON failure
    pub fn malformed_json(detail: impl Into<String>) -> Self {
        Self {
            reason: ParseFailureReason::MalformedJson,
            detail: detail.into(),
        }
    }

    /// Create missing parameters failure
    pub fn missing_parameters(detail: impl Into<String>) -> Self {
        Self {
            reason: ParseFailureReason::MissingParameters,
            detail: detail.into(),
        }
    }
}

/// Recovered problem with one parameter entry
///
/// Issues never abort a parse; they are collected next to the descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeIssue {
    /// Entry is not a JSON object; dropped
    #[error("parameter #{index} is not an object")]
    NotAnObject {
        /// Position in the parameter array
        index: usize,
    },

    /// Entry has no discriminator; dropped
    #[error("parameter #{index} has no uiControl")]
    MissingVariant {
        /// Position in the parameter array
        index: usize,
    },

    /// Entry discriminator matches no known control; dropped
    #[error("parameter #{index} has unrecognized uiControl '{tag}'")]
    UnrecognizedVariant {
        /// Position in the parameter array
        index: usize,
        /// Discriminator as received
        tag: String,
    },

    /// Required field absent; empty default substituted
    #[error("parameter #{index} ({variant}) is missing '{field}'")]
    MissingField {
        /// Position in the parameter array
        index: usize,
        /// Control the entry declared
        variant: ControlVariant,
        /// Payload field name
        field: &'static str,
    },
}

impl NormalizeIssue {
    /// Whether the entry was dropped from the result
    #[inline]
    #[must_use]
    pub fn drops_entry(&self) -> bool {
        !matches!(self, Self::MissingField { .. })
    }
}

/// Errors applying an interaction to a control
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// Interaction kind does not apply to this control
    #[error("{interaction} does not apply to a {variant} control")]
    WrongVariant {
        /// Control that received it
        variant: ControlVariant,
        /// Interaction name
        interaction: &'static str,
    },

    /// Select value is not one of the options
    #[error("no option with value '{0}'")]
    UnknownOption(String),

    /// Checkbox id is not one of the items
    #[error("no checkbox with id '{0}'")]
    UnknownItem(String),

    /// Radio id is not one of the options
    #[error("no radio option with id '{0}'")]
    UnknownChoice(String),

    /// Key is outside the current result set
    #[error("no control at position {0}")]
    NoSuchControl(ControlKey),
}

/// Failure of the upstream generation call
///
/// The core only needs its message: no new descriptor set is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("upstream failure: {message}")]
pub struct UpstreamFailure {
    /// Message shown to the user
    pub message: String,
}

impl UpstreamFailure {
    /// Create upstream failure
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Session lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A submission is already awaiting its response
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// Ticket belongs to an older submission
    #[error("stale submission ticket (generation {ticket}, current {current})")]
    StaleSubmission {
        /// Generation the ticket was issued for
        ticket: u64,
        /// Latest generation
        current: u64,
    },

    /// Controls are inert while a submission is in flight
    #[error("controls are read-only while loading")]
    Busy,

    /// Nothing is rendered that could take the interaction
    #[error("no controls are rendered")]
    NothingRendered,

    /// Interaction rejected by the control
    #[error("interaction failed: {0}")]
    Interaction(#[from] InteractionError),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_display() {
        let err = ParseFailure::malformed_json("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "MalformedJson: expected value at line 1 column 1"
        );
    }

    #[test]
    fn issue_display() {
        let issue = NormalizeIssue::UnrecognizedVariant {
            index: 2,
            tag: "slider".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "parameter #2 has unrecognized uiControl 'slider'"
        );

        let issue = NormalizeIssue::MissingField {
            index: 0,
            variant: ControlVariant::SelectMenu,
            field: "options",
        };
        assert_eq!(
            issue.to_string(),
            "parameter #0 (selectMenu) is missing 'options'"
        );
    }

    #[test]
    fn issue_drops_entry() {
        assert!(NormalizeIssue::MissingVariant { index: 0 }.drops_entry());
        assert!(!NormalizeIssue::MissingField {
            index: 0,
            variant: ControlVariant::TextInput,
            field: "id",
        }
        .drops_entry());
    }

    #[test]
    fn error_conversions() {
        let err: SessionError = InteractionError::UnknownItem("c1".to_string()).into();
        assert!(matches!(err, SessionError::Interaction(_)));
        assert_eq!(err.to_string(), "interaction failed: no checkbox with id 'c1'");
    }
}
