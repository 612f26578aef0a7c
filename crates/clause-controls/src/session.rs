//! Review session
//!
//! Page state around the dispatcher:
//! - the loading flag, set for exactly one submission at a time
//! - the displayed result set, swapped atomically per response
//! - the submitted text and raw response of the last success
//!
//! While loading, the previous set stays displayed but rejects interaction.

use crate::controls::Interaction;
use crate::dispatch::{ControlKey, ErrorIndicator, RenderOutcome, ResultSet};
use crate::error::{ParseFailure, SessionError, SessionResult, UpstreamFailure};
use serde::Serialize;

/// Proof of the one in-flight submission
///
/// Consumed by [`ReviewSession::complete_submission`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a submission stays in flight until its ticket is completed"]
pub struct SubmissionTicket {
    generation: u64,
}

impl SubmissionTicket {
    /// Session generation this ticket was issued for
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the page currently shows below the form
#[derive(Debug, Clone, PartialEq, Eq)]
enum Display {
    Nothing,
    Controls(ResultSet),
    ParseError(ParseFailure),
}

/// Snapshot of the page for the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Whether a submission is awaiting its response
    pub loading: bool,
    /// Clause text of the last successful submission
    pub submitted_text: Option<String>,
    /// Raw response of the last successful submission
    pub raw_response: Option<String>,
    /// Message of the last upstream failure, until the next submission
    pub last_error: Option<String>,
    /// Rendered result; `None` before the first response
    pub outcome: Option<RenderOutcome>,
}

/// Single-owner page state of one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    generation: u64,
    loading: bool,
    pending_clause: Option<String>,
    display: Display,
    submitted_text: Option<String>,
    raw_response: Option<String>,
    last_error: Option<String>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    /// Create empty session
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            loading: false,
            pending_clause: None,
            display: Display::Nothing,
            submitted_text: None,
            raw_response: None,
            last_error: None,
        }
    }

    /// Whether a submission is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Currently displayed result set, if any
    #[must_use]
    pub fn result_set(&self) -> Option<&ResultSet> {
        match &self.display {
            Display::Controls(set) => Some(set),
            _ => None,
        }
    }

    /// Parse failure of the last response, if it failed
    #[must_use]
    pub fn parse_failure(&self) -> Option<&ParseFailure> {
        match &self.display {
            Display::ParseError(failure) => Some(failure),
            _ => None,
        }
    }

    /// Start a submission
    ///
    /// # Errors
    /// - `SessionError::SubmissionInFlight` while another submission is loading
    pub fn begin_submission(&mut self, clause: impl Into<String>) -> SessionResult<SubmissionTicket> {
        if self.loading {
            tracing::debug!("Rejected submission: generation {} in flight", self.generation);
            return Err(SessionError::SubmissionInFlight);
        }

        self.generation += 1;
        self.loading = true;
        self.pending_clause = Some(clause.into());
        self.last_error = None;
        tracing::info!("Submission {} started", self.generation);

        Ok(SubmissionTicket {
            generation: self.generation,
        })
    }

    /// Finish a submission with the upstream response
    ///
    /// On success the displayed set is replaced as a whole, including every
    /// control's state. On upstream failure the display is left untouched.
    ///
    /// # Errors
    /// - `SessionError::StaleSubmission` if the ticket is not the in-flight one
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        response: Result<String, UpstreamFailure>,
    ) -> SessionResult<()> {
        if !self.loading || ticket.generation != self.generation {
            return Err(SessionError::StaleSubmission {
                ticket: ticket.generation,
                current: self.generation,
            });
        }

        self.loading = false;
        let clause = self.pending_clause.take();

        match response {
            Ok(raw) => {
                let display = match ResultSet::parse(&raw) {
                    Ok(set) => {
                        tracing::info!(
                            "Submission {} rendered {} controls",
                            self.generation,
                            set.len()
                        );
                        Display::Controls(set)
                    }
                    Err(failure) => {
                        tracing::warn!("Submission {} unparseable: {}", self.generation, failure);
                        Display::ParseError(failure)
                    }
                };
                self.display = display;
                self.submitted_text = clause;
                self.raw_response = Some(raw);
            }
            Err(failure) => {
                tracing::error!("Submission {} failed: {}", self.generation, failure);
                self.last_error = Some(failure.message);
            }
        }

        Ok(())
    }

    /// Apply an interaction to a displayed control
    ///
    /// # Errors
    /// - `SessionError::Busy` while a submission is loading
    /// - `SessionError::NothingRendered` if no result set is displayed
    /// - `SessionError::Interaction` if the control rejects it
    pub fn interact(&mut self, key: ControlKey, interaction: Interaction) -> SessionResult<()> {
        if self.loading {
            return Err(SessionError::Busy);
        }

        match &mut self.display {
            Display::Controls(set) => Ok(set.interact(key, interaction)?),
            _ => Err(SessionError::NothingRendered),
        }
    }

    /// Render the page state
    #[must_use]
    pub fn view(&self) -> SessionView {
        let outcome = match &self.display {
            Display::Nothing => None,
            Display::Controls(set) => Some(RenderOutcome::Controls {
                controls: set.render(),
            }),
            Display::ParseError(_) => Some(RenderOutcome::Error {
                error: ErrorIndicator::default(),
            }),
        };

        SessionView {
            loading: self.loading,
            submitted_text: self.submitted_text.clone(),
            raw_response: self.raw_response.clone(),
            last_error: self.last_error.clone(),
            outcome,
        }
    }
}
