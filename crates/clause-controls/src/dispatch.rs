//! Render dispatcher
//!
//! Maps descriptors to control renderers and owns the position-keyed state
//! table of one result set.

use crate::controls::{Control, ControlState, ControlView, Interaction};
use crate::error::{InteractionError, ParseFailure};
use crate::model::{ControlVariant, ParameterDescriptor};
use crate::parser;
use serde::Serialize;
use std::fmt;

/// Message of the single indicator shown for an unparseable response
pub const PARSE_ERROR_MESSAGE: &str = "Unable to parse result.";

/// Position of a control within the current result set
///
/// Only meaningful for the set it was issued by; a new submission replaces
/// the set and reuses positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ControlKey(pub usize);

impl ControlKey {
    /// Position in the descriptor sequence
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.0
    }

    /// Radio group name scoped to this control
    #[inline]
    #[must_use]
    pub fn group_name(&self) -> String {
        format!("radio-group-{}", self.0)
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rendered control with its surrounding text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedControl {
    /// Stable identity within the result set
    pub key: ControlKey,
    /// Control variant
    pub variant: ControlVariant,
    /// Parameter classification label
    pub parameter: String,
    /// Guidance rendered above the control
    pub description: String,
    /// Control attributes and current state
    pub view: ControlView,
}

/// The one user-visible indicator of a failed parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorIndicator {
    /// Message shown to the user
    pub message: String,
}

impl Default for ErrorIndicator {
    fn default() -> Self {
        Self {
            message: PARSE_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Result of rendering a raw response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RenderOutcome {
    /// Zero or more controls, in upstream order
    Controls { controls: Vec<RenderedControl> },
    /// Parse failed; nothing else is rendered
    Error { error: ErrorIndicator },
}

impl RenderOutcome {
    /// Rendered controls (empty on error)
    #[must_use]
    pub fn controls(&self) -> &[RenderedControl] {
        match self {
            Self::Controls { controls } => controls,
            Self::Error { .. } => &[],
        }
    }

    /// Error indicator, if the parse failed
    #[must_use]
    pub fn error(&self) -> Option<&ErrorIndicator> {
        match self {
            Self::Controls { .. } => None,
            Self::Error { error } => Some(error),
        }
    }
}

/// Render descriptors with their initial state
#[must_use]
pub fn render_all(descriptors: &[ParameterDescriptor]) -> Vec<RenderedControl> {
    ResultSet::new(descriptors.to_vec()).render()
}

/// Parse and render a raw response
///
/// A failed parse yields exactly one error indicator and no controls.
#[must_use]
pub fn render_response(raw: &str) -> RenderOutcome {
    match parser::parse(raw) {
        Ok(descriptors) => RenderOutcome::Controls {
            controls: render_all(&descriptors),
        },
        Err(failure) => failure_outcome(&failure),
    }
}

fn failure_outcome(failure: &ParseFailure) -> RenderOutcome {
    tracing::warn!("Rendering parse error indicator: {}", failure);
    RenderOutcome::Error {
        error: ErrorIndicator::default(),
    }
}

/// One parsed descriptor set plus its control state table
///
/// The table is indexed by [`ControlKey`]; dropping the set drops every
/// control's state with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    descriptors: Vec<ParameterDescriptor>,
    controls: Vec<ControlState>,
}

impl ResultSet {
    /// Instantiate one control per descriptor
    #[must_use]
    pub fn new(descriptors: Vec<ParameterDescriptor>) -> Self {
        let controls = descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| {
                ControlState::instantiate(&descriptor.payload, ControlKey(position).group_name())
            })
            .collect();

        Self {
            descriptors,
            controls,
        }
    }

    /// Parse a raw response into a fresh set
    ///
    /// # Errors
    /// Propagates the parser's [`ParseFailure`].
    pub fn parse(raw: &str) -> Result<Self, ParseFailure> {
        parser::parse(raw).map(Self::new)
    }

    /// Number of controls
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the set has no controls
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Descriptors in upstream order
    #[inline]
    #[must_use]
    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.descriptors
    }

    /// Control at a key
    #[inline]
    #[must_use]
    pub fn control(&self, key: ControlKey) -> Option<&ControlState> {
        self.controls.get(key.0)
    }

    /// Render every control with its current state
    #[must_use]
    pub fn render(&self) -> Vec<RenderedControl> {
        self.descriptors
            .iter()
            .zip(&self.controls)
            .enumerate()
            .map(|(position, (descriptor, control))| RenderedControl {
                key: ControlKey(position),
                variant: control.variant(),
                parameter: descriptor.parameter_kind.clone(),
                description: descriptor.parameter_description.clone(),
                view: control.render(),
            })
            .collect()
    }

    /// Route an interaction to one control
    ///
    /// # Errors
    /// - `InteractionError::NoSuchControl` if `key` is outside the set
    /// - whatever the addressed control rejects
    pub fn interact(
        &mut self,
        key: ControlKey,
        interaction: Interaction,
    ) -> Result<(), InteractionError> {
        let control = self
            .controls
            .get_mut(key.0)
            .ok_or(InteractionError::NoSuchControl(key))?;

        tracing::debug!("Applying {} to control {}", interaction.name(), key);
        control.apply(interaction)
    }
}
