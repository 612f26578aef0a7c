//! Descriptor model
//!
//! Typed representation of one recommended parameter and its control:
//! - [`ParameterDescriptor`]: kind, description and payload of one entry
//! - [`ControlPayload`]: closed set of the four control payloads
//! - [`ControlVariant`]: the discriminator, derived from the payload

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The four supported control kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlVariant {
    /// Single-line text field
    TextInput,
    /// Drop-down with one selected value
    SelectMenu,
    /// Group of independent checkboxes
    Checkboxes,
    /// Group of mutually exclusive radio buttons
    RadioButtons,
}

impl ControlVariant {
    /// All variants, in wire order
    pub const ALL: [ControlVariant; 4] = [
        ControlVariant::TextInput,
        ControlVariant::SelectMenu,
        ControlVariant::Checkboxes,
        ControlVariant::RadioButtons,
    ];

    /// Canonical wire tag (also the payload key on the wire)
    #[inline]
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            ControlVariant::TextInput => "textInput",
            ControlVariant::SelectMenu => "selectMenu",
            ControlVariant::Checkboxes => "checkboxes",
            ControlVariant::RadioButtons => "radioButtons",
        }
    }

    /// Resolve a discriminator tag
    ///
    /// Case, whitespace, `-` and `_` are ignored. Besides the canonical tags
    /// the short aliases emitted by generators are accepted
    /// (`text`, `select`, `dropdown`, `checkbox`, `radio`, `radios`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let folded: String = tag
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "textinput" | "text" | "textfield" => Some(ControlVariant::TextInput),
            "selectmenu" | "select" | "dropdown" => Some(ControlVariant::SelectMenu),
            "checkboxes" | "checkbox" => Some(ControlVariant::Checkboxes),
            "radiobuttons" | "radiobutton" | "radios" | "radio" => {
                Some(ControlVariant::RadioButtons)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ControlVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Error for [`ControlVariant::from_str`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized control variant: '{0}'")]
pub struct UnknownVariant(pub String);

impl FromStr for ControlVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Payload of a text input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextInputPayload {
    /// Element id
    pub id: String,
    /// Visible label
    pub label: String,
    /// Initial value
    pub value: String,
    /// Placeholder shown while empty
    pub placeholder: String,
}

/// One entry of a select menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Visible label
    pub label: String,
}

/// Payload of a select menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectMenuPayload {
    /// Element id
    pub id: String,
    /// Visible label
    pub label: String,
    /// Options in upstream order
    pub options: Vec<SelectOption>,
    /// Initially selected value; empty when the upstream gave none
    pub selected: String,
}

/// One checkbox of a checkbox group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckboxItem {
    /// Element id, also the state key
    pub id: String,
    /// Visible label
    pub label: String,
    /// Initial checked flag
    pub checked: bool,
}

/// Payload of a checkbox group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckboxesPayload {
    /// Items in upstream order
    pub items: Vec<CheckboxItem>,
}

/// One option of a radio group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadioOption {
    /// Element id, also the selection key
    pub id: String,
    /// Submitted value
    pub value: String,
    /// Visible label
    pub label: String,
}

/// Payload of a radio group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadioButtonsPayload {
    /// Group label
    pub label: String,
    /// Options in upstream order; empty renders a placeholder
    pub options: Vec<RadioOption>,
    /// Option id marked as checked upstream, if any
    pub selected: Option<String>,
}

/// Variant payload of a descriptor
///
/// Exactly one payload per descriptor; the variant tag is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "uiControl", content = "payload", rename_all = "camelCase")]
pub enum ControlPayload {
    /// Text input payload
    TextInput(TextInputPayload),
    /// Select menu payload
    SelectMenu(SelectMenuPayload),
    /// Checkbox group payload
    Checkboxes(CheckboxesPayload),
    /// Radio group payload
    RadioButtons(RadioButtonsPayload),
}

impl ControlPayload {
    /// Variant of this payload
    #[inline]
    #[must_use]
    pub fn variant(&self) -> ControlVariant {
        match self {
            ControlPayload::TextInput(_) => ControlVariant::TextInput,
            ControlPayload::SelectMenu(_) => ControlVariant::SelectMenu,
            ControlPayload::Checkboxes(_) => ControlVariant::Checkboxes,
            ControlPayload::RadioButtons(_) => ControlVariant::RadioButtons,
        }
    }
}

/// One parsed, normalized parameter entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Free-text classification label (wire key `parameter`)
    pub parameter_kind: String,
    /// Guidance rendered above the control
    pub parameter_description: String,
    /// Control payload
    #[serde(flatten)]
    pub payload: ControlPayload,
}

impl ParameterDescriptor {
    /// Create descriptor from its parts
    #[inline]
    #[must_use]
    pub fn new(
        parameter_kind: impl Into<String>,
        parameter_description: impl Into<String>,
        payload: ControlPayload,
    ) -> Self {
        Self {
            parameter_kind: parameter_kind.into(),
            parameter_description: parameter_description.into(),
            payload,
        }
    }

    /// Discriminator of this descriptor
    #[inline]
    #[must_use]
    pub fn variant(&self) -> ControlVariant {
        self.payload.variant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_tag_roundtrip() {
        for variant in ControlVariant::ALL {
            assert_eq!(ControlVariant::from_tag(variant.as_tag()), Some(variant));
        }
    }

    #[test]
    fn variant_aliases() {
        assert_eq!(ControlVariant::from_tag("Radios"), Some(ControlVariant::RadioButtons));
        assert_eq!(ControlVariant::from_tag("select menu"), Some(ControlVariant::SelectMenu));
        assert_eq!(ControlVariant::from_tag("text_input"), Some(ControlVariant::TextInput));
        assert_eq!(ControlVariant::from_tag("CHECKBOX"), Some(ControlVariant::Checkboxes));
        assert_eq!(ControlVariant::from_tag("slider"), None);
        assert_eq!(ControlVariant::from_tag(""), None);
    }

    #[test]
    fn variant_from_str_error() {
        let err = "datePicker".parse::<ControlVariant>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized control variant: 'datePicker'");
    }

    #[test]
    fn descriptor_variant_follows_payload() {
        let descriptor = ParameterDescriptor::new(
            "term",
            "how long",
            ControlPayload::Checkboxes(CheckboxesPayload::default()),
        );
        assert_eq!(descriptor.variant(), ControlVariant::Checkboxes);
    }

    #[test]
    fn descriptor_serializes_with_wire_tag() {
        let descriptor = ParameterDescriptor::new(
            "p",
            "d",
            ControlPayload::TextInput(TextInputPayload::default()),
        );
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["uiControl"], "textInput");
        assert_eq!(json["parameterDescription"], "d");
    }
}
