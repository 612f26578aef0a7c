//! Parser/normalizer for raw generator responses
//!
//! Turns untrusted text into an ordered sequence of [`ParameterDescriptor`]s.
//! All defaulting happens here so rendering never has to check optional
//! fields:
//! - invalid JSON fails the whole response
//! - entries with a missing or unknown discriminator are dropped
//! - missing fields of a known variant are replaced with empty defaults

use crate::error::{NormalizeIssue, ParseFailure};
use crate::model::{
    CheckboxItem, CheckboxesPayload, ControlPayload, ControlVariant, ParameterDescriptor,
    RadioButtonsPayload, RadioOption, SelectMenuPayload, SelectOption, TextInputPayload,
};
use serde_json::{Map, Value};

/// Keys that may carry the discriminator, in lookup order
pub const DISCRIMINATOR_KEYS: [&str; 2] = ["uiControl", "controlVariant"];

/// Parsed descriptors plus the issues recovered along the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    /// Descriptors in upstream order
    pub descriptors: Vec<ParameterDescriptor>,
    /// Recovered issues, in entry order
    pub issues: Vec<NormalizeIssue>,
}

impl ParsedResponse {
    /// Number of upstream entries dropped
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.issues.iter().filter(|i| i.drops_entry()).count()
    }
}

/// Parse raw response text into descriptors
///
/// # Errors
/// - `ParseFailureReason::MalformedJson` if `raw` is not valid JSON
/// - `ParseFailureReason::MissingParameters` if no parameter collection exists
pub fn parse(raw: &str) -> Result<Vec<ParameterDescriptor>, ParseFailure> {
    parse_with_report(raw).map(|parsed| parsed.descriptors)
}

/// Parse raw response text, keeping the recovered issues
///
/// # Errors
/// Same as [`parse`].
pub fn parse_with_report(raw: &str) -> Result<ParsedResponse, ParseFailure> {
    let root: Value =
        serde_json::from_str(raw).map_err(|e| ParseFailure::malformed_json(e.to_string()))?;

    let entries = locate_parameters(root)?;

    let mut parsed = ParsedResponse::default();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(descriptor) = normalize_entry(index, entry, &mut parsed.issues) {
            parsed.descriptors.push(descriptor);
        }
    }

    for issue in &parsed.issues {
        tracing::warn!("Recovered from malformed parameter: {}", issue);
    }
    tracing::debug!(
        "Parsed {} descriptors from {} entries ({} dropped)",
        parsed.descriptors.len(),
        entries.len(),
        parsed.dropped()
    );

    Ok(parsed)
}

/// Find the parameter collection in a decoded document
fn locate_parameters(root: Value) -> Result<Vec<Value>, ParseFailure> {
    match root {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut map) => {
            if let Some(parameters) = map.remove("parameters") {
                return match parameters {
                    Value::Array(entries) => Ok(entries),
                    single @ Value::Object(_) => Ok(vec![single]),
                    other => Err(ParseFailure::missing_parameters(format!(
                        "'parameters' is {}",
                        json_kind(&other)
                    ))),
                };
            }

            // A lone parameter without the wrapper
            if DISCRIMINATOR_KEYS.iter().any(|key| map.contains_key(*key)) {
                Ok(vec![Value::Object(map)])
            } else {
                Err(ParseFailure::missing_parameters("no 'parameters' key"))
            }
        }
        other => Err(ParseFailure::missing_parameters(format!(
            "top-level value is {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalize one entry, or drop it with an issue
fn normalize_entry(
    index: usize,
    entry: &Value,
    issues: &mut Vec<NormalizeIssue>,
) -> Option<ParameterDescriptor> {
    let Value::Object(entry) = entry else {
        issues.push(NormalizeIssue::NotAnObject { index });
        return None;
    };

    let tag = match DISCRIMINATOR_KEYS.iter().find_map(|key| entry.get(*key)) {
        None | Some(Value::Null) => {
            issues.push(NormalizeIssue::MissingVariant { index });
            return None;
        }
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => other.to_string(),
    };

    let Some(variant) = ControlVariant::from_tag(&tag) else {
        issues.push(NormalizeIssue::UnrecognizedVariant { index, tag });
        return None;
    };

    let mut fields = EntryFields {
        index,
        variant,
        issues,
    };

    let parameter_kind = fields.string(entry, "parameter");
    let parameter_description = fields.string(entry, "parameterDescription");

    // Payload sits under the canonical key, or under the tag as written
    let payload = entry
        .get(variant.as_tag())
        .or_else(|| entry.get(tag.as_str()))
        .filter(|v| !v.is_null());

    let payload = match variant {
        ControlVariant::TextInput => ControlPayload::TextInput(fields.text_input(payload)),
        ControlVariant::SelectMenu => ControlPayload::SelectMenu(fields.select_menu(payload)),
        ControlVariant::Checkboxes => ControlPayload::Checkboxes(fields.checkboxes(payload)),
        ControlVariant::RadioButtons => {
            ControlPayload::RadioButtons(fields.radio_buttons(payload, &parameter_kind))
        }
    };

    Some(ParameterDescriptor {
        parameter_kind,
        parameter_description,
        payload,
    })
}

/// Field reader for one entry, recording missing required fields
struct EntryFields<'a> {
    index: usize,
    variant: ControlVariant,
    issues: &'a mut Vec<NormalizeIssue>,
}

impl EntryFields<'_> {
    fn missing(&mut self, field: &'static str) {
        self.issues.push(NormalizeIssue::MissingField {
            index: self.index,
            variant: self.variant,
            field,
        });
    }

    /// Required string field; empty default when absent
    fn string(&mut self, obj: &Map<String, Value>, field: &'static str) -> String {
        match obj.get(field).and_then(scalar_string) {
            Some(s) => s,
            None => {
                self.missing(field);
                String::new()
            }
        }
    }

    /// Payload object for the variant, or `None` after recording the gap
    fn payload_object<'v>(&mut self, payload: Option<&'v Value>) -> Option<&'v Map<String, Value>> {
        match payload {
            Some(Value::Object(obj)) => Some(obj),
            _ => {
                self.missing(self.variant.as_tag());
                None
            }
        }
    }

    /// Required sequence field; a single object counts as one element
    fn sequence<'v>(&mut self, obj: &'v Map<String, Value>, field: &'static str) -> Vec<&'v Value> {
        match obj.get(field) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(single @ Value::Object(_)) => vec![single],
            _ => {
                self.missing(field);
                Vec::new()
            }
        }
    }

    fn text_input(&mut self, payload: Option<&Value>) -> TextInputPayload {
        let Some(obj) = self.payload_object(payload) else {
            return TextInputPayload::default();
        };

        TextInputPayload {
            id: self.string(obj, "id"),
            label: self.string(obj, "label"),
            value: self.string(obj, "value"),
            placeholder: self.string(obj, "placeholder"),
        }
    }

    fn select_menu(&mut self, payload: Option<&Value>) -> SelectMenuPayload {
        let Some(obj) = self.payload_object(payload) else {
            return SelectMenuPayload::default();
        };

        let options = self
            .sequence(obj, "options")
            .into_iter()
            .filter_map(select_option)
            .collect();

        SelectMenuPayload {
            id: self.string(obj, "id"),
            label: self.string(obj, "label"),
            options,
            selected: obj.get("selected").and_then(scalar_string).unwrap_or_default(),
        }
    }

    fn checkboxes(&mut self, payload: Option<&Value>) -> CheckboxesPayload {
        let items: Vec<&Value> = match payload {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(obj)) if obj.contains_key("items") => self.sequence(obj, "items"),
            Some(Value::Object(obj)) if obj.contains_key("options") => {
                self.sequence(obj, "options")
            }
            Some(single @ Value::Object(_)) => vec![single],
            _ => {
                self.missing(self.variant.as_tag());
                Vec::new()
            }
        };

        CheckboxesPayload {
            items: items
                .into_iter()
                .enumerate()
                .filter_map(|(pos, item)| checkbox_item(pos, item))
                .collect(),
        }
    }

    fn radio_buttons(&mut self, payload: Option<&Value>, parameter_kind: &str) -> RadioButtonsPayload {
        let (label, raw_options): (String, Vec<&Value>) = match payload {
            // Bare option list; the parameter kind stands in for the group label
            Some(Value::Array(items)) => (parameter_kind.to_string(), items.iter().collect()),
            Some(Value::Object(obj)) => (self.string(obj, "label"), self.sequence(obj, "options")),
            _ => {
                self.missing(self.variant.as_tag());
                (String::new(), Vec::new())
            }
        };

        let mut selected = None;
        let mut options: Vec<RadioOption> = Vec::with_capacity(raw_options.len());
        for (pos, raw) in raw_options.into_iter().enumerate() {
            if let Some((mut option, checked)) = radio_option(pos, raw) {
                // Selection is keyed by id, so ids must be unique in the group
                if options.iter().any(|o| o.id == option.id) {
                    option.id = format!("{}-{pos}", option.id);
                    while options.iter().any(|o| o.id == option.id) {
                        option.id.push('_');
                    }
                }
                if checked && selected.is_none() {
                    selected = Some(option.id.clone());
                }
                options.push(option);
            }
        }

        RadioButtonsPayload {
            label,
            options,
            selected,
        }
    }
}

/// Strings pass through; numbers and booleans are stringified
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// First non-empty scalar among `keys`
fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(scalar_string))
        .find(|s| !s.is_empty())
}

fn select_option(value: &Value) -> Option<SelectOption> {
    match value {
        Value::Object(obj) => {
            let value = first_string(obj, &["value", "label"]).unwrap_or_default();
            let label = first_string(obj, &["label", "value"]).unwrap_or_default();
            Some(SelectOption { value, label })
        }
        other => scalar_string(other).map(|s| SelectOption {
            value: s.clone(),
            label: s,
        }),
    }
}

fn checkbox_item(pos: usize, value: &Value) -> Option<CheckboxItem> {
    match value {
        Value::Object(obj) => Some(CheckboxItem {
            id: first_string(obj, &["id", "label"]).unwrap_or_else(|| format!("item-{pos}")),
            label: first_string(obj, &["label", "id"]).unwrap_or_default(),
            checked: flag(obj.get("checked")),
        }),
        other => scalar_string(other).map(|s| CheckboxItem {
            id: s.clone(),
            label: s,
            checked: false,
        }),
    }
}

fn radio_option(pos: usize, value: &Value) -> Option<(RadioOption, bool)> {
    match value {
        Value::Object(obj) => {
            let id = first_string(obj, &["id", "value", "label"])
                .unwrap_or_else(|| format!("option-{pos}"));
            let option = RadioOption {
                value: first_string(obj, &["value"]).unwrap_or_else(|| id.clone()),
                label: first_string(obj, &["label", "value"]).unwrap_or_else(|| id.clone()),
                id,
            };
            Some((option, flag(obj.get("checked"))))
        }
        other => scalar_string(other).map(|s| {
            let option = RadioOption {
                id: s.clone(),
                value: s.clone(),
                label: s,
            };
            (option, false)
        }),
    }
}
