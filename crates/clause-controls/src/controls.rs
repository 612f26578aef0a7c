//! Control renderers
//!
//! One renderer per control variant. Each owns its payload (immutable) and
//! its local interaction state (mutable); nothing is shared between controls.
//!
//! | Control | State |
//! |---|---|
//! | [`TextInputControl`] | current text |
//! | [`SelectMenuControl`] | selected option value |
//! | [`CheckboxesControl`] | item id -> checked |
//! | [`RadioButtonsControl`] | selected option id |

use crate::error::InteractionError;
use crate::model::{
    CheckboxesPayload, ControlPayload, ControlVariant, RadioButtonsPayload, SelectMenuPayload,
    TextInputPayload,
};
use serde::Serialize;
use std::collections::HashMap;

/// Placeholder rendered for a radio group without options
pub const NO_OPTIONS_PLACEHOLDER: &str = "No options available";

/// User interaction with a rendered control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Replace the text of a text input
    Edit(String),
    /// Select a menu option by value
    Select(String),
    /// Flip one checkbox by item id
    Toggle(String),
    /// Set one checkbox by item id
    SetChecked {
        /// Checkbox item id
        id: String,
        /// New checked flag
        checked: bool,
    },
    /// Choose a radio option by id
    Choose(String),
}

impl Interaction {
    /// Short name for diagnostics
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Edit(_) => "edit",
            Interaction::Select(_) => "select",
            Interaction::Toggle(_) => "toggle",
            Interaction::SetChecked { .. } => "set-checked",
            Interaction::Choose(_) => "choose",
        }
    }
}

/// Shared capability of every control renderer
pub trait Control {
    /// Variant this control renders
    fn variant(&self) -> ControlVariant;

    /// Render payload and current state
    fn render(&self) -> ControlView;

    /// Apply a user interaction to the local state
    ///
    /// # Errors
    /// The state is left untouched when the interaction is rejected.
    fn apply(&mut self, interaction: Interaction) -> Result<(), InteractionError>;
}

fn wrong_variant(variant: ControlVariant, interaction: &Interaction) -> InteractionError {
    InteractionError::WrongVariant {
        variant,
        interaction: interaction.name(),
    }
}

/// Rendered view of one select option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOptionView {
    /// Option value
    pub value: String,
    /// Option label
    pub label: String,
    /// Whether this option is the current selection
    pub selected: bool,
}

/// Rendered view of one checkbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxView {
    /// Element id
    pub id: String,
    /// Item label
    pub label: String,
    /// Current checked flag
    pub checked: bool,
}

/// Rendered view of one radio option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioOptionView {
    /// Element id
    pub id: String,
    /// Option value
    pub value: String,
    /// Option label
    pub label: String,
    /// Whether this option is the chosen one
    pub selected: bool,
}

/// Options of a rendered radio group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum RadioChoices {
    /// At least one option
    Options(Vec<RadioOptionView>),
    /// No options; message shown instead
    Placeholder(String),
}

/// Attribute surface of a rendered control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "uiControl", rename_all = "camelCase")]
pub enum ControlView {
    /// Text input
    #[serde(rename_all = "camelCase")]
    TextInput {
        /// Element id
        id: String,
        /// Field label
        label: String,
        /// Current text
        value: String,
        /// Hint shown while empty
        placeholder: String,
    },
    /// Select menu
    #[serde(rename_all = "camelCase")]
    SelectMenu {
        /// Element id
        id: String,
        /// Field label
        label: String,
        /// Options in payload order
        options: Vec<SelectOptionView>,
    },
    /// Checkbox group
    #[serde(rename_all = "camelCase")]
    Checkboxes {
        /// Items in payload order
        items: Vec<CheckboxView>,
    },
    /// Radio group
    #[serde(rename_all = "camelCase")]
    RadioButtons {
        /// Group label
        label: String,
        /// Exclusivity group name
        group: String,
        /// Options, or the empty-group message
        choices: RadioChoices,
    },
}

/// Text input with its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputControl {
    payload: TextInputPayload,
    value: String,
}

impl TextInputControl {
    /// Create control; state starts at the payload value
    #[inline]
    #[must_use]
    pub fn new(payload: TextInputPayload) -> Self {
        let value = payload.value.clone();
        Self { payload, value }
    }

    /// Current text
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Control for TextInputControl {
    fn variant(&self) -> ControlVariant {
        ControlVariant::TextInput
    }

    fn render(&self) -> ControlView {
        ControlView::TextInput {
            id: self.payload.id.clone(),
            label: self.payload.label.clone(),
            value: self.value.clone(),
            placeholder: self.payload.placeholder.clone(),
        }
    }

    fn apply(&mut self, interaction: Interaction) -> Result<(), InteractionError> {
        match interaction {
            Interaction::Edit(text) => {
                self.value = text;
                Ok(())
            }
            other => Err(wrong_variant(self.variant(), &other)),
        }
    }
}

/// Select menu with its current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMenuControl {
    payload: SelectMenuPayload,
    selected: Option<String>,
}

impl SelectMenuControl {
    /// Create control
    ///
    /// Starts at `selected` when it names an option, otherwise at the first
    /// option. No options means no selection.
    #[must_use]
    pub fn new(payload: SelectMenuPayload) -> Self {
        let selected = payload
            .options
            .iter()
            .find(|o| !payload.selected.is_empty() && o.value == payload.selected)
            .or_else(|| payload.options.first())
            .map(|o| o.value.clone());
        Self { payload, selected }
    }

    /// Currently selected value
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

impl Control for SelectMenuControl {
    fn variant(&self) -> ControlVariant {
        ControlVariant::SelectMenu
    }

    fn render(&self) -> ControlView {
        let options = self
            .payload
            .options
            .iter()
            .map(|o| SelectOptionView {
                value: o.value.clone(),
                label: o.label.clone(),
                selected: self.selected.as_deref() == Some(o.value.as_str()),
            })
            .collect();

        ControlView::SelectMenu {
            id: self.payload.id.clone(),
            label: self.payload.label.clone(),
            options,
        }
    }

    fn apply(&mut self, interaction: Interaction) -> Result<(), InteractionError> {
        match interaction {
            Interaction::Select(value) => {
                if !self.payload.options.iter().any(|o| o.value == value) {
                    return Err(InteractionError::UnknownOption(value));
                }
                self.selected = Some(value);
                Ok(())
            }
            other => Err(wrong_variant(self.variant(), &other)),
        }
    }
}

/// Checkbox group with a checked flag per item id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxesControl {
    payload: CheckboxesPayload,
    checked: HashMap<String, bool>,
}

impl CheckboxesControl {
    /// Create control; items sharing an id share one state entry
    #[must_use]
    pub fn new(payload: CheckboxesPayload) -> Self {
        let checked = payload
            .items
            .iter()
            .map(|item| (item.id.clone(), item.checked))
            .collect();
        Self { payload, checked }
    }

    /// Checked flag of an item
    #[inline]
    #[must_use]
    pub fn is_checked(&self, id: &str) -> Option<bool> {
        self.checked.get(id).copied()
    }

    /// Snapshot of the id -> checked mapping
    #[must_use]
    pub fn checked_items(&self) -> &HashMap<String, bool> {
        &self.checked
    }
}

impl Control for CheckboxesControl {
    fn variant(&self) -> ControlVariant {
        ControlVariant::Checkboxes
    }

    fn render(&self) -> ControlView {
        let items = self
            .payload
            .items
            .iter()
            .map(|item| CheckboxView {
                id: item.id.clone(),
                label: item.label.clone(),
                checked: self.checked.get(&item.id).copied().unwrap_or(false),
            })
            .collect();

        ControlView::Checkboxes { items }
    }

    fn apply(&mut self, interaction: Interaction) -> Result<(), InteractionError> {
        match interaction {
            Interaction::Toggle(id) => match self.checked.get_mut(&id) {
                Some(flag) => {
                    *flag = !*flag;
                    Ok(())
                }
                None => Err(InteractionError::UnknownItem(id)),
            },
            Interaction::SetChecked { id, checked } => match self.checked.get_mut(&id) {
                Some(flag) => {
                    *flag = checked;
                    Ok(())
                }
                None => Err(InteractionError::UnknownItem(id)),
            },
            other => Err(wrong_variant(self.variant(), &other)),
        }
    }
}

/// Radio group with one exclusive selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioButtonsControl {
    payload: RadioButtonsPayload,
    group: String,
    selected: Option<String>,
}

impl RadioButtonsControl {
    /// Create control under its own group name
    #[must_use]
    pub fn new(payload: RadioButtonsPayload, group: impl Into<String>) -> Self {
        let selected = payload
            .selected
            .clone()
            .filter(|id| payload.options.iter().any(|o| &o.id == id));
        Self {
            payload,
            group: group.into(),
            selected,
        }
    }

    /// Currently chosen option id
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Group name shared by this control's options only
    #[inline]
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }
}

impl Control for RadioButtonsControl {
    fn variant(&self) -> ControlVariant {
        ControlVariant::RadioButtons
    }

    fn render(&self) -> ControlView {
        let choices = if self.payload.options.is_empty() {
            RadioChoices::Placeholder(NO_OPTIONS_PLACEHOLDER.to_string())
        } else {
            RadioChoices::Options(
                self.payload
                    .options
                    .iter()
                    .map(|o| RadioOptionView {
                        id: o.id.clone(),
                        value: o.value.clone(),
                        label: o.label.clone(),
                        selected: self.selected.as_deref() == Some(o.id.as_str()),
                    })
                    .collect(),
            )
        };

        ControlView::RadioButtons {
            label: self.payload.label.clone(),
            group: self.group.clone(),
            choices,
        }
    }

    fn apply(&mut self, interaction: Interaction) -> Result<(), InteractionError> {
        match interaction {
            Interaction::Choose(id) => {
                if !self.payload.options.iter().any(|o| o.id == id) {
                    return Err(InteractionError::UnknownChoice(id));
                }
                self.selected = Some(id);
                Ok(())
            }
            other => Err(wrong_variant(self.variant(), &other)),
        }
    }
}

/// One live control of any variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    /// Text input
    TextInput(TextInputControl),
    /// Select menu
    SelectMenu(SelectMenuControl),
    /// Checkbox group
    Checkboxes(CheckboxesControl),
    /// Radio group
    RadioButtons(RadioButtonsControl),
}

impl ControlState {
    /// Instantiate the renderer matching a payload
    ///
    /// `group` names the radio group; other variants ignore it.
    #[must_use]
    pub fn instantiate(payload: &ControlPayload, group: impl Into<String>) -> Self {
        match payload {
            ControlPayload::TextInput(p) => Self::TextInput(TextInputControl::new(p.clone())),
            ControlPayload::SelectMenu(p) => Self::SelectMenu(SelectMenuControl::new(p.clone())),
            ControlPayload::Checkboxes(p) => Self::Checkboxes(CheckboxesControl::new(p.clone())),
            ControlPayload::RadioButtons(p) => {
                Self::RadioButtons(RadioButtonsControl::new(p.clone(), group))
            }
        }
    }

    fn as_control(&self) -> &dyn Control {
        match self {
            Self::TextInput(c) => c,
            Self::SelectMenu(c) => c,
            Self::Checkboxes(c) => c,
            Self::RadioButtons(c) => c,
        }
    }

    fn as_control_mut(&mut self) -> &mut dyn Control {
        match self {
            Self::TextInput(c) => c,
            Self::SelectMenu(c) => c,
            Self::Checkboxes(c) => c,
            Self::RadioButtons(c) => c,
        }
    }
}

impl Control for ControlState {
    fn variant(&self) -> ControlVariant {
        self.as_control().variant()
    }

    fn render(&self) -> ControlView {
        self.as_control().render()
    }

    fn apply(&mut self, interaction: Interaction) -> Result<(), InteractionError> {
        self.as_control_mut().apply(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckboxItem, RadioOption, SelectOption};

    fn menu(selected: &str) -> SelectMenuPayload {
        SelectMenuPayload {
            id: "term".to_string(),
            label: "Term".to_string(),
            options: vec![
                SelectOption {
                    value: "1y".to_string(),
                    label: "One year".to_string(),
                },
                SelectOption {
                    value: "2y".to_string(),
                    label: "Two years".to_string(),
                },
            ],
            selected: selected.to_string(),
        }
    }

    fn boxes() -> CheckboxesPayload {
        CheckboxesPayload {
            items: vec![
                CheckboxItem {
                    id: "a".to_string(),
                    label: "A".to_string(),
                    checked: true,
                },
                CheckboxItem {
                    id: "b".to_string(),
                    label: "B".to_string(),
                    checked: false,
                },
            ],
        }
    }

    fn radios() -> RadioButtonsPayload {
        RadioButtonsPayload {
            label: "Law".to_string(),
            options: vec![
                RadioOption {
                    id: "ny".to_string(),
                    value: "new-york".to_string(),
                    label: "New York".to_string(),
                },
                RadioOption {
                    id: "de".to_string(),
                    value: "delaware".to_string(),
                    label: "Delaware".to_string(),
                },
            ],
            selected: None,
        }
    }

    #[test]
    fn text_input_edit() {
        let mut control = TextInputControl::new(TextInputPayload {
            value: "30 days".to_string(),
            ..TextInputPayload::default()
        });
        assert_eq!(control.value(), "30 days");

        control.apply(Interaction::Edit("60 days".to_string())).unwrap();
        assert_eq!(control.value(), "60 days");

        let err = control.apply(Interaction::Toggle("x".to_string())).unwrap_err();
        assert!(matches!(err, InteractionError::WrongVariant { .. }));
        assert_eq!(control.value(), "60 days");
    }

    #[test]
    fn select_menu_initial_selection() {
        assert_eq!(SelectMenuControl::new(menu("2y")).selected(), Some("2y"));
        assert_eq!(SelectMenuControl::new(menu("")).selected(), Some("1y"));
        assert_eq!(SelectMenuControl::new(menu("5y")).selected(), Some("1y"));
        assert_eq!(
            SelectMenuControl::new(SelectMenuPayload::default()).selected(),
            None
        );
    }

    #[test]
    fn select_menu_rejects_unknown_value() {
        let mut control = SelectMenuControl::new(menu(""));
        control.apply(Interaction::Select("2y".to_string())).unwrap();
        assert_eq!(control.selected(), Some("2y"));

        let err = control.apply(Interaction::Select("9y".to_string())).unwrap_err();
        assert_eq!(err, InteractionError::UnknownOption("9y".to_string()));
        assert_eq!(control.selected(), Some("2y"));
    }

    #[test]
    fn checkbox_toggle_flips_only_one_entry() {
        let mut control = CheckboxesControl::new(boxes());
        control.apply(Interaction::Toggle("b".to_string())).unwrap();

        assert_eq!(control.is_checked("a"), Some(true));
        assert_eq!(control.is_checked("b"), Some(true));

        control
            .apply(Interaction::SetChecked {
                id: "a".to_string(),
                checked: false,
            })
            .unwrap();
        assert_eq!(control.is_checked("a"), Some(false));
        assert_eq!(control.is_checked("b"), Some(true));

        let err = control.apply(Interaction::Toggle("zz".to_string())).unwrap_err();
        assert_eq!(err, InteractionError::UnknownItem("zz".to_string()));
    }

    #[test]
    fn radio_choice_is_exclusive() {
        let mut control = RadioButtonsControl::new(radios(), "radio-group-0");
        assert_eq!(control.selected(), None);

        control.apply(Interaction::Choose("ny".to_string())).unwrap();
        control.apply(Interaction::Choose("de".to_string())).unwrap();

        let ControlView::RadioButtons { choices, group, .. } = control.render() else {
            panic!("expected radio view");
        };
        assert_eq!(group, "radio-group-0");
        let RadioChoices::Options(options) = choices else {
            panic!("expected options");
        };
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.id.as_str()).collect();
        assert_eq!(selected, vec!["de"]);
    }

    #[test]
    fn radio_without_options_renders_placeholder() {
        let control = RadioButtonsControl::new(
            RadioButtonsPayload {
                label: "R".to_string(),
                ..RadioButtonsPayload::default()
            },
            "radio-group-3",
        );
        assert_eq!(
            control.render(),
            ControlView::RadioButtons {
                label: "R".to_string(),
                group: "radio-group-3".to_string(),
                choices: RadioChoices::Placeholder(NO_OPTIONS_PLACEHOLDER.to_string()),
            }
        );
    }

    #[test]
    fn radio_initial_selection_must_exist() {
        let mut payload = radios();
        payload.selected = Some("de".to_string());
        assert_eq!(RadioButtonsControl::new(payload.clone(), "g").selected(), Some("de"));

        payload.selected = Some("tx".to_string());
        assert_eq!(RadioButtonsControl::new(payload, "g").selected(), None);
    }

    #[test]
    fn control_state_dispatch() {
        let mut state = ControlState::instantiate(&ControlPayload::Checkboxes(boxes()), "unused");
        assert_eq!(state.variant(), ControlVariant::Checkboxes);

        state.apply(Interaction::Toggle("a".to_string())).unwrap();
        let ControlView::Checkboxes { items } = state.render() else {
            panic!("expected checkboxes view");
        };
        assert!(!items[0].checked);
    }
}
