//! Review prompt construction

/// Upper bound on recommended parameters requested from the model
pub const MAX_PARAMETERS: usize = 10;

const CONTROL_EXAMPLES: &str = r#"UI control JSON examples. These are only examples, so fill them in with relevant information.

  Radio buttons:
  {
    "radioButtons": [
      { "id": "radio1", "label": "Radio 1", "checked": false },
      { "id": "radio2", "label": "Radio 2", "checked": false }
    ]
  }

  Select menu:
  {
    "selectMenu": {
      "id": "selectMenu1",
      "label": "Select Menu",
      "options": [
        { "value": "option1", "label": "Option 1" },
        { "value": "option2", "label": "Option 2" }
      ],
      "selected": "option1"
    }
  }

  Text:
  {
    "textInput": {
      "id": "textInput1",
      "label": "Text Input",
      "value": "",
      "placeholder": "Enter text here"
    }
  }"#;

const STRUCTURE: &str = r#"JSON structure:
    "parameter": "type of parameter recommended: either textInput, selectMenu, radios, or checkboxes",
    "parameterDescription": "a brief description of what this clause parameter is, and some guidance for how I could configure it",
    "uiControl": "which ui control it should use",
    JSON for the UI control from the examples above.

    If there is more than one parameter, create an array of the parameters."#;

/// First character upper case, the rest lower case
#[must_use]
pub fn capitalize(clause: &str) -> String {
    let mut chars = clause.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Build the completion prompt for a clause
#[must_use]
pub fn build_prompt(clause: &str) -> String {
    format!(
        "I am drafting a legal document, and here is a legal clause that I am working on: {clause}\n\n\
         Review the clause and give me recommended parameters ({MAX_PARAMETERS} at most) that I might want to adjust. \
         Choose the appropriate UI controls to adjust each parameter. \
         Your options are checkboxes, select menu, radio buttons, or a text input.\n\n\
         Give me the results as JSON. Do not include any explanations, only provide a RFC8259 compliant JSON response.\n\n\
         {CONTROL_EXAMPLES}\n\n\
         {STRUCTURE}\n\n\
         Output the JSON:",
        clause = capitalize(clause),
    )
}
