//! Plain-text rendering of controls for the terminal

use clause_controls::{ControlView, RadioChoices, RenderOutcome, RenderedControl, SessionView};
use std::fmt::{self, Write};

/// Render one control block
///
/// ```text
/// [0] Payment frequency
///     How often rent falls due
///     Frequency:
///       (o) Monthly
///       ( ) Quarterly
/// ```
#[must_use]
pub fn render_control(control: &RenderedControl) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    if write_control(&mut out, control).is_err() {
        out.clear();
    }
    out
}

fn write_control(out: &mut String, control: &RenderedControl) -> fmt::Result {
    let heading = if control.parameter.is_empty() {
        control.variant.as_tag()
    } else {
        control.parameter.as_str()
    };
    writeln!(out, "[{}] {}", control.key, heading)?;
    if !control.description.is_empty() {
        writeln!(out, "    {}", control.description)?;
    }

    match &control.view {
        ControlView::TextInput {
            label,
            value,
            placeholder,
            ..
        } => {
            if value.is_empty() && !placeholder.is_empty() {
                writeln!(out, "    {label}: [ ] ({placeholder})")
            } else {
                writeln!(out, "    {label}: [{value}]")
            }
        }
        ControlView::SelectMenu { label, options, .. } => {
            writeln!(out, "    {label}:")?;
            options.iter().try_for_each(|option| {
                let marker = if option.selected { '>' } else { ' ' };
                writeln!(out, "      {marker} {} ({})", option.label, option.value)
            })
        }
        ControlView::Checkboxes { items } => items.iter().try_for_each(|item| {
            let marker = if item.checked { 'x' } else { ' ' };
            writeln!(out, "      [{marker}] {} ({})", item.label, item.id)
        }),
        ControlView::RadioButtons { label, choices, .. } => {
            writeln!(out, "    {label}:")?;
            match choices {
                RadioChoices::Options(options) => options.iter().try_for_each(|option| {
                    let marker = if option.selected { 'o' } else { ' ' };
                    writeln!(out, "      ({marker}) {} ({})", option.label, option.id)
                }),
                RadioChoices::Placeholder(message) => writeln!(out, "      {message}"),
            }
        }
    }
}

/// Render a whole outcome
#[must_use]
pub fn render_outcome(outcome: &RenderOutcome) -> String {
    match outcome {
        RenderOutcome::Error { error } => format!("Error: {}\n", error.message),
        RenderOutcome::Controls { controls } if controls.is_empty() => {
            "No parameters recommended.\n".to_string()
        }
        RenderOutcome::Controls { controls } => controls
            .iter()
            .map(render_control)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render the page state
#[must_use]
pub fn render_session(view: &SessionView) -> String {
    let mut out = String::new();
    if view.loading {
        out.push_str("Loading...\n");
    }
    if let Some(message) = &view.last_error {
        out.push_str(&format!("Error: {message}\n"));
    }
    if let Some(clause) = &view.submitted_text {
        out.push_str(&format!("Clause: {clause}\n\n"));
    }
    if let Some(outcome) = &view.outcome {
        out.push_str(&render_outcome(outcome));
    }
    out
}
