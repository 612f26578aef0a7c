//! Rendering properties of clause controls.
//!
//! These tests exercise parse + dispatch end to end:
//! - N well-formed entries render N controls, in order, with their variants.
//! - Non-JSON input renders one error indicator and nothing else.
//! - One unrecognized entry is dropped without affecting its siblings.
//! - Interacting with one control never changes another control's state.

use clause_controls::prelude::*;
use clause_controls::{parse, ControlView, RadioChoices};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn variant_strategy() -> impl Strategy<Value = ControlVariant> {
    prop_oneof![
        Just(ControlVariant::TextInput),
        Just(ControlVariant::SelectMenu),
        Just(ControlVariant::Checkboxes),
        Just(ControlVariant::RadioButtons),
    ]
}

/// Well-formed wire entry for a variant
fn entry(variant: ControlVariant, n: usize) -> Value {
    let common = |payload_key: &str, payload: Value| {
        json!({
            "parameter": format!("param-{n}"),
            "parameterDescription": format!("description {n}"),
            "uiControl": variant.as_tag(),
            payload_key: payload,
        })
    };

    match variant {
        ControlVariant::TextInput => common(
            "textInput",
            json!({"id": format!("t{n}"), "label": "Text", "value": "", "placeholder": "type"}),
        ),
        ControlVariant::SelectMenu => common(
            "selectMenu",
            json!({
                "id": format!("s{n}"),
                "label": "Select",
                "options": [{"value": "a", "label": "A"}, {"value": "b", "label": "B"}],
                "selected": "b"
            }),
        ),
        ControlVariant::Checkboxes => common(
            "checkboxes",
            json!([
                {"id": format!("c{n}-1"), "label": "One", "checked": false},
                {"id": format!("c{n}-2"), "label": "Two", "checked": true}
            ]),
        ),
        ControlVariant::RadioButtons => common(
            "radioButtons",
            json!({
                "label": "Radio",
                "options": [
                    {"id": format!("r{n}-1"), "value": "x", "label": "X"},
                    {"id": format!("r{n}-2"), "value": "y", "label": "Y"}
                ]
            }),
        ),
    }
}

fn document(entries: Vec<Value>) -> String {
    json!({ "parameters": entries }).to_string()
}

/// An interaction every generated control of the variant accepts
fn interaction_for(variant: ControlVariant, n: usize) -> Interaction {
    match variant {
        ControlVariant::TextInput => Interaction::Edit("changed".to_string()),
        ControlVariant::SelectMenu => Interaction::Select("a".to_string()),
        ControlVariant::Checkboxes => Interaction::Toggle(format!("c{n}-1")),
        ControlVariant::RadioButtons => Interaction::Choose(format!("r{n}-2")),
    }
}

proptest! {
    #[test]
    fn prop_renders_one_control_per_entry(variants in prop::collection::vec(variant_strategy(), 0..12)) {
        let raw = document(variants.iter().enumerate().map(|(n, v)| entry(*v, n)).collect());

        let outcome = render_response(&raw);
        prop_assert!(outcome.error().is_none());

        let rendered: Vec<_> = outcome.controls().iter().map(|c| (c.key, c.variant)).collect();
        let expected: Vec<_> = variants
            .iter()
            .enumerate()
            .map(|(n, v)| (ControlKey(n), *v))
            .collect();
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn prop_non_json_renders_single_indicator(raw in "\\PC*") {
        prop_assume!(serde_json::from_str::<Value>(&raw).is_err());

        let outcome = render_response(&raw);
        prop_assert!(outcome.error().is_some());
        prop_assert!(outcome.controls().is_empty());
    }

    #[test]
    fn prop_unrecognized_entry_is_dropped(
        variants in prop::collection::vec(variant_strategy(), 1..10),
        bad in any::<prop::sample::Index>(),
    ) {
        let bad = bad.index(variants.len());
        let entries: Vec<_> = variants
            .iter()
            .enumerate()
            .map(|(n, v)| {
                if n == bad {
                    json!({"uiControl": "datePicker", "parameterDescription": "unknown"})
                } else {
                    entry(*v, n)
                }
            })
            .collect();

        let outcome = render_response(&document(entries));
        let rendered: Vec<_> = outcome.controls().iter().map(|c| c.variant).collect();
        let expected: Vec<_> = variants
            .iter()
            .enumerate()
            .filter(|(n, _)| *n != bad)
            .map(|(_, v)| *v)
            .collect();
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn prop_parse_is_idempotent(variants in prop::collection::vec(variant_strategy(), 0..8)) {
        let raw = document(variants.iter().enumerate().map(|(n, v)| entry(*v, n)).collect());
        prop_assert_eq!(parse(&raw), parse(&raw));
    }

    #[test]
    fn prop_interaction_is_isolated(
        variants in prop::collection::vec(variant_strategy(), 1..10),
        target in any::<prop::sample::Index>(),
    ) {
        let raw = document(variants.iter().enumerate().map(|(n, v)| entry(*v, n)).collect());
        let mut set = ResultSet::parse(&raw).unwrap();
        let before = set.render();

        let target = target.index(variants.len());
        set.interact(ControlKey(target), interaction_for(variants[target], target)).unwrap();
        let after = set.render();

        for (n, (old, new)) in before.iter().zip(&after).enumerate() {
            if n == target {
                prop_assert_ne!(&old.view, &new.view);
            } else {
                prop_assert_eq!(old, new);
            }
        }
    }
}

#[test]
fn text_input_renders_exact_attributes() {
    let raw = r#"{"parameters":[{"parameter":"p1","parameterDescription":"d1","uiControl":"textInput","textInput":{"id":"t1","label":"L1","value":"","placeholder":"ph"}}]}"#;

    let outcome = render_response(raw);
    let controls = outcome.controls();
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].description, "d1");
    assert_eq!(
        controls[0].view,
        ControlView::TextInput {
            id: "t1".to_string(),
            label: "L1".to_string(),
            value: String::new(),
            placeholder: "ph".to_string(),
        }
    );
}

#[test]
fn empty_radio_group_renders_placeholder() {
    let raw = r#"{"parameters":[{"uiControl":"radioButtons","parameterDescription":"d","radioButtons":{"label":"R","options":[]}}]}"#;

    let outcome = render_response(raw);
    let controls = outcome.controls();
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].description, "d");
    match &controls[0].view {
        ControlView::RadioButtons { label, choices, .. } => {
            assert_eq!(label, "R");
            assert_eq!(
                choices,
                &RadioChoices::Placeholder("No options available".to_string())
            );
        }
        other => panic!("expected radio buttons, got {other:?}"),
    }
}

#[test]
fn plain_text_renders_single_indicator() {
    let outcome = render_response("not json at all");
    assert_eq!(outcome.controls().len(), 0);
    assert_eq!(outcome.error().unwrap().message, "Unable to parse result.");
}

#[test]
fn toggling_one_checkbox_group_leaves_the_other_untouched() {
    let raw = r#"{"parameters":[
        {"uiControl":"checkboxes","parameter":"Remedies","checkboxes":[
            {"id":"item1","label":"Damages","checked":false},
            {"id":"item2","label":"Injunction","checked":false}]},
        {"uiControl":"checkboxes","parameter":"Notices","checkboxes":[
            {"id":"item1","label":"Email","checked":false},
            {"id":"item2","label":"Post","checked":true}]}
    ]}"#;

    let mut session = ReviewSession::new();
    let ticket = session.begin_submission("clause").unwrap();
    session.complete_submission(ticket, Ok(raw.to_string())).unwrap();

    let second_before = session.view().outcome.unwrap().controls()[1].clone();

    session
        .interact(ControlKey(0), Interaction::Toggle("item1".to_string()))
        .unwrap();

    let outcome = session.view().outcome.unwrap();
    let ControlView::Checkboxes { items } = &outcome.controls()[0].view else {
        panic!("expected checkboxes");
    };
    assert!(items[0].checked);
    assert!(!items[1].checked);
    assert_eq!(outcome.controls()[1], second_before);
}

#[test]
fn radio_options_sharing_a_value_stay_exclusive() {
    let raw = r#"[{"uiControl":"radioButtons","radioButtons":{"label":"Renewal","options":[
        {"label":"Yes","value":"x"},{"label":"No","value":"x"}]}}]"#;

    let mut set = ResultSet::parse(raw).unwrap();
    let before = set.render();
    let ControlView::RadioButtons { choices: RadioChoices::Options(options), .. } =
        &before[0].view
    else {
        panic!("expected radio options");
    };
    let first = options[0].id.clone();
    assert_ne!(first, options[1].id);

    set.interact(ControlKey(0), Interaction::Choose(first)).unwrap();

    let after = set.render();
    let ControlView::RadioButtons { choices: RadioChoices::Options(options), .. } =
        &after[0].view
    else {
        panic!("expected radio options");
    };
    let selected: Vec<_> = options.iter().map(|o| o.selected).collect();
    assert_eq!(selected, vec![true, false]);
}

#[test]
fn radio_options_of_wrong_type_render_placeholder() {
    for options in [r#""none""#, "42", "null"] {
        let raw = format!(
            r#"{{"parameters":[{{"uiControl":"radioButtons","parameterDescription":"d","radioButtons":{{"label":"R","options":{options}}}}}]}}"#
        );
        let outcome = render_response(&raw);
        let ControlView::RadioButtons { choices, .. } = &outcome.controls()[0].view else {
            panic!("expected radio buttons");
        };
        assert_eq!(
            choices,
            &RadioChoices::Placeholder("No options available".to_string())
        );
    }
}
