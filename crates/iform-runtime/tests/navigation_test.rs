#![forbid(unsafe_code)]

//! Navigation invariants, checked on the pure state machine and through a
//! running form.

use std::time::Duration;

use iform_fields::{FieldConfig, FieldType, SUBMIT_KEY};
use iform_runtime::{Direction, FormSettings, NavCommand, SlideForm, UiState};
use proptest::prelude::*;

const MS: Duration = Duration::from_millis(1);

fn configs(n: usize) -> Vec<FieldConfig> {
    (0..n)
        .map(|i| FieldConfig::new(format!("q{i}"), FieldType::TextBox, format!("Question {i}"), false))
        .collect()
}

fn immediate_form(n: usize) -> SlideForm {
    let mut form = SlideForm::with_registry(
        &Default::default(),
        &configs(n),
        FormSettings::immediate(),
        50,
        16,
    )
    .expect("form");
    form.mount(None);
    form.tick(MS).expect("tick");
    form
}

#[derive(Debug, Clone)]
enum Op {
    Go(Direction),
    Activate(usize),
}

fn op(nodes: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Go(Direction::Next)),
        Just(Op::Go(Direction::Prev)),
        (0..nodes).prop_map(Op::Activate),
    ]
}

#[test]
fn mount_lands_on_first_question_with_focus() {
    let form = immediate_form(3);
    assert_eq!(form.ui_state().active_index(), Some(0));
    assert_eq!(form.focused(), Some(0));
    assert!(!form.is_animating());
}

#[test]
fn empty_form_has_only_submit() {
    let form = immediate_form(0);
    assert_eq!(form.ui_state().active_key(), Some(SUBMIT_KEY));
    assert_eq!(form.progress(), 1.0);
}

proptest! {
    #[test]
    fn next_never_passes_submit(n in 0usize..8, extra in 1usize..5) {
        let mut form = immediate_form(n);
        for _ in 0..n + extra {
            form.go_to_field(Direction::Next).expect("go");
            form.tick(MS).expect("tick");
        }
        prop_assert_eq!(form.ui_state().active_index(), Some(n));
        for _ in 0..n + extra {
            form.go_to_field(Direction::Prev).expect("go");
            form.tick(MS).expect("tick");
        }
        prop_assert_eq!(form.ui_state().active_index(), Some(0));
    }

    #[test]
    fn exactly_one_node_is_active(n in 1usize..6, ops in prop::collection::vec(op(7), 1..40)) {
        let keys: Vec<String> = (0..n).map(|i| format!("q{i}")).collect();
        let mut state = UiState::new(keys.clone());
        for op in ops {
            let command = match op {
                Op::Go(direction) => NavCommand::Go(direction),
                Op::Activate(i) if i < n => NavCommand::SetActive(keys[i].clone()),
                Op::Activate(_) => NavCommand::SetActive(SUBMIT_KEY.to_string()),
            };
            state = state.apply(&command).expect("known key");
            prop_assert_eq!(state.active_count(), 1);
            prop_assert!(state.active_index().is_some_and(|i| i <= n));
        }
    }

    #[test]
    fn running_form_keeps_one_active_node(ops in prop::collection::vec(op(5), 1..30)) {
        let mut form = immediate_form(4);
        for op in ops {
            match op {
                Op::Go(direction) => {
                    form.go_to_field(direction).expect("go");
                }
                Op::Activate(i) => {
                    let key = form.ui_state().node(i).map(|n| n.key.clone()).expect("node");
                    form.set_field_active(&key).expect("known");
                }
            }
            form.tick(MS).expect("tick");
            prop_assert_eq!(form.ui_state().active_count(), 1);
        }
    }

    #[test]
    fn completion_flags_never_touch_activity(n in 1usize..6, marks in prop::collection::vec(any::<(u8, bool)>(), 0..20)) {
        let keys: Vec<String> = (0..n).map(|i| format!("q{i}")).collect();
        let mut state = UiState::new(keys.clone()).apply(&NavCommand::Go(Direction::Next)).expect("go");
        for (i, completed) in marks {
            let key = keys[usize::from(i) % n].clone();
            state = state.apply(&NavCommand::SetCompleted { key, completed }).expect("known");
            prop_assert_eq!(state.active_index(), Some(0));
            prop_assert!(state.completed_count() <= n);
        }
    }
}
