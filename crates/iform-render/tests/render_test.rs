#![forbid(unsafe_code)]

//! Text snapshots of rendered forms.

use std::time::Duration;

use iform_core::event::{Event, KeyCode, KeyEvent};
use iform_fields::{FieldRegistry, parse_config};
use iform_render::{
    Buffer, Color, StyleFlags, Theme, buffer_to_text, render_slide_form, render_stack_form,
};
use iform_runtime::{FormSettings, SlideForm, StackForm};
use proptest::prelude::*;
use unicode_width::UnicodeWidthStr;

/// Join rows, padding each to `width` columns.
fn screen(width: usize, rows: &[&str]) -> String {
    rows.iter()
        .map(|r| format!("{r:<width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw_slide(form: &SlideForm) -> Buffer {
    let mut buf = Buffer::new(20, 9);
    let area = buf.bounds();
    render_slide_form(form, area, &mut buf, &Theme::default());
    buf
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

#[test]
fn slide_form_frames() {
    let configs = parse_config(r#"[{"key": "name", "type": "TextBox", "title": "Name"}]"#)
        .expect("valid");
    let mut form = SlideForm::with_registry(
        &FieldRegistry::default(),
        &configs,
        FormSettings::immediate(),
        20,
        8,
    )
    .expect("form");
    form.mount(None);
    form.tick(Duration::from_millis(1)).expect("tick");

    let buf = draw_slide(&form);
    assert_eq!(
        buffer_to_text(&buf),
        screen(
            20,
            &[
                "",
                "",
                "  1. Name",
                "",
                "",
                "",
                "  [ Submit ]",
                "",
                "0/1 answered ░░░░░░░",
            ]
        )
    );
    // caret on the empty input, inactive submit dimmed
    assert!(buf.get(4, 3).is_some_and(|c| c.style.flags.contains(StyleFlags::REVERSE)));
    assert!(buf.get(2, 6).is_some_and(|c| c.style.flags.contains(StyleFlags::DIM)));

    for c in "Ada".chars() {
        form.handle_event(&key(KeyCode::Char(c))).expect("key");
    }
    form.handle_event(&key(KeyCode::Enter)).expect("key");
    form.tick(Duration::from_millis(1)).expect("tick");

    let buf = draw_slide(&form);
    assert_eq!(
        buffer_to_text(&buf),
        screen(
            20,
            &[
                "    Ada",
                "",
                "",
                "  [ Submit ]",
                "",
                "",
                "",
                "",
                "1/1 answered ███████",
            ]
        )
    );
    assert!(buf.get(2, 3).is_some_and(|c| c.style.flags.contains(StyleFlags::REVERSE)));
}

#[test]
fn stack_form_frames() {
    let configs = parse_config(
        r#"[
            {"key": "name", "type": "TextBox", "title": "Name", "required": true},
            {"key": "pet", "type": "RadioButtons", "title": "Pet",
             "options": [{"caption": "Cat"}, {"caption": "Dog"}]}
        ]"#,
    )
    .expect("valid");
    let mut form = StackForm::new(&configs, 20, 10).expect("form");
    let mut buf = Buffer::new(20, 10);
    let area = buf.bounds();
    render_stack_form(&form, area, &mut buf, &Theme::default());
    assert_eq!(
        buffer_to_text(&buf),
        screen(
            20,
            &[
                "  1. Name *",
                "",
                "",
                "",
                "  2. Pet",
                "    ( ) Cat",
                "    ( ) Dog",
                "",
                "",
                "  [ Submit ]",
            ]
        )
    );

    form.handle_event(&key(KeyCode::Enter)).expect("key");
    buf.clear();
    render_stack_form(&form, area, &mut buf, &Theme::default());
    assert_eq!(
        buffer_to_text(&buf).lines().nth(2),
        Some("  This field must be")
    );
    assert_eq!(buf.get(2, 2).map(|c| c.style.fg), Some(Color::Red));
}

#[test]
fn rows_outside_the_area_are_skipped() {
    let configs = parse_config(
        r#"[
            {"key": "a", "type": "TextBox", "title": "A"},
            {"key": "b", "type": "TextBox", "title": "B"}
        ]"#,
    )
    .expect("valid");
    let form = StackForm::new(&configs, 20, 3).expect("form");
    let mut buf = Buffer::new(20, 3);
    let area = buf.bounds();
    render_stack_form(&form, area, &mut buf, &Theme::default());
    assert_eq!(buffer_to_text(&buf), screen(20, &["  1. A", "", ""]));
}

proptest! {
    #[test]
    fn rows_keep_their_width(text in "[a-z界 ]{0,30}", x in 0u16..12, width in 1u16..12) {
        let mut buf = Buffer::new(width, 1);
        let end = buf.draw_str(x, 0, &text, iform_render::Style::PLAIN, width);
        prop_assert!(end <= width.max(x));
        prop_assert_eq!(buffer_to_text(&buf).width(), usize::from(width));
    }
}
