#![forbid(unsafe_code)]

//! The static form: every question stacked in one scrollable column.
//!
//! There is no animation and no completion tracking. Focus walks the nodes
//! with Tab and Shift+Tab (or the arrow keys) and the viewport jumps just far
//! enough to keep the focused node visible. Fields validate when they lose
//! focus. Enter inside a single-line field submits, like a plain HTML form.

use iform_core::event::{Event, KeyCode, KeyEvent};
use iform_fields::{Field, FieldConfig, FieldRegistry, FieldWidget};

use crate::error::FormError;
use crate::layout::{FormLayout, node_rows};
use crate::navigation::Direction;
use crate::scroll::Viewport;
use crate::submit::{AnswerRecord, FormCore, SubmitEvent, SubmitOutcome};

/// Non-animated form.
#[derive(Debug)]
pub struct StackForm {
    core: FormCore,
    /// Focused node; `core.len()` is the submit control.
    focused: usize,
    viewport: Viewport,
    layout: FormLayout,
    width: u16,
}

impl StackForm {
    /// Build a form from configs with the built-in field types.
    pub fn new(configs: &[FieldConfig], width: u16, height: u16) -> Result<Self, FormError> {
        Self::with_registry(&FieldRegistry::default(), configs, width, height)
    }

    pub fn with_registry(
        registry: &FieldRegistry,
        configs: &[FieldConfig],
        width: u16,
        height: u16,
    ) -> Result<Self, FormError> {
        Ok(Self::from_core(
            FormCore::from_configs(registry, configs)?,
            width,
            height,
        ))
    }

    pub fn from_core(core: FormCore, width: u16, height: u16) -> Self {
        let layout = measure(&core);
        Self {
            viewport: Viewport::new(f32::from(height), layout.content_height()),
            core,
            focused: 0,
            layout,
            width,
        }
    }

    /// Feed one input event.
    pub fn handle_event(&mut self, event: &Event) -> Result<(), FormError> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Wheel(wheel) => {
                // One notch scrolls three rows, towards the end for negative deltas.
                let rows = (wheel.delta.signum() * -3) as f32;
                self.viewport.scroll_by(rows);
            }
            Event::Scroll { delta } => {
                self.viewport.scroll_by(*delta);
            }
            Event::Resize { width, height } => {
                self.width = *width;
                self.viewport
                    .resize(f32::from(*height), self.layout.content_height());
                self.reveal_focused();
            }
            Event::Paste(text) => {
                if let Some(field) = self.core.field_mut(self.focused)
                    && field.handle_paste(text)
                {
                    self.relayout();
                }
            }
            Event::Focus(false) => {
                if let Some(field) = self.core.field_mut(self.focused) {
                    field.on_blur();
                }
            }
            Event::Touch(_) | Event::Focus(true) => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if !key.is_press() || key.ctrl() {
            return;
        }
        let on_submit = self.focused == self.core.len();
        match key.code {
            KeyCode::Tab | KeyCode::Down if !key.shift() => self.move_focus(Direction::Next),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(Direction::Prev),
            KeyCode::Tab => self.move_focus(Direction::Prev),
            KeyCode::Enter if on_submit || self.focused_is_single_line() => {
                self.submit();
            }
            KeyCode::Char(' ') if on_submit => {
                self.submit();
            }
            KeyCode::PageDown => {
                self.viewport.scroll_by(self.viewport.height());
            }
            KeyCode::PageUp => {
                self.viewport.scroll_by(-self.viewport.height());
            }
            _ => {
                if let Some(field) = self.core.field_mut(self.focused)
                    && field.handle_key(key)
                {
                    self.relayout();
                }
            }
        }
    }

    /// Move focus to the neighbouring node, clamped at both ends. The field
    /// losing focus validates.
    pub fn move_focus(&mut self, direction: Direction) {
        let last = self.core.len() as isize;
        let target = (self.focused as isize + direction.delta()).clamp(0, last) as usize;
        if target == self.focused {
            return;
        }
        if let Some(field) = self.core.field_mut(self.focused) {
            field.on_blur();
        }
        self.focused = target;
        iform_core::trace!(focused = target, "stack focus moved");
        self.reveal_focused();
    }

    /// Focus the node with `key`.
    pub fn focus_key(&mut self, key: &str) -> Result<(), FormError> {
        let index = if key == iform_fields::SUBMIT_KEY {
            self.core.len()
        } else {
            self.core
                .fields()
                .iter()
                .position(|f| f.key() == key)
                .ok_or_else(|| crate::navigation::NavError::UnknownField(key.to_string()))?
        };
        if index != self.focused {
            if let Some(field) = self.core.field_mut(self.focused) {
                field.on_blur();
            }
            self.focused = index;
            self.reveal_focused();
        }
        Ok(())
    }

    fn focused_is_single_line(&self) -> bool {
        matches!(
            self.core.field(self.focused),
            Some(Field::Text(_) | Field::Date(_))
        )
    }

    /// Re-measure after an edit that may change a node's row count.
    fn relayout(&mut self) {
        self.layout = measure(&self.core);
        self.viewport
            .resize(self.viewport.height(), self.layout.content_height());
        self.reveal_focused();
    }

    fn reveal_focused(&mut self) {
        let Some(extent) = self.layout.extent(self.focused) else {
            return;
        };
        let offset = self.viewport.offset();
        if extent.top < offset {
            self.viewport.set_offset(extent.top);
        } else if extent.bottom() > offset + self.viewport.height() {
            self.viewport.set_offset(extent.bottom() - self.viewport.height());
        }
    }

    /// Validate everything and deliver answers if all fields pass.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.core.submit()
    }

    /// Register a handler by event name. Only `"submit"` is supported.
    pub fn add_event_listener(
        &mut self,
        event: &str,
        handler: impl FnMut(&SubmitEvent) + 'static,
    ) -> Result<(), FormError> {
        self.core.add_event_listener(event, handler)
    }

    pub fn on_submit(&mut self, handler: impl FnMut(&SubmitEvent) + 'static) {
        self.core.on_submit(handler);
    }

    pub fn fields(&self) -> &[Field] {
        self.core.fields()
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.core.field_mut(index)
    }

    pub fn answers(&self) -> Vec<AnswerRecord> {
        self.core.answers()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.core.submit_error()
    }

    /// Focused node; equal to the field count on the submit control.
    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn submit_index(&self) -> usize {
        self.core.len()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn width(&self) -> u16 {
        self.width
    }
}

fn measure(core: &FormCore) -> FormLayout {
    let heights = core
        .fields()
        .iter()
        .map(|f| node_rows(f.body_lines(false).len().max(f.body_lines(true).len())))
        .chain(std::iter::once(node_rows(0)));
    FormLayout::stack(heights, 0.0)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use iform_core::event::Modifiers;
    use iform_fields::parse_config;

    fn form(height: u16) -> StackForm {
        let configs = parse_config(
            r#"[
                {"key": "name", "type": "TextBox", "title": "Name", "required": true},
                {"key": "born", "type": "DateField", "title": "Born"},
                {"key": "pets", "type": "Checkboxes", "title": "Pets",
                 "options": [{"caption": "Cat"}, {"caption": "Dog"}, {"caption": "Fish"}]}
            ]"#,
        )
        .expect("valid");
        StackForm::new(&configs, 40, height).expect("form")
    }

    fn press(form: &mut StackForm, key: KeyEvent) {
        form.handle_event(&Event::Key(key)).expect("key");
    }

    #[test]
    fn pasted_lines_push_later_nodes_down() {
        let configs = parse_config(
            r#"[{"key": "bio", "type": "TextArea", "title": "Bio"}]"#,
        )
        .expect("valid");
        let mut f = StackForm::new(&configs, 40, 20).expect("form");
        let submit_top = |f: &StackForm| f.layout().extent(f.submit_index()).map(|e| e.top);
        let before = submit_top(&f);
        f.handle_event(&Event::Paste("one\ntwo\nsix".into()))
            .expect("paste");
        assert_eq!(submit_top(&f), before.map(|top| top + 2.0));
        assert_eq!(f.fields()[0].value().as_text(), Some("one\ntwo\nsix"));
    }

    #[test]
    fn tab_walks_nodes_and_clamps() {
        let mut f = form(40);
        for _ in 0..10 {
            press(&mut f, KeyEvent::new(KeyCode::Tab));
        }
        assert_eq!(f.focused(), f.submit_index());
        press(&mut f, KeyEvent::new(KeyCode::BackTab));
        assert_eq!(f.focused(), 2);
        press(
            &mut f,
            KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT),
        );
        assert_eq!(f.focused(), 1);
    }

    #[test]
    fn leaving_a_field_validates_it() {
        let mut f = form(40);
        assert_eq!(f.fields()[0].error(), None);
        press(&mut f, KeyEvent::new(KeyCode::Tab));
        assert_eq!(f.fields()[0].error(), Some("This field must be filled"));
    }

    #[test]
    fn enter_in_text_field_submits() {
        let mut f = form(40);
        let sent = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&sent);
        f.on_submit(move |_| *seen.borrow_mut() += 1);
        press(&mut f, KeyEvent::new(KeyCode::Enter));
        assert_eq!(f.submit_error(), Some("1 fields need to be completed."));
        for c in "Lin".chars() {
            press(&mut f, KeyEvent::new(KeyCode::Char(c)));
        }
        press(&mut f, KeyEvent::new(KeyCode::Enter));
        assert_eq!(*sent.borrow(), 1);
        assert_eq!(f.submit_error(), None);
    }

    #[test]
    fn focus_stays_visible_in_short_viewport() {
        let mut f = form(5);
        for _ in 0..3 {
            press(&mut f, KeyEvent::new(KeyCode::Tab));
        }
        let extent = f.layout().extent(3).expect("submit");
        let vp = f.viewport();
        assert!(extent.top >= vp.offset());
        assert!(extent.bottom() <= vp.offset() + vp.height());
    }

    #[test]
    fn focus_by_key() {
        let mut f = form(40);
        f.focus_key("pets").expect("known");
        assert_eq!(f.focused(), 2);
        press(&mut f, KeyEvent::new(KeyCode::Char(' ')));
        assert_eq!(f.answers()[2].answer.as_options().map(<[_]>::len), Some(1));
        assert!(matches!(f.focus_key("nope"), Err(FormError::Nav(_))));
    }
}
