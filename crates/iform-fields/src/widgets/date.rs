#![forbid(unsafe_code)]

use iform_core::event::KeyEvent;
use unicode_segmentation::UnicodeSegmentation;

use super::{BodyLine, ErrorSlot, FieldValue, FieldWidget, TextInput, Tone};
use crate::config::FieldConfig;
use crate::mask::{DataMask, digit_count};
use crate::validation::{ValidationResult, validate_date};

/// Placeholder shown while no digit has been entered.
pub const DATE_PLACEHOLDER: &str = "DD/MM/YYYY";

/// A `DD/MM/YYYY` date entered through a fixed digit mask.
///
/// The mask is re-applied after every edit, so the value always has the
/// mask's shape.
#[derive(Debug, Clone)]
pub struct DateField {
    config: FieldConfig,
    mask: DataMask,
    input: TextInput,
    error: ErrorSlot,
}

impl DateField {
    pub fn new(config: FieldConfig) -> Self {
        let mask = DataMask::date();
        let mut input = TextInput::new();
        input.replace(mask.empty(), 0);
        Self {
            config,
            mask,
            input,
            error: ErrorSlot::default(),
        }
    }

    /// Replace the digits, re-masking the result.
    pub fn set_text(&mut self, raw: &str) {
        let (masked, caret) = self.mask.apply(raw, raw.graphemes(true).count());
        self.input.replace(masked, caret);
    }

    /// Number of digits entered so far.
    pub fn digits(&self) -> usize {
        digit_count(self.input.value())
    }

    fn remask(&mut self) {
        let (masked, caret) = self.mask.apply(self.input.value(), self.input.cursor());
        self.input.replace(masked, caret);
    }
}

impl FieldWidget for DateField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.input.value().to_string())
    }

    fn check(&self) -> ValidationResult {
        validate_date(self.config.required, self.input.value())
    }

    fn error_slot(&self) -> &ErrorSlot {
        &self.error
    }

    fn error_slot_mut(&mut self) -> &mut ErrorSlot {
        &mut self.error
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let before = self.input.value().to_string();
        let consumed = self.input.handle_key(key);
        // Pure caret moves keep their position; only edits re-mask.
        if consumed && self.input.value() != before {
            self.remask();
        }
        consumed
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        self.input.insert_str(text);
        self.remask();
        true
    }

    fn body_lines(&self, focused: bool) -> Vec<BodyLine> {
        if self.digits() == 0 && !focused {
            return vec![BodyLine::new(DATE_PLACEHOLDER, Tone::Muted)];
        }
        let line = BodyLine::new(self.input.value(), Tone::Normal);
        if focused {
            vec![line.with_caret(self.input.cursor())]
        } else {
            vec![line]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldType;
    use iform_core::event::KeyCode;

    fn field(required: bool) -> DateField {
        DateField::new(FieldConfig::new("dob", FieldType::DateField, "Born", required))
    }

    fn type_str(f: &mut DateField, s: &str) {
        for c in s.chars() {
            f.handle_key(&KeyEvent::new(KeyCode::Char(c)));
        }
    }

    fn text(f: &DateField) -> String {
        f.value().as_text().unwrap_or_default().to_string()
    }

    #[test]
    fn starts_as_empty_mask() {
        let f = field(true);
        assert_eq!(text(&f), "  /  /    ");
        assert_eq!(f.body_lines(false)[0].text, DATE_PLACEHOLDER);
    }

    #[test]
    fn typing_digits_fills_slots_and_skips_literals() {
        let mut f = field(true);
        type_str(&mut f, "01021990");
        assert_eq!(text(&f), "01/02/1990");
        assert!(f.validate());
    }

    #[test]
    fn letters_are_stripped() {
        let mut f = field(false);
        type_str(&mut f, "1a2b");
        assert_eq!(text(&f), "12/  /    ");
    }

    #[test]
    fn surplus_digits_are_dropped() {
        let mut f = field(true);
        type_str(&mut f, "0102199077");
        assert_eq!(text(&f), "01/02/1990");
    }

    #[test]
    fn incomplete_required_date_fails() {
        let mut f = field(true);
        type_str(&mut f, "0102");
        assert!(!f.validate());
        assert_eq!(f.error(), Some("Please insert a valid date"));
    }

    #[test]
    fn backspace_remasks() {
        let mut f = field(true);
        type_str(&mut f, "010");
        f.handle_key(&KeyEvent::new(KeyCode::Backspace));
        assert_eq!(text(&f), "01/  /    ");
    }

    #[test]
    fn caret_moves_freely_over_literals() {
        let mut f = field(true);
        type_str(&mut f, "12");
        let right = KeyEvent::new(KeyCode::Right);
        f.handle_key(&right);
        assert_eq!(f.body_lines(true)[0].caret, Some(3));
    }
}
