#![forbid(unsafe_code)]

use iform_core::event::KeyEvent;

use super::{BodyLine, ErrorSlot, FieldValue, FieldWidget, TextInput, Tone};
use crate::config::{ConfigError, FieldConfig, FieldType};
use crate::validation::{TextRule, ValidationResult, text_rule, validate_text};

/// Text box, text area, email, number, and telephone fields.
///
/// The pattern and message come from the field type's [`TextRule`].
/// Validation runs when focus leaves the field. Text areas keep pasted line
/// breaks and display one body line per answer line.
#[derive(Debug, Clone)]
pub struct TextField {
    config: FieldConfig,
    rule: &'static TextRule,
    input: TextInput,
    error: ErrorSlot,
}

impl TextField {
    /// Build a text field of the given text-like type.
    pub fn new(config: FieldConfig, field_type: FieldType) -> Result<Self, ConfigError> {
        let rule = text_rule(field_type).ok_or_else(|| ConfigError::UnknownType {
            key: config.key.clone(),
            type_name: field_type.name().to_string(),
        })?;
        Ok(Self {
            config,
            rule,
            input: TextInput::new().with_multiline(field_type == FieldType::TextArea),
            error: ErrorSlot::default(),
        })
    }

    /// The rule this field validates against.
    pub fn rule(&self) -> &'static TextRule {
        self.rule
    }

    /// Replace the content, caret at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.replace(text, usize::MAX);
    }

    /// The raw content.
    pub fn text(&self) -> &str {
        self.input.value()
    }
}

impl FieldWidget for TextField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.input.value().to_string())
    }

    fn check(&self) -> ValidationResult {
        validate_text(self.rule, self.config.required, self.input.value())
    }

    fn error_slot(&self) -> &ErrorSlot {
        &self.error
    }

    fn error_slot_mut(&mut self) -> &mut ErrorSlot {
        &mut self.error
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.input.handle_key(key)
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        self.input.insert_str(text);
        true
    }

    fn on_blur(&mut self) {
        self.validate();
    }

    fn body_lines(&self, focused: bool) -> Vec<BodyLine> {
        if self.input.is_empty() {
            let line =
                BodyLine::new(self.config.placeholder.clone().unwrap_or_default(), Tone::Muted);
            return vec![if focused { line.with_caret(0) } else { line }];
        }
        let (caret_line, caret_column) = self.input.caret_position();
        self.input
            .value()
            .split('\n')
            .enumerate()
            .map(|(i, text)| {
                let line = BodyLine::new(text, Tone::Normal);
                if focused && i == caret_line {
                    line.with_caret(caret_column)
                } else {
                    line
                }
            })
            .collect()
    }
}
