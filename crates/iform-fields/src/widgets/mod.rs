#![forbid(unsafe_code)]

//! Field widgets.
//!
//! Each widget kind implements [`FieldWidget`] on its own; [`Field`] is the
//! tagged union the registry hands out. Host-defined widgets ride along in
//! [`Field::Custom`].

mod date;
mod dropdown;
mod options;
mod text;
mod text_input;

use std::fmt;

use iform_core::event::KeyEvent;
use serde::Serialize;

use crate::config::{FieldConfig, OptionItem};
use crate::validation::{
    ValidationError, ValidationResult, validate_required, validate_required_items,
};

pub use date::DateField;
pub use dropdown::{DROPDOWN_PLACEHOLDER, DropdownField};
pub use options::{OptionsField, OptionsKind};
pub use text::TextField;
pub use text_input::TextInput;

// ---------------------------------------------------------------------------
// Values and display lines
// ---------------------------------------------------------------------------

/// The answer a field currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, date, and dropdown fields.
    Text(String),
    /// Radio and checkbox groups: checked options in option order.
    Options(Vec<OptionItem>),
}

impl FieldValue {
    /// The text value, if this is a text-shaped answer.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Options(_) => None,
        }
    }

    /// The checked options, if this is an option-group answer.
    #[must_use]
    pub fn as_options(&self) -> Option<&[OptionItem]> {
        match self {
            Self::Text(_) => None,
            Self::Options(o) => Some(o),
        }
    }
}

/// How a display line should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    /// Placeholder text.
    Muted,
    /// The option under the widget's cursor.
    Cursor,
    /// A disabled option.
    Disabled,
}

/// One line of a widget's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLine {
    pub text: String,
    pub tone: Tone,
    /// Caret position as a grapheme index into `text`, when editing.
    pub caret: Option<usize>,
}

impl BodyLine {
    /// A plain line.
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            caret: None,
        }
    }

    /// Attach a caret (builder).
    #[must_use]
    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = Some(caret);
        self
    }
}

// ---------------------------------------------------------------------------
// Error slot
// ---------------------------------------------------------------------------

/// Holds at most one visible error per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    current: Option<ValidationError>,
}

impl ErrorSlot {
    /// Replace the slot's content with the outcome of a validation.
    ///
    /// Returns whether the outcome was valid.
    pub fn record(&mut self, result: ValidationResult) -> bool {
        match result {
            ValidationResult::Valid => {
                self.current = None;
                true
            }
            ValidationResult::Invalid(e) => {
                self.current = Some(e);
                false
            }
        }
    }

    /// The error currently shown.
    #[must_use]
    pub fn get(&self) -> Option<&ValidationError> {
        self.current.as_ref()
    }

    /// Remove any shown error.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

// ---------------------------------------------------------------------------
// FieldWidget
// ---------------------------------------------------------------------------

/// Capability interface every field widget provides.
pub trait FieldWidget: fmt::Debug {
    /// The config this widget was built from.
    fn config(&self) -> &FieldConfig;

    /// Current answer.
    fn value(&self) -> FieldValue;

    /// Check the current answer without touching the visible error.
    ///
    /// Widgets without a type-specific rule fall back to "a required answer
    /// must be non-empty".
    fn check(&self) -> ValidationResult {
        let required = self.is_required();
        match self.value() {
            FieldValue::Text(text) => validate_required(required, &text),
            FieldValue::Options(items) => validate_required_items(required, items.len()),
        }
    }

    /// The widget's error slot.
    fn error_slot(&self) -> &ErrorSlot;

    /// Mutable access to the widget's error slot.
    fn error_slot_mut(&mut self) -> &mut ErrorSlot;

    /// Apply a key press to the widget's own input.
    ///
    /// Returns `true` if the widget consumed the key.
    fn handle_key(&mut self, key: &KeyEvent) -> bool;

    /// Lines this widget displays below its title.
    fn body_lines(&self, focused: bool) -> Vec<BodyLine>;

    /// Insert pasted text. Widgets without text input ignore it.
    fn handle_paste(&mut self, _text: &str) -> bool {
        false
    }

    /// Called when focus leaves the widget.
    fn on_blur(&mut self) {}

    /// Field key.
    fn key(&self) -> &str {
        &self.config().key
    }

    /// Whether an answer is required.
    fn is_required(&self) -> bool {
        self.config().required
    }

    /// Validate and show (or clear) the field's single error indicator.
    ///
    /// Idempotent: repeated calls without input leave the same state.
    fn validate(&mut self) -> bool {
        let result = self.check();
        self.error_slot_mut().record(result)
    }

    /// Message of the error currently shown.
    fn error(&self) -> Option<&str> {
        self.error_slot().get().map(|e| e.message.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A constructed field: one variant per widget kind.
#[derive(Debug)]
pub enum Field {
    Text(TextField),
    Date(DateField),
    Dropdown(DropdownField),
    Options(OptionsField),
    Custom(Box<dyn FieldWidget>),
}

macro_rules! dispatch {
    ($self:expr, $w:ident => $body:expr) => {
        match $self {
            Field::Text($w) => $body,
            Field::Date($w) => $body,
            Field::Dropdown($w) => $body,
            Field::Options($w) => $body,
            Field::Custom($w) => $body,
        }
    };
}

impl FieldWidget for Field {
    fn config(&self) -> &FieldConfig {
        dispatch!(self, w => w.config())
    }

    fn value(&self) -> FieldValue {
        dispatch!(self, w => w.value())
    }

    fn check(&self) -> ValidationResult {
        dispatch!(self, w => w.check())
    }

    fn error_slot(&self) -> &ErrorSlot {
        dispatch!(self, w => w.error_slot())
    }

    fn error_slot_mut(&mut self) -> &mut ErrorSlot {
        dispatch!(self, w => w.error_slot_mut())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        dispatch!(self, w => w.handle_key(key))
    }

    fn body_lines(&self, focused: bool) -> Vec<BodyLine> {
        dispatch!(self, w => w.body_lines(focused))
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        dispatch!(self, w => w.handle_paste(text))
    }

    fn on_blur(&mut self) {
        dispatch!(self, w => w.on_blur())
    }
}
