#![forbid(unsafe_code)]

//! Validation rules shared by every presentation of a form.
//!
//! Text-like fields carry a fixed rule (input kind, pattern, message) chosen
//! by field type. Content is normalized with [`trim_spaces`] before matching.
//! A field that is not required is always valid.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::FieldType;

// ---------------------------------------------------------------------------
// Error codes and messages
// ---------------------------------------------------------------------------

/// Error code for an empty required value.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for text that does not match its type's pattern.
pub const ERROR_CODE_PATTERN: &str = "pattern";
/// Error code for an option group or dropdown with nothing chosen.
pub const ERROR_CODE_CHOICE: &str = "choice";
/// Error code for an incomplete date.
pub const ERROR_CODE_DATE: &str = "date";

/// Message for option groups and dropdowns.
pub const CHOOSE_OPTION_MESSAGE: &str = "Please choose an option";
/// Message for incomplete dates.
pub const DATE_MESSAGE: &str = "Please insert a valid date";
/// Message for the generic non-empty rule.
pub const REQUIRED_MESSAGE: &str = "Field must be filled.";

/// Digits a complete `DD/MM/YYYY` date holds.
pub const DATE_DIGITS: usize = 8;

// ---------------------------------------------------------------------------
// ValidationError / ValidationResult
// ---------------------------------------------------------------------------

/// A user-facing validation failure.
///
/// `code` is stable for programmatic handling; `message` is what the form
/// shows next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The result of a validation operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is valid.
    #[default]
    Valid,
    /// The value is invalid with an error.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the error if the result is `Invalid`.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    fn check(ok: bool, code: &'static str, message: &str) -> Self {
        if ok {
            Self::Valid
        } else {
            Self::Invalid(ValidationError::new(code, message))
        }
    }
}

// ---------------------------------------------------------------------------
// Text rules
// ---------------------------------------------------------------------------

/// HTML-style input kind of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Number,
    Tel,
}

/// Fixed rule for one text-like field type.
#[derive(Debug)]
pub struct TextRule {
    pub input_kind: InputKind,
    pub message: &'static str,
    pattern: &'static LazyLock<Regex>,
}

impl TextRule {
    /// Whether normalized `content` satisfies the rule's pattern.
    #[must_use]
    pub fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

static WORDS: LazyLock<Regex> = LazyLock::new(|| compile(r"[0-9A-Za-z_]{2,}"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^(.+)@(.+)\.(.{2,})$"));
static NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]+$"));
static TELEPHONE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[\+0-9\-\(\)\s]{6,}$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in pattern {pattern:?}: {e}"))
}

static TEXT_RULE: TextRule = TextRule {
    input_kind: InputKind::Text,
    message: "This field must be filled",
    pattern: &WORDS,
};
static EMAIL_RULE: TextRule = TextRule {
    input_kind: InputKind::Email,
    message: "Please insert a valid email address",
    pattern: &EMAIL,
};
static NUMBER_RULE: TextRule = TextRule {
    input_kind: InputKind::Number,
    message: "Please insert a valid number",
    pattern: &NUMBER,
};
static TELEPHONE_RULE: TextRule = TextRule {
    input_kind: InputKind::Tel,
    message: "Please insert a valid telephone number",
    pattern: &TELEPHONE,
};

/// The rule for a text-like field type, or `None` for other types.
#[must_use]
pub fn text_rule(field_type: FieldType) -> Option<&'static TextRule> {
    match field_type {
        FieldType::TextBox | FieldType::TextArea => Some(&TEXT_RULE),
        FieldType::EmailBox => Some(&EMAIL_RULE),
        FieldType::NumberBox => Some(&NUMBER_RULE),
        FieldType::TelephoneBox => Some(&TELEPHONE_RULE),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Collapse whitespace runs to single spaces and trim both ends.
#[must_use]
pub fn trim_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validate text content against a type rule.
#[must_use]
pub fn validate_text(rule: &TextRule, required: bool, content: &str) -> ValidationResult {
    let content = trim_spaces(content);
    ValidationResult::check(
        !required || rule.matches(&content),
        ERROR_CODE_PATTERN,
        rule.message,
    )
}

/// Validate a radio/checkbox group.
#[must_use]
pub fn validate_options(required: bool, checked: &[bool]) -> ValidationResult {
    ValidationResult::check(
        !required || checked.iter().any(|&c| c),
        ERROR_CODE_CHOICE,
        CHOOSE_OPTION_MESSAGE,
    )
}

/// Validate a dropdown's selected value.
#[must_use]
pub fn validate_dropdown(required: bool, value: &str) -> ValidationResult {
    ValidationResult::check(
        !required || !trim_spaces(value).is_empty(),
        ERROR_CODE_CHOICE,
        CHOOSE_OPTION_MESSAGE,
    )
}

/// Validate a masked date: a required date needs exactly eight digits.
#[must_use]
pub fn validate_date(required: bool, value: &str) -> ValidationResult {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    ValidationResult::check(
        !required || digits == DATE_DIGITS,
        ERROR_CODE_DATE,
        DATE_MESSAGE,
    )
}

/// Generic fallback: a required value must be non-empty.
#[must_use]
pub fn validate_required(required: bool, value: &str) -> ValidationResult {
    ValidationResult::check(
        !required || !trim_spaces(value).is_empty(),
        ERROR_CODE_REQUIRED,
        REQUIRED_MESSAGE,
    )
}

/// Generic fallback for list answers: a required list must hold an item.
#[must_use]
pub fn validate_required_items(required: bool, count: usize) -> ValidationResult {
    ValidationResult::check(
        !required || count > 0,
        ERROR_CODE_REQUIRED,
        REQUIRED_MESSAGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(t: FieldType) -> &'static TextRule {
        text_rule(t).expect("text type")
    }

    #[test]
    fn trim_collapses_internal_whitespace() {
        assert_eq!(trim_spaces("  a \t\n b   c "), "a b c");
        assert_eq!(trim_spaces("   "), "");
    }

    #[test]
    fn text_needs_two_word_characters() {
        let r = rule(FieldType::TextBox);
        assert!(!validate_text(r, true, "").is_valid());
        assert!(!validate_text(r, true, "   ").is_valid());
        assert!(!validate_text(r, true, "a b").is_valid());
        assert!(validate_text(r, true, "ab").is_valid());
        assert!(validate_text(r, true, "  hi there ").is_valid());
    }

    #[test]
    fn email_rule() {
        let r = rule(FieldType::EmailBox);
        assert!(validate_text(r, true, "a@b.co").is_valid());
        assert!(validate_text(r, true, " jane.doe@example.org ").is_valid());
        assert!(!validate_text(r, true, "not-an-email").is_valid());
        assert!(!validate_text(r, true, "a@b.c").is_valid());
        let err = validate_text(r, true, "nope").error().cloned().expect("invalid");
        assert_eq!(err.code, ERROR_CODE_PATTERN);
        assert_eq!(err.message, "Please insert a valid email address");
    }

    #[test]
    fn number_rule() {
        let r = rule(FieldType::NumberBox);
        assert!(validate_text(r, true, "12345").is_valid());
        assert!(!validate_text(r, true, "12a45").is_valid());
        assert!(!validate_text(r, true, "").is_valid());
        assert!(!validate_text(r, true, "-3").is_valid());
    }

    #[test]
    fn telephone_rule() {
        let r = rule(FieldType::TelephoneBox);
        assert!(validate_text(r, true, "(+23) 2343 - 2342").is_valid());
        assert!(validate_text(r, true, "123456").is_valid());
        assert!(!validate_text(r, true, "12345").is_valid());
        assert!(!validate_text(r, true, "call me maybe").is_valid());
    }

    #[test]
    fn not_required_is_always_valid() {
        for t in [
            FieldType::TextBox,
            FieldType::EmailBox,
            FieldType::NumberBox,
            FieldType::TelephoneBox,
        ] {
            assert!(validate_text(rule(t), false, "").is_valid());
            assert!(validate_text(rule(t), false, "!!").is_valid());
        }
        assert!(validate_options(false, &[false, false]).is_valid());
        assert!(validate_dropdown(false, "").is_valid());
        assert!(validate_date(false, "  /  /    ").is_valid());
    }

    #[test]
    fn options_need_one_checked() {
        assert!(!validate_options(true, &[]).is_valid());
        assert!(!validate_options(true, &[false, false]).is_valid());
        assert!(validate_options(true, &[false, true]).is_valid());
    }

    #[test]
    fn date_needs_exactly_eight_digits() {
        assert!(validate_date(true, "01/02/1990").is_valid());
        assert!(!validate_date(true, "01/02/199 ").is_valid());
        assert!(!validate_date(true, "  /  /    ").is_valid());
    }

    #[test]
    fn generic_rule_needs_content() {
        let err = validate_required(true, " \t ").error().cloned().expect("invalid");
        assert_eq!(err.code, ERROR_CODE_REQUIRED);
        assert_eq!(err.message, REQUIRED_MESSAGE);
        assert!(validate_required(true, "x").is_valid());
        assert!(validate_required(false, "").is_valid());
        assert!(!validate_required_items(true, 0).is_valid());
        assert!(validate_required_items(true, 2).is_valid());
        assert!(validate_required_items(false, 0).is_valid());
    }

    #[test]
    fn non_text_types_have_no_rule() {
        assert!(text_rule(FieldType::Dropdown).is_none());
        assert!(text_rule(FieldType::DateField).is_none());
    }
}
