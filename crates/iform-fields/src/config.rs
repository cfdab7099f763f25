#![forbid(unsafe_code)]

//! Host-supplied field configuration.
//!
//! Configs are immutable once handed to a form. The JSON shape uses the
//! camelCase names hosts already send (`disabledIndexes`, `primitiveType`),
//! and a document may be either a bare array or `{ "questions": [...] }`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key reserved for the trailing submit control.
pub const SUBMIT_KEY: &str = "submit";

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Built-in field types, named as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    TextBox,
    TextArea,
    EmailBox,
    NumberBox,
    TelephoneBox,
    DateField,
    Dropdown,
    CountryDropdown,
    RadioButtons,
    Checkboxes,
}

impl FieldType {
    /// All built-in types.
    pub const ALL: [FieldType; 10] = [
        Self::TextBox,
        Self::TextArea,
        Self::EmailBox,
        Self::NumberBox,
        Self::TelephoneBox,
        Self::DateField,
        Self::Dropdown,
        Self::CountryDropdown,
        Self::RadioButtons,
        Self::Checkboxes,
    ];

    /// Configuration name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TextBox => "TextBox",
            Self::TextArea => "TextArea",
            Self::EmailBox => "EmailBox",
            Self::NumberBox => "NumberBox",
            Self::TelephoneBox => "TelephoneBox",
            Self::DateField => "DateField",
            Self::Dropdown => "Dropdown",
            Self::CountryDropdown => "CountryDropdown",
            Self::RadioButtons => "RadioButtons",
            Self::Checkboxes => "Checkboxes",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Raw option value: hosts send either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(i64),
    Text(String),
}

impl OptionValue {
    /// `0` and `""` count as "no value"; the caption is used instead.
    fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One selectable option of a dropdown, radio, or checkbox field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<OptionValue>,
    pub caption: String,
}

impl OptionItem {
    /// Option with an explicit value.
    pub fn new(value: impl Into<OptionValue>, caption: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            caption: caption.into(),
        }
    }

    /// Option identified by its caption alone.
    pub fn caption(caption: impl Into<String>) -> Self {
        Self {
            value: None,
            caption: caption.into(),
        }
    }

    /// The value submitted for this option: `value`, or the caption when the
    /// value is missing or blank.
    #[must_use]
    pub fn effective_value(&self) -> String {
        match &self.value {
            Some(v) if !v.is_blank() => v.to_string(),
            _ => self.caption.clone(),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ---------------------------------------------------------------------------
// FieldConfig
// ---------------------------------------------------------------------------

/// Configuration of a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_indexes: Option<Vec<usize>>,
    /// Fallback type used when `type` names nothing the registry knows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive_type: Option<String>,
}

impl FieldConfig {
    /// Minimal config with no options, placeholder, or fallback.
    pub fn new(
        key: impl Into<String>,
        field_type: FieldType,
        title: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            key: key.into(),
            field_type: field_type.name().to_string(),
            title: title.into(),
            required,
            options: None,
            placeholder: None,
            disabled_indexes: None,
            primitive_type: None,
        }
    }

    /// Set the option list (builder).
    #[must_use]
    pub fn with_options(mut self, options: Vec<OptionItem>) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the placeholder (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the disabled option indexes (builder).
    #[must_use]
    pub fn with_disabled_indexes(mut self, indexes: Vec<usize>) -> Self {
        self.disabled_indexes = Some(indexes);
        self
    }

    /// Set the fallback type (builder).
    #[must_use]
    pub fn with_primitive_type(mut self, fallback: FieldType) -> Self {
        self.primitive_type = Some(fallback.name().to_string());
        self
    }

    /// Options, or an empty slice.
    #[must_use]
    pub fn options(&self) -> &[OptionItem] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Disabled option indexes, or an empty slice.
    #[must_use]
    pub fn disabled_indexes(&self) -> &[usize] {
        self.disabled_indexes.as_deref().unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// A host configuration mistake. Always fatal to the call that found it.
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON or does not have the expected shape.
    Parse(serde_json::Error),
    /// A field has an empty key.
    EmptyKey { index: usize },
    /// Two fields share a key.
    DuplicateKey(String),
    /// A field uses the key reserved for the submit control.
    ReservedKey(String),
    /// Neither `type` nor `primitiveType` names a known constructor.
    UnknownType { key: String, type_name: String },
    /// An option-based field has no options.
    MissingOptions { key: String },
    /// A disabled index points past the end of the option list.
    DisabledIndexOutOfRange { key: String, index: usize, len: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid form configuration: {e}"),
            Self::EmptyKey { index } => write!(f, "field #{index} has an empty key"),
            Self::DuplicateKey(key) => write!(f, "duplicate field key: {key}"),
            Self::ReservedKey(key) => {
                write!(f, "field key {key:?} is reserved for the submit control")
            }
            Self::UnknownType { key, type_name } => {
                write!(f, "field {key}: unknown field type {type_name:?}")
            }
            Self::MissingOptions { key } => write!(f, "field {key}: options are required"),
            Self::DisabledIndexOutOfRange { key, index, len } => write!(
                f,
                "field {key}: disabled index {index} is out of range for {len} options"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    List(Vec<FieldConfig>),
    Wrapped { questions: Vec<FieldConfig> },
}

/// Parse a JSON configuration document and check its keys.
pub fn parse_config(json: &str) -> Result<Vec<FieldConfig>, ConfigError> {
    let configs = match serde_json::from_str::<ConfigDocument>(json)? {
        ConfigDocument::List(list) => list,
        ConfigDocument::Wrapped { questions } => questions,
    };
    check_configs(&configs)?;
    Ok(configs)
}

/// Check key rules: non-empty, unique, and not the submit key.
pub fn check_configs(configs: &[FieldConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(configs.len());
    for (index, config) in configs.iter().enumerate() {
        if config.key.is_empty() {
            return Err(ConfigError::EmptyKey { index });
        }
        if config.key == SUBMIT_KEY {
            return Err(ConfigError::ReservedKey(config.key.clone()));
        }
        if !seen.insert(config.key.as_str()) {
            return Err(ConfigError::DuplicateKey(config.key.clone()));
        }
    }
    Ok(())
}
