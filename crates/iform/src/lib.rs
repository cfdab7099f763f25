#![forbid(unsafe_code)]

//! iform public facade crate.
//!
//! Re-exports the types a host needs to build, drive, and draw a form, plus
//! file loaders for configuration and settings documents.
//!
//! ```
//! use iform::prelude::*;
//!
//! let configs = parse_config(r#"[{"key": "q", "type": "EmailBox", "title": "Email"}]"#)?;
//! let mut form = SlideForm::new(&configs, 40, 12)?;
//! form.on_submit(|event| assert_eq!(event.answers.len(), 1));
//! assert_eq!(form.submit(), SubmitOutcome::Sent { answers: 1 });
//! # Ok::<(), iform::Error>(())
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use iform_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, TouchEvent, TouchPhase, WheelEvent,
};
pub use iform_core::geometry::Rect;

// --- Field re-exports ------------------------------------------------------

pub use iform_fields::{
    ConfigError, Field, FieldConfig, FieldRegistry, FieldType, FieldValue, FieldWidget,
    OptionItem, ValidationError, parse_config,
};

// --- Runtime re-exports ----------------------------------------------------

pub use iform_runtime::{
    AnswerRecord, CompletionEvent, Direction, FormError, FormSettings, ResizeHub, SlideForm,
    StackForm, SubmitEvent, SubmitOutcome,
};

// --- Render re-exports -----------------------------------------------------

pub use iform_render::{
    Buffer, Cell, Color, Style, StyleFlags, Theme, buffer_to_text, render_slide_form,
    render_stack_form,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for iform hosts.
#[derive(Debug)]
pub enum Error {
    /// Reading a document failed.
    Io(std::io::Error),
    /// The settings document is malformed.
    Settings(serde_json::Error),
    /// Building or driving a form failed.
    Form(FormError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Settings(err) => write!(f, "invalid settings: {err}"),
            Self::Form(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Settings(err) => Some(err),
            Self::Form(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<FormError> for Error {
    fn from(err: FormError) -> Self {
        Self::Form(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Form(FormError::Config(err))
    }
}

/// Standard result type for iform hosts.
pub type Result<T> = std::result::Result<T, Error>;

// --- Loaders --------------------------------------------------------------

/// Read and parse a configuration document (an array of fields or a
/// `{"questions": [...]}` object).
pub fn load_config(path: impl AsRef<Path>) -> Result<Vec<FieldConfig>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_config(&text)?)
}

/// Read a settings document. Missing keys keep their defaults.
pub fn load_settings(path: impl AsRef<Path>) -> Result<FormSettings> {
    let text = fs::read_to_string(path)?;
    FormSettings::from_json(&text).map_err(Error::Settings)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Buffer, Direction, Error, Event, FieldConfig, FieldRegistry, FieldWidget, FormSettings,
        KeyCode, KeyEvent, Rect, ResizeHub, Result, SlideForm, StackForm, SubmitEvent,
        SubmitOutcome, Theme, parse_config, render_slide_form, render_stack_form,
    };
}
