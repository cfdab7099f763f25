#![forbid(unsafe_code)]

//! Submission: validating every field and delivering the answers.
//!
//! [`FormCore`] is shared by both form presentations. It owns the fields,
//! the submit control's aggregate error, and the submit listeners.

use std::fmt;

use iform_fields::{ConfigError, Field, FieldConfig, FieldRegistry, FieldValue, FieldWidget};
use serde::Serialize;

use crate::error::FormError;

/// Event name accepted by [`FormCore::add_event_listener`].
pub const SUBMIT_EVENT: &str = "submit";

/// Caption of the submit control.
pub const SUBMIT_LABEL: &str = "Submit";

/// Aggregate message shown on the submit control when `failed` fields are
/// invalid.
pub fn aggregate_message(failed: usize) -> String {
    format!("{failed} fields need to be completed.")
}

/// One answered question: its config with the answer alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    #[serde(flatten)]
    pub config: FieldConfig,
    pub answer: FieldValue,
}

/// Delivered to submit listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitEvent {
    pub answers: Vec<AnswerRecord>,
}

/// Delivered to completion listeners whenever a question's completed flag
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEvent {
    pub key: String,
    pub completed: bool,
    /// Completed questions after the change.
    pub completed_count: usize,
    pub total: usize,
}

impl CompletionEvent {
    /// Fraction of questions completed.
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed_count as f32 / self.total as f32
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; listeners received this many answers.
    Sent { answers: usize },
    /// This many fields failed; nothing was delivered.
    Rejected { failed: usize },
}

/// Ordered list of event handlers.
pub struct Listeners<E> {
    handlers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.handlers.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn push(&mut self, handler: impl FnMut(&E) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Call every handler in registration order.
    pub fn emit(&mut self, event: &E) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Fields plus the submit machinery.
#[derive(Debug)]
pub struct FormCore {
    fields: Vec<Field>,
    submit_error: Option<String>,
    submit_listeners: Listeners<SubmitEvent>,
}

impl FormCore {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            submit_error: None,
            submit_listeners: Listeners::default(),
        }
    }

    /// Build every field through `registry`.
    pub fn from_configs(
        registry: &FieldRegistry,
        configs: &[FieldConfig],
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(registry.build_all(configs)?))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Aggregate error shown on the submit control.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Register a handler by event name. Only `"submit"` is supported.
    pub fn add_event_listener(
        &mut self,
        event: &str,
        handler: impl FnMut(&SubmitEvent) + 'static,
    ) -> Result<(), FormError> {
        if event != SUBMIT_EVENT {
            return Err(FormError::UnsupportedEvent(event.to_string()));
        }
        self.on_submit(handler);
        Ok(())
    }

    /// Register a submit handler.
    pub fn on_submit(&mut self, handler: impl FnMut(&SubmitEvent) + 'static) {
        self.submit_listeners.push(handler);
    }

    /// Current answers in field order.
    pub fn answers(&self) -> Vec<AnswerRecord> {
        self.fields
            .iter()
            .map(|f| AnswerRecord {
                config: f.config().clone(),
                answer: f.value(),
            })
            .collect()
    }

    /// Validate every field and, if all pass, deliver the answers.
    ///
    /// All fields are validated even after the first failure, so each one
    /// shows its own message.
    pub fn submit(&mut self) -> SubmitOutcome {
        let failed = self
            .fields
            .iter_mut()
            .map(|f| f.validate())
            .filter(|ok| !ok)
            .count();
        if failed > 0 {
            iform_core::debug!(failed, "submit rejected");
            self.submit_error = Some(aggregate_message(failed));
            return SubmitOutcome::Rejected { failed };
        }
        self.submit_error = None;
        let event = SubmitEvent {
            answers: self.answers(),
        };
        iform_core::info!(
            answers = event.answers.len(),
            listeners = self.submit_listeners.len(),
            "form submitted"
        );
        self.submit_listeners.emit(&event);
        SubmitOutcome::Sent {
            answers: event.answers.len(),
        }
    }
}
