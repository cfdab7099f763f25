#![forbid(unsafe_code)]

//! Runtime: navigation, scheduling, and scrolling for iform forms.
//!
//! Two presentations share one submission core ([`FormCore`]):
//!
//! - [`SlideForm`] shows one question at a time. Navigation requests go
//!   through a named-channel scheduler ([`AnimationManager`]), activate a
//!   node in an immutable [`UiState`], and slide it to the viewport center
//!   with a [`ScrollSlide`].
//! - [`StackForm`] shows every question in a plain scrollable column.
//!
//! Both are driven by the host: feed input with `handle_event` and, for the
//! slide form, advance time with `tick`.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use iform_fields::parse_config;
//! use iform_runtime::SlideForm;
//!
//! let configs = parse_config(r#"[{"key": "q", "type": "TextBox", "title": "Q"}]"#).unwrap();
//! let mut form = SlideForm::new(&configs, 40, 12).unwrap();
//! form.mount(None);
//! form.tick(Duration::from_millis(400)).unwrap();
//! assert_eq!(form.ui_state().active_key(), Some("q"));
//! ```

pub mod error;
pub mod gesture;
pub mod layout;
pub mod navigation;
pub mod resize;
pub mod scheduler;
pub mod scroll;
pub mod settings;
pub mod slide_form;
pub mod stack_form;
pub mod submit;

pub use error::FormError;
pub use gesture::{TouchTracker, key_direction, wheel_direction};
pub use layout::FormLayout;
pub use navigation::{Direction, FieldUiState, LeadingThrottle, NavCommand, NavError, UiState};
pub use resize::{ResizeHub, ResizeRegistration};
pub use scheduler::{AnimationManager, TaskHandle, UNSHARED};
pub use scroll::{ScrollError, ScrollSlide, SlideEvent, SlideTicket, Viewport};
pub use settings::FormSettings;
pub use slide_form::{RESIZE_CHANNEL, SlideForm, WHEEL_CHANNEL};
pub use stack_form::StackForm;
pub use submit::{
    AnswerRecord, CompletionEvent, FormCore, SUBMIT_EVENT, SUBMIT_LABEL, SubmitEvent,
    SubmitOutcome, aggregate_message,
};
