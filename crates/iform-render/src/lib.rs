#![forbid(unsafe_code)]

//! Rendering: a cell buffer and drawing of iform forms into it.
//!
//! The buffer is backend-neutral. Hosts copy it to their terminal (the demo
//! does so with crossterm) or compare it as text in tests with
//! [`buffer_to_text`].

pub mod buffer;
pub mod cell;
pub mod form;
pub mod theme;

pub use buffer::{Buffer, buffer_to_text};
pub use cell::{Cell, CellContent, Color, Style, StyleFlags};
pub use form::{draw_progress, render_slide_form, render_stack_form};
pub use theme::Theme;
