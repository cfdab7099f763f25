#![forbid(unsafe_code)]

//! Core: input events, vertical geometry, and animation primitives.
//!
//! Everything here is independent of how a form is laid out or rendered.
//! Higher crates translate these events into navigation commands and drive
//! the tweens defined in [`animation`].

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
