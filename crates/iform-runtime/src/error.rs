#![forbid(unsafe_code)]

use std::fmt;

use iform_fields::ConfigError;

use crate::navigation::NavError;
use crate::scroll::ScrollError;

/// Errors surfaced by a form. Each one is a host programming mistake and is
/// fatal to the call that produced it.
#[derive(Debug)]
pub enum FormError {
    Config(ConfigError),
    Nav(NavError),
    Scroll(ScrollError),
    /// `add_event_listener` was called with an event name other than
    /// `"submit"`.
    UnsupportedEvent(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Nav(e) => write!(f, "navigation error: {e}"),
            Self::Scroll(e) => write!(f, "scroll error: {e}"),
            Self::UnsupportedEvent(name) => write!(f, "unsupported event: {name:?}"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Nav(e) => Some(e),
            Self::Scroll(e) => Some(e),
            Self::UnsupportedEvent(_) => None,
        }
    }
}

impl From<ConfigError> for FormError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<NavError> for FormError {
    fn from(e: NavError) -> Self {
        Self::Nav(e)
    }
}

impl From<ScrollError> for FormError {
    fn from(e: ScrollError) -> Self {
        Self::Scroll(e)
    }
}
