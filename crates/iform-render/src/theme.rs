#![forbid(unsafe_code)]

//! Styles used when drawing forms.

use iform_fields::Tone;

use crate::cell::{Color, Style, StyleFlags};

/// Every style a form drawing uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub body: Style,
    pub muted: Style,
    pub cursor: Style,
    pub disabled: Style,
    pub caret: Style,
    pub error: Style,
    pub submit: Style,
    pub submit_focused: Style,
    pub progress_fill: Style,
    pub progress_empty: Style,
    /// Added to every style of a node that is not active.
    pub inactive: StyleFlags,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::PLAIN.flags(StyleFlags::BOLD),
            body: Style::PLAIN,
            muted: Style::PLAIN.fg(Color::Gray),
            cursor: Style::PLAIN.fg(Color::Cyan).flags(StyleFlags::BOLD),
            disabled: Style::PLAIN.fg(Color::Gray).flags(StyleFlags::ITALIC),
            caret: Style::PLAIN.flags(StyleFlags::REVERSE),
            error: Style::PLAIN.fg(Color::Red),
            submit: Style::PLAIN.fg(Color::Blue).flags(StyleFlags::BOLD),
            submit_focused: Style::PLAIN
                .fg(Color::Blue)
                .flags(StyleFlags::BOLD.union(StyleFlags::REVERSE)),
            progress_fill: Style::PLAIN.fg(Color::Green),
            progress_empty: Style::PLAIN.fg(Color::Gray),
            inactive: StyleFlags::DIM,
        }
    }
}

impl Theme {
    /// Style of a body line with `tone`.
    pub fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Normal => self.body,
            Tone::Muted => self.muted,
            Tone::Cursor => self.cursor,
            Tone::Disabled => self.disabled,
        }
    }
}
