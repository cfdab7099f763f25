#![forbid(unsafe_code)]

//! Cell types.
//!
//! A [`Cell`] holds one grapheme's worth of display content plus its style.
//! Wide graphemes occupy a head cell followed by [`Cell::CONTINUATION`]
//! cells so every row stays exactly `width` cells long.

use unicode_width::UnicodeWidthStr;

/// Named terminal colors. Hosts map them onto whatever palette they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default color.
    #[default]
    Reset,
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Gray,
}

bitflags::bitflags! {
    /// Cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM       = 0b0000_0010;
        /// Italic text.
        const ITALIC    = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE = 0b0000_1000;
        /// Reverse video (swap fg/bg).
        const REVERSE   = 0b0001_0000;
    }
}

/// Foreground color plus flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub flags: StyleFlags,
}

impl Style {
    pub const PLAIN: Self = Self {
        fg: Color::Reset,
        flags: StyleFlags::empty(),
    };

    #[must_use]
    pub const fn fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[must_use]
    pub const fn flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Add `flags` to the current set.
    #[must_use]
    pub fn add(mut self, flags: StyleFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CellContent {
    /// Nothing drawn; renders as a space.
    #[default]
    Empty,
    /// A grapheme cluster and its display width.
    Grapheme(Box<str>),
    /// Tail of a wide grapheme drawn to the left.
    Continuation,
}

impl CellContent {
    /// Display width in cells.
    pub fn width(&self) -> usize {
        match self {
            Self::Empty => 1,
            Self::Grapheme(g) => g.width(),
            Self::Continuation => 0,
        }
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub content: CellContent,
    pub style: Style,
}

impl Cell {
    /// Tail cell of a wide grapheme.
    pub const CONTINUATION: Self = Self {
        content: CellContent::Continuation,
        style: Style::PLAIN,
    };

    /// A cell holding `grapheme`.
    pub fn new(grapheme: &str, style: Style) -> Self {
        Self {
            content: CellContent::Grapheme(grapheme.into()),
            style,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    #[inline]
    pub fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// The grapheme drawn in this cell, if any.
    pub fn grapheme(&self) -> Option<&str> {
        match &self.content {
            CellContent::Grapheme(g) => Some(g),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(Cell::default().content.width(), 1);
        assert_eq!(Cell::new("a", Style::PLAIN).content.width(), 1);
        assert_eq!(Cell::new("界", Style::PLAIN).content.width(), 2);
        assert_eq!(Cell::CONTINUATION.content.width(), 0);
    }

    #[test]
    fn style_builders() {
        let s = Style::PLAIN
            .fg(Color::Red)
            .flags(StyleFlags::BOLD)
            .add(StyleFlags::UNDERLINE);
        assert_eq!(s.fg, Color::Red);
        assert!(s.flags.contains(StyleFlags::BOLD | StyleFlags::UNDERLINE));
    }
}
