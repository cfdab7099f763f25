#![forbid(unsafe_code)]

//! Copying a rendered buffer to the terminal with crossterm.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor,
};
use iform::{Buffer, Color, Style, StyleFlags};

const ATTRIBUTES: [(StyleFlags, Attribute); 5] = [
    (StyleFlags::BOLD, Attribute::Bold),
    (StyleFlags::DIM, Attribute::Dim),
    (StyleFlags::ITALIC, Attribute::Italic),
    (StyleFlags::UNDERLINE, Attribute::Underlined),
    (StyleFlags::REVERSE, Attribute::Reverse),
];

/// Write every row of `buf`, emitting style changes only between cells
/// that differ.
pub fn present(out: &mut impl Write, buf: &Buffer) -> io::Result<()> {
    for y in 0..buf.height() {
        queue!(out, MoveTo(0, y))?;
        let mut current: Option<Style> = None;
        for cell in buf.row(y) {
            if cell.is_continuation() {
                continue;
            }
            if current != Some(cell.style) {
                apply_style(out, cell.style)?;
                current = Some(cell.style);
            }
            queue!(out, Print(cell.grapheme().unwrap_or(" ")))?;
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    }
    out.flush()
}

fn apply_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(term_color(style.fg))
    )?;
    for (flag, attribute) in ATTRIBUTES {
        if style.flags.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Red => TermColor::Red,
        Color::Green => TermColor::Green,
        Color::Yellow => TermColor::Yellow,
        Color::Blue => TermColor::Blue,
        Color::Cyan => TermColor::Cyan,
        Color::Gray => TermColor::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_text_and_styles() {
        let mut buf = Buffer::new(6, 2);
        buf.draw_str(0, 0, "hi", Style::PLAIN, 6);
        buf.draw_str(0, 1, "yo", Style::PLAIN.flags(StyleFlags::BOLD), 6);
        let mut out = Vec::new();
        present(&mut out, &buf).expect("write to vec");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("hi"));
        assert!(text.contains("yo"));
        // bold is SGR 1
        assert!(text.contains("\u{1b}[1m"));
    }

    #[test]
    fn wide_graphemes_are_printed_once() {
        let mut buf = Buffer::new(3, 1);
        buf.draw_str(0, 0, "界", Style::PLAIN, 3);
        let mut out = Vec::new();
        present(&mut out, &buf).expect("write to vec");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches('界').count(), 1);
    }
}
