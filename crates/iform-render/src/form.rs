#![forbid(unsafe_code)]

//! Drawing both form presentations into a [`Buffer`].
//!
//! Nodes are placed at their layout extent minus the scroll offset, so a
//! slide in flight shows as rows moving between frames. Rows that fall
//! outside the area are skipped.

use iform_core::geometry::Rect;
use iform_fields::{BodyLine, Field, FieldWidget};
use iform_runtime::{FormLayout, SUBMIT_LABEL, SlideForm, StackForm, Viewport};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::buffer::Buffer;
use crate::cell::{Style, StyleFlags};
use crate::theme::Theme;

/// Left margin of titles.
const MARGIN: u16 = 2;
/// Extra indent of body lines.
const BODY_INDENT: u16 = 2;

/// Draw a slide form: the scrolled questions plus a progress row at the
/// bottom of `area`.
pub fn render_slide_form(form: &SlideForm, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let (content, bar) = area.split_bottom(1);
    let ui = form.ui_state();
    let canvas = Canvas::new(content, form.viewport(), form.layout());
    for (index, field) in form.fields().iter().enumerate() {
        let node = NodeStyle {
            focused: form.focused() == Some(index),
            dim: ui.node(index).is_some_and(|n| !n.active),
        };
        canvas.draw_field(buf, index, field, node, theme);
    }
    let submit = ui.submit_index();
    let node = NodeStyle {
        focused: form.focused() == Some(submit),
        dim: !ui.submit().active,
    };
    canvas.draw_submit(buf, submit, form.submit_error(), node, theme);
    draw_progress(buf, bar, ui.completed_count(), form.fields().len(), theme);
}

/// Draw a stack form: every question at full intensity.
pub fn render_stack_form(form: &StackForm, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let canvas = Canvas::new(area, form.viewport(), form.layout());
    for (index, field) in form.fields().iter().enumerate() {
        let node = NodeStyle {
            focused: form.focused() == index,
            dim: false,
        };
        canvas.draw_field(buf, index, field, node, theme);
    }
    let submit = form.submit_index();
    let node = NodeStyle {
        focused: form.focused() == submit,
        dim: false,
    };
    canvas.draw_submit(buf, submit, form.submit_error(), node, theme);
}

/// Draw `"<done>/<total> answered"` followed by a bar filling the rest of
/// the row.
pub fn draw_progress(buf: &mut Buffer, area: Rect, done: usize, total: usize, theme: &Theme) {
    if area.is_empty() {
        return;
    }
    let label = format!("{done}/{total} answered ");
    let x = buf.draw_str(area.x, area.y, &label, theme.muted, area.right());
    let width = area.right().saturating_sub(x);
    let fraction = if total == 0 {
        1.0
    } else {
        done as f32 / total as f32
    };
    let filled = (f32::from(width) * fraction).round() as u16;
    for i in 0..width {
        let (glyph, style) = if i < filled {
            ("█", theme.progress_fill)
        } else {
            ("░", theme.progress_empty)
        };
        buf.draw_str(x + i, area.y, glyph, style, area.right());
    }
}

#[derive(Debug, Clone, Copy)]
struct NodeStyle {
    focused: bool,
    dim: bool,
}

impl NodeStyle {
    fn apply(self, style: Style, theme: &Theme) -> Style {
        if self.dim {
            style.add(theme.inactive)
        } else {
            style
        }
    }
}

/// Maps content rows onto an area.
struct Canvas<'a> {
    area: Rect,
    offset: f32,
    layout: &'a FormLayout,
}

impl<'a> Canvas<'a> {
    fn new(area: Rect, viewport: &Viewport, layout: &'a FormLayout) -> Self {
        Self {
            area,
            offset: viewport.offset(),
            layout,
        }
    }

    /// Screen row of row `r` of node `index`, if visible.
    fn row(&self, index: usize, r: usize) -> Option<u16> {
        let extent = self.layout.extent(index)?;
        let y = (extent.top - self.offset).floor() as i64 + r as i64;
        (0..i64::from(self.area.height))
            .contains(&y)
            .then(|| self.area.y + y as u16)
    }

    fn left(&self) -> u16 {
        self.area.x + MARGIN.min(self.area.width)
    }

    fn right(&self) -> u16 {
        self.area.right()
    }

    fn draw_field(
        &self,
        buf: &mut Buffer,
        index: usize,
        field: &Field,
        node: NodeStyle,
        theme: &Theme,
    ) {
        let config = field.config();
        if let Some(y) = self.row(index, 0) {
            let marker = if config.required { " *" } else { "" };
            let title = format!("{}. {}{marker}", index + 1, config.title);
            buf.draw_str(self.left(), y, &title, node.apply(theme.title, theme), self.right());
        }
        let lines = field.body_lines(node.focused);
        for (r, line) in lines.iter().enumerate() {
            if let Some(y) = self.row(index, r + 1) {
                self.draw_body_line(buf, y, line, node, theme);
            }
        }
        if let (Some(error), Some(y)) = (field.error(), self.row(index, lines.len() + 1)) {
            buf.draw_str(self.left(), y, error, node.apply(theme.error, theme), self.right());
        }
    }

    fn draw_body_line(
        &self,
        buf: &mut Buffer,
        y: u16,
        line: &BodyLine,
        node: NodeStyle,
        theme: &Theme,
    ) {
        let x = self.left().saturating_add(BODY_INDENT);
        buf.draw_str(x, y, &line.text, node.apply(theme.tone(line.tone), theme), self.right());
        let Some(caret) = line.caret.filter(|_| node.focused) else {
            return;
        };
        let before: String = line.text.graphemes(true).take(caret).collect();
        let cx = x.saturating_add(before.width() as u16);
        match line.text.graphemes(true).nth(caret) {
            Some(g) => buf.restyle(cx, y, g.width().max(1) as u16, theme.caret),
            None => {
                buf.draw_str(cx, y, " ", theme.caret, self.right());
            }
        }
    }

    fn draw_submit(
        &self,
        buf: &mut Buffer,
        index: usize,
        error: Option<&str>,
        node: NodeStyle,
        theme: &Theme,
    ) {
        if let Some(y) = self.row(index, 0) {
            let style = if node.focused {
                theme.submit_focused
            } else {
                node.apply(theme.submit, theme)
            };
            buf.draw_str(self.left(), y, &format!("[ {SUBMIT_LABEL} ]"), style, self.right());
        }
        if let (Some(error), Some(y)) = (error, self.row(index, 1)) {
            let style = node.apply(theme.error, theme).add(StyleFlags::BOLD);
            buf.draw_str(self.left(), y, error, style, self.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::buffer_to_text;
    use crate::cell::Color;

    #[test]
    fn progress_row_fills_proportionally() {
        let mut buf = Buffer::new(20, 1);
        let area = buf.bounds();
        draw_progress(&mut buf, area, 1, 2, &Theme::default());
        assert_eq!(buffer_to_text(&buf), "1/2 answered ████░░░");
        assert_eq!(buf.get(13, 0).map(|c| c.style.fg), Some(Color::Green));
    }

    #[test]
    fn progress_of_empty_form_is_full() {
        let mut buf = Buffer::new(16, 1);
        let area = buf.bounds();
        draw_progress(&mut buf, area, 0, 0, &Theme::default());
        assert_eq!(buffer_to_text(&buf), "0/0 answered ███");
    }
}
