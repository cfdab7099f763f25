#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. A wide grapheme is written whole or not at all
//! 3. Overwriting half of a wide grapheme clears the other half

use iform_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, Style};

/// A 2D grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer. Zero dimensions give an empty buffer that
    /// ignores every write.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Cells of row `y`; empty when out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        match self.index(0, y) {
            Some(start) => &self.cells[start..start + usize::from(self.width)],
            None => &[],
        }
    }

    /// Set the cell at (x, y), handling wide graphemes. Out-of-range and
    /// partially fitting wide writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.content.width().max(1);
        let Some(last) = x.checked_add(width as u16 - 1) else {
            return;
        };
        if self.index(last, y).is_none() {
            return;
        }
        for dx in 0..width as u16 {
            self.clear_overlap(x + dx, y);
        }
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
        for dx in 1..width as u16 {
            if let Some(i) = self.index(x + dx, y) {
                self.cells[i] = Cell::CONTINUATION;
            }
        }
    }

    /// Blank out whatever wide grapheme covers (x, y).
    fn clear_overlap(&mut self, x: u16, y: u16) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.cells[i].is_continuation() {
            // walk back to the head
            let mut hx = x;
            while hx > 0 {
                hx -= 1;
                let Some(h) = self.index(hx, y) else { break };
                let head = !self.cells[h].is_continuation();
                self.cells[h] = Cell::default();
                if head {
                    break;
                }
            }
        } else if self.cells[i].content.width() > 1 {
            let mut tx = x + 1;
            while let Some(t) = self.index(tx, y) {
                if !self.cells[t].is_continuation() {
                    break;
                }
                self.cells[t] = Cell::default();
                tx += 1;
            }
        }
        self.cells[i] = Cell::default();
    }

    /// Draw `text` starting at (x, y), stopping before `max_x`. Returns the
    /// column after the last drawn grapheme.
    pub fn draw_str(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        let mut cx = x;
        for g in text.graphemes(true) {
            let w = g.width();
            if w == 0 {
                continue;
            }
            let Some(end) = cx.checked_add(w as u16) else {
                break;
            };
            if end > max_x {
                break;
            }
            self.set(cx, y, Cell::new(g, style));
            cx = end;
        }
        cx
    }

    /// Apply `style` to cells `x..x + len` of row `y`, keeping their content.
    pub fn restyle(&mut self, x: u16, y: u16, len: u16, style: Style) {
        for cx in x..x.saturating_add(len) {
            if let Some(i) = self.index(cx, y) {
                self.cells[i].style = style;
            }
        }
    }

    /// Reset every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

/// Plain-text rendering of a buffer: one line per row, blanks as spaces.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let mut out = String::with_capacity((usize::from(buf.width()) + 1) * usize::from(buf.height()));
    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        for cell in buf.row(y) {
            match cell.grapheme() {
                Some(g) => out.push_str(g),
                None if cell.is_continuation() => {}
                None => out.push(' '),
            }
        }
    }
    out
}
