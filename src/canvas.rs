//! A clipped drawing surface over a sub-rectangle of a [`Buffer`].

use crate::buffer::Buffer;
use crate::cell::Cell;
use crate::geometry::{Position, Rect};
use crate::style::Style;
use crate::width::rune_width;

/// Box-drawing characters used by [`TerminalCanvas::draw_border`].
mod border_chars {
    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const TOP_LEFT: char = '┌';
    pub const TOP_RIGHT: char = '┐';
    pub const BOTTOM_LEFT: char = '└';
    pub const BOTTOM_RIGHT: char = '┘';
}

/// A drawing surface clipped to a sub-rectangle of a [`Buffer`], in that
/// buffer's coordinate space.
///
/// All `draw_*` calls take canvas-local coordinates (origin at the canvas
/// rect's top-left) and are clipped to the canvas rect before writing.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    rect: Rect,
}

impl<'a> TerminalCanvas<'a> {
    /// Create a canvas over `rect` of `buffer`.
    pub fn new(buffer: &'a mut Buffer, rect: Rect) -> Self {
        Self { buffer, rect }
    }

    /// The canvas's clipping rectangle, in buffer coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn to_buffer(&self, local: Position) -> Position {
        self.rect.position.translate(local.x, local.y)
    }

    fn in_clip(&self, buffer_pos: Position) -> bool {
        self.rect.contains(buffer_pos)
    }

    /// Draw a single cell at canvas-local `pos`, clipped to the canvas rect.
    ///
    /// A wide (2-column) glyph also occupies `buffer_pos + (1, 0)` in the
    /// buffer's coordinate space (its continuation cell); that column is
    /// checked against the clip rect too, so a wide glyph at the canvas's
    /// rightmost column never bleeds its continuation marker into whatever
    /// sits past the clip rect's right edge.
    fn set_cell(&mut self, pos: Position, cell: Cell) {
        let buffer_pos = self.to_buffer(pos);
        if !self.in_clip(buffer_pos) {
            return;
        }
        if cell.width == 2 && !self.in_clip(buffer_pos.translate(1, 0)) {
            self.buffer.set(buffer_pos.x, buffer_pos.y, Cell::blank());
            return;
        }
        self.buffer.set(buffer_pos.x, buffer_pos.y, cell);
    }

    /// Draw `text` starting at canvas-local `offset`, advancing one column
    /// right per [`rune_width`] of each codepoint.
    ///
    /// Zero-width codepoints (combining marks, ZWJ, ZWSP, variation
    /// selectors) are not written as cells at all: the write cursor does not
    /// advance for them, and they contribute no glyph of their own.
    pub fn draw_text(&mut self, offset: Position, text: &str, style: Style) {
        let mut cursor = offset;
        for ch in text.chars() {
            let w = rune_width(ch as u32);
            if w == 0 {
                continue;
            }
            let mut buf = [0u8; 4];
            let grapheme = ch.encode_utf8(&mut buf);
            self.set_cell(cursor, Cell::new(grapheme.to_string(), style));
            cursor.x = cursor.x.saturating_add(w as u16);
        }
    }

    /// Fill `rect` (canvas-local) with blank cells styled with `style`.
    pub fn draw_rect(&mut self, rect: Rect, style: Style) {
        self.fill(rect, Cell::new(" ", style));
    }

    /// Fill `rect` (canvas-local) with `cell`.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        for y in rect.position.y..rect.bottom() {
            for x in rect.position.x..rect.right() {
                self.set_cell(Position::new(x, y), cell.clone());
            }
        }
    }

    /// Draw a single-line box border around `rect` (canvas-local).
    pub fn draw_border(&mut self, rect: Rect, style: Style) {
        if rect.is_empty() {
            return;
        }
        let left = rect.position.x;
        let top = rect.position.y;
        let right = rect.right().saturating_sub(1);
        let bottom = rect.bottom().saturating_sub(1);

        self.set_cell(Position::new(left, top), Cell::new(border_chars::TOP_LEFT.to_string(), style));
        self.set_cell(Position::new(right, top), Cell::new(border_chars::TOP_RIGHT.to_string(), style));
        self.set_cell(Position::new(left, bottom), Cell::new(border_chars::BOTTOM_LEFT.to_string(), style));
        self.set_cell(Position::new(right, bottom), Cell::new(border_chars::BOTTOM_RIGHT.to_string(), style));

        for x in (left + 1)..right {
            self.set_cell(Position::new(x, top), Cell::new(border_chars::HORIZONTAL.to_string(), style));
            self.set_cell(Position::new(x, bottom), Cell::new(border_chars::HORIZONTAL.to_string(), style));
        }
        for y in (top + 1)..bottom {
            self.set_cell(Position::new(left, y), Cell::new(border_chars::VERTICAL.to_string(), style));
            self.set_cell(Position::new(right, y), Cell::new(border_chars::VERTICAL.to_string(), style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn draw_text_writes_glyphs_and_advances_cursor() {
        let mut buf = Buffer::new(Size::new(10, 1));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 10, 1));
            canvas.draw_text(Position::new(0, 0), "hi", Style::default());
        }
        assert_eq!(buf.get(0, 0).expect("in bounds").grapheme, "h");
        assert_eq!(buf.get(1, 0).expect("in bounds").grapheme, "i");
    }

    #[test]
    fn draw_text_skips_zero_width_codepoints() {
        let mut buf = Buffer::new(Size::new(10, 1));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 10, 1));
            canvas.draw_text(Position::new(0, 0), "a\u{200D}b", Style::default());
        }
        assert_eq!(buf.get(0, 0).expect("in bounds").grapheme, "a");
        assert_eq!(buf.get(1, 0).expect("in bounds").grapheme, "b");
    }

    #[test]
    fn draw_text_clips_at_canvas_edge() {
        let mut buf = Buffer::new(Size::new(10, 1));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 3, 1));
            canvas.draw_text(Position::new(0, 0), "abcdef", Style::default());
        }
        assert_eq!(buf.get(2, 0).expect("in bounds").grapheme, "c");
        assert!(buf.get(3, 0).expect("in bounds").is_blank());
    }

    #[test]
    fn canvas_offset_translates_local_to_buffer_coords() {
        let mut buf = Buffer::new(Size::new(10, 10));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(2, 2, 5, 5));
            canvas.draw_text(Position::new(0, 0), "x", Style::default());
        }
        assert_eq!(buf.get(2, 2).expect("in bounds").grapheme, "x");
    }

    #[test]
    fn fill_fills_rect() {
        let mut buf = Buffer::new(Size::new(5, 5));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 5, 5));
            canvas.fill(Rect::new(1, 1, 2, 2), Cell::new("#", Style::default()));
        }
        assert_eq!(buf.get(1, 1).expect("in bounds").grapheme, "#");
        assert_eq!(buf.get(2, 2).expect("in bounds").grapheme, "#");
        assert!(buf.get(0, 0).expect("in bounds").is_blank());
    }

    #[test]
    fn wide_glyph_at_canvas_right_edge_does_not_bleed_continuation_past_clip() {
        let mut buf = Buffer::new(Size::new(10, 1));
        {
            // Canvas occupies columns 0..4; a wide glyph at its last local
            // column (x=3, buffer x=3) would need buffer column 4 for its
            // continuation cell, which lies outside the clip rect.
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 4, 1));
            canvas.draw_text(Position::new(3, 0), "\u{4E2D}", Style::default());
        }
        assert!(buf.get(3, 0).expect("in bounds").is_blank());
        assert!(buf.get(4, 0).expect("in bounds").is_blank());
        assert!(!buf.get(4, 0).expect("in bounds").is_continuation());
    }

    #[test]
    fn draw_border_draws_corners_and_edges() {
        let mut buf = Buffer::new(Size::new(5, 3));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 5, 3));
            canvas.draw_border(Rect::new(0, 0, 5, 3), Style::default());
        }
        assert_eq!(buf.get(0, 0).expect("in bounds").grapheme, "┌");
        assert_eq!(buf.get(4, 0).expect("in bounds").grapheme, "┐");
        assert_eq!(buf.get(0, 2).expect("in bounds").grapheme, "└");
        assert_eq!(buf.get(4, 2).expect("in bounds").grapheme, "┘");
        assert_eq!(buf.get(2, 0).expect("in bounds").grapheme, "─");
        assert_eq!(buf.get(0, 1).expect("in bounds").grapheme, "│");
    }
}
