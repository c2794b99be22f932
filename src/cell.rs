//! A single terminal cell: a grapheme, its style, and the display width it occupies.

use crate::style::Style;
use crate::width::string_width;

/// Zero-width space used to mark the continuation cell(s) of a wide glyph.
pub const CONTINUATION_MARKER: &str = "\u{200B}";

/// One cell of the terminal grid.
///
/// A cell holding a wide (2-column) glyph occupies two adjacent `Cell`
/// entries in a [`crate::buffer::Buffer`] row: the first carries the glyph
/// and `width == 2`, the second is a continuation cell carrying
/// [`CONTINUATION_MARKER`] and `width == 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// The glyph text (normally one grapheme; may be empty for a blank cell).
    pub grapheme: String,
    /// Style applied to this cell.
    pub style: Style,
    /// Display width occupied by `grapheme`: 0 (continuation), 1, or 2.
    pub width: u8,
}

impl Cell {
    /// Create a cell holding `grapheme`, with width computed via [`string_width`].
    ///
    /// Width is clamped to at most 2: a caller passing a multi-codepoint
    /// cluster wider than that is a misuse this type does not try to police
    /// further than clamping, since a single `Cell` can only ever represent
    /// up to a double-width glyph.
    pub fn new(grapheme: impl Into<String>, style: Style) -> Self {
        let grapheme = grapheme.into();
        let width = string_width(&grapheme).min(2) as u8;
        Self { grapheme, style, width }
    }

    /// A blank (single space, default style) cell.
    pub fn blank() -> Self {
        Self {
            grapheme: " ".to_string(),
            style: Style::default(),
            width: 1,
        }
    }

    /// The zero-width continuation cell that follows a wide glyph's primary cell.
    pub fn continuation(style: Style) -> Self {
        Self {
            grapheme: CONTINUATION_MARKER.to_string(),
            style,
            width: 0,
        }
    }

    /// Whether this is a blank cell (a single space with default style).
    pub fn is_blank(&self) -> bool {
        self.grapheme == " " && self.style == Style::default()
    }

    /// Whether this cell carries a double-width glyph.
    pub fn is_wide(&self) -> bool {
        self.width == 2
    }

    /// Whether this is the continuation half of a wide glyph.
    pub fn is_continuation(&self) -> bool {
        self.width == 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
