//! Turns a buffer diff into ANSI: groups changed cells into same-row runs so
//! a cursor move is only emitted once per run rather than once per cell, and
//! optionally wraps the whole frame in DEC synchronized output so a partial
//! redraw is never visible mid-paint.

use crate::buffer::CellChange;
use crate::cell::Cell;
use crate::style::{build_sgr_sequence, Style};
use crate::terminal::seq_move_cursor;

/// Begin synchronized output (DEC private mode 2026).
pub const SEQ_SYNC_BEGIN: &str = "\x1b[?2026h";
/// End synchronized output.
pub const SEQ_SYNC_END: &str = "\x1b[?2026l";

/// A run of horizontally-contiguous changed cells on one row.
#[derive(Clone, Debug)]
pub struct DeltaBatch {
    /// Starting column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// The cells in this run, left to right.
    pub cells: Vec<Cell>,
}

/// Group `changes` into same-row runs: a change extends the previous batch
/// when it's on the same row and its column equals the batch's last occupied
/// column plus one. Continuation cells (width 0) are dropped — they carry no
/// glyph of their own and would otherwise break a run in two.
pub fn batch_changes(changes: &[CellChange]) -> Vec<DeltaBatch> {
    let mut batches: Vec<DeltaBatch> = Vec::new();
    for change in changes {
        if change.cell.width == 0 {
            continue;
        }
        let can_extend = match batches.last() {
            Some(batch) => {
                batch.y == change.y && {
                    let run_width: u16 = batch.cells.iter().map(|c| u16::from(c.width)).sum();
                    batch.x.saturating_add(run_width) == change.x
                }
            }
            None => false,
        };
        if can_extend {
            if let Some(batch) = batches.last_mut() {
                batch.cells.push(change.cell.clone());
            }
        } else {
            batches.push(DeltaBatch { x: change.x, y: change.y, cells: vec![change.cell.clone()] });
        }
    }
    batches
}

fn needs_reset(prev: &Style, next: &Style) -> bool {
    (prev.weight != crate::style::Weight::Normal && next.weight == crate::style::Weight::Normal)
        || (prev.italic && !next.italic)
        || (prev.underline && !next.underline)
        || (prev.reverse && !next.reverse)
        || (prev.fg.is_some() && next.fg.is_none())
        || (prev.bg.is_some() && next.bg.is_none())
}

/// Renders buffer diffs into ANSI: one cursor move per contiguous run,
/// minimal SGR transitions between cells, optional synchronized-output
/// wrapping.
pub struct Renderer {
    synchronized_output: bool,
}

impl Renderer {
    /// A renderer that wraps each frame in synchronized output iff `synchronized_output`.
    pub fn new(synchronized_output: bool) -> Self {
        Self { synchronized_output }
    }

    /// Render `changes` (as produced by [`crate::buffer::Buffer::diff`]) into
    /// an ANSI string. Returns an empty string if there's nothing to draw.
    pub fn render_batched(&self, changes: &[CellChange]) -> String {
        let batches = batch_changes(changes);
        if batches.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(changes.len() * 12);
        if self.synchronized_output {
            out.push_str(SEQ_SYNC_BEGIN);
        }

        let mut last_style = Style::default();
        let mut style_active = false;

        for batch in &batches {
            out.push_str(&seq_move_cursor(batch.y, batch.x));
            for cell in &batch.cells {
                if cell.style != last_style {
                    if !style_active || needs_reset(&last_style, &cell.style) {
                        if style_active && !last_style.is_empty() {
                            out.push_str("\x1b[0m");
                        }
                        out.push_str(&build_sgr_sequence(&Style::default(), &cell.style));
                    } else {
                        out.push_str(&build_sgr_sequence(&last_style, &cell.style));
                    }
                    last_style = cell.style;
                    style_active = true;
                }
                out.push_str(&cell.grapheme);
            }
        }

        if style_active && !last_style.is_empty() {
            out.push_str("\x1b[0m");
        }
        if self.synchronized_output {
            out.push_str(SEQ_SYNC_END);
        }
        out
    }
}
