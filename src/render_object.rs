//! The layout/paint protocol every render object implements.
//!
//! A render object does not own its children directly (they live in the
//! element arena, keyed by [`ElementId`]); instead `layout` and `paint`
//! receive the child ids and a context through which they recurse into
//! those children. This keeps the tree a single arena rather than a graph
//! of directly-nested trait objects, which Rust's ownership rules make
//! awkward for a mutable retained tree.

use crate::canvas::TerminalCanvas;
use crate::event::{KeyboardEvent, MouseEvent};
use crate::geometry::{Constraints, Position, Size};
use crate::tree_id::ElementId;

/// Per-child data a parent attaches during layout: where the child sits
/// relative to the parent's own paint offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParentData {
    /// Offset of the child's origin relative to its parent's origin.
    pub offset: Position,
}

/// Handed to [`RenderObject::layout`]; lets a composite render object
/// recurse into a specific child by id without owning it.
pub trait LayoutContext {
    /// Lay out `child` with `constraints` and return its size.
    fn layout_child(&mut self, child: ElementId, constraints: Constraints) -> Size;

    /// Record where `child` sits relative to the parent's own origin.
    fn set_child_offset(&mut self, child: ElementId, offset: Position);

    /// The size `child` was last laid out to, if it has been laid out at least once.
    fn child_size(&self, child: ElementId) -> Option<Size>;
}

/// Handed to [`RenderObject::paint`]; lets a composite render object
/// recurse into a specific child by id without owning it.
pub trait PaintContext {
    /// Paint `child` into `canvas` at `offset`.
    fn paint_child(&self, child: ElementId, canvas: &mut TerminalCanvas, offset: Position);

    /// The offset a parent previously assigned to `child` via [`LayoutContext::set_child_offset`].
    fn child_offset(&self, child: ElementId) -> Position;
}

/// A node that knows how to size itself within constraints and paint itself
/// (and its children) into a canvas.
pub trait RenderObject {
    /// Compute and return this object's size given `constraints`.
    ///
    /// The returned size must satisfy `constraints`. An object with
    /// children must, for each id in `children`, call
    /// `ctx.layout_child(id, child_constraints)` and then
    /// `ctx.set_child_offset(id, offset)` before returning.
    fn layout(&mut self, constraints: Constraints, children: &[ElementId], ctx: &mut dyn LayoutContext) -> Size;

    /// The size most recently returned by `layout`.
    fn size(&self) -> Size;

    /// Paint this object at `offset` into `canvas`, then paint each child
    /// (via `ctx.paint_child`) at `offset + ctx.child_offset(child)`.
    fn paint(&self, canvas: &mut TerminalCanvas, offset: Position, children: &[ElementId], ctx: &dyn PaintContext);

    /// Whether this object's returned size depends on a child's size.
    ///
    /// Most composite layouts (e.g. a container sized to fit its content) do;
    /// a node with no children, or one with fixed/tight sizing regardless of
    /// children, does not.
    fn uses_child_size(&self) -> bool {
        true
    }

    /// Whether this object is a relayout boundary for the constraints it was
    /// last given: dirty layout below a boundary does not propagate above it.
    fn is_relayout_boundary(&self, constraints: Constraints) -> bool {
        constraints.is_tight() || !self.uses_child_size()
    }

    /// Whether this object can hold keyboard focus.
    ///
    /// `ElementTree::dispatch_key` gives focus to the first focusable object
    /// found (depth-first) when nothing is currently focused.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Handle a keyboard event while this object holds focus, or while it's
    /// an ancestor of the focused object during the bubbling fallback.
    /// Returns whether the event was consumed (stops further bubbling).
    fn handle_key(&mut self, _event: &KeyboardEvent) -> bool {
        false
    }

    /// Whether this object responds to mouse wheel scrolling.
    fn is_scrollable(&self) -> bool {
        false
    }

    /// Handle a mouse event that hit-tested to this object, or to one of its
    /// descendants during outward propagation. Returns whether the event was
    /// consumed (stops further propagation toward the root).
    fn handle_mouse(&mut self, _event: &MouseEvent) -> bool {
        false
    }
}
