//! Tracks dirty layout/paint sets and flushes them in deterministic order.

use std::collections::HashSet;

use crate::canvas::TerminalCanvas;
use crate::element::ElementTree;
use crate::geometry::{Constraints, Position};
use crate::tree_id::ElementId;

/// Holds the render objects needing layout or paint, and notifies the
/// binding whenever either set gains a member.
pub struct PipelineOwner {
    needs_layout: HashSet<ElementId>,
    needs_paint: HashSet<ElementId>,
    on_needs_visual_update: Option<Box<dyn FnMut()>>,
}

impl Default for PipelineOwner {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineOwner {
    /// A pipeline owner with empty dirty sets and no callback installed.
    pub fn new() -> Self {
        Self {
            needs_layout: HashSet::new(),
            needs_paint: HashSet::new(),
            on_needs_visual_update: None,
        }
    }

    /// Install the callback invoked whenever a new node is added to either dirty set.
    pub fn set_on_needs_visual_update(&mut self, callback: impl FnMut() + 'static) {
        self.on_needs_visual_update = Some(Box::new(callback));
    }

    /// Add `id` to the layout dirty set and notify.
    pub fn request_layout(&mut self, id: ElementId) {
        self.needs_layout.insert(id);
        self.notify();
    }

    /// Add `id` to the paint dirty set and notify.
    pub fn request_paint(&mut self, id: ElementId) {
        self.needs_paint.insert(id);
        self.notify();
    }

    /// Whether either dirty set is non-empty.
    pub fn has_pending_work(&self) -> bool {
        !self.needs_layout.is_empty() || !self.needs_paint.is_empty()
    }

    fn notify(&mut self) {
        if let Some(cb) = &mut self.on_needs_visual_update {
            cb();
        }
    }

    fn pop_shallowest(&mut self, tree: &ElementTree) -> Option<ElementId> {
        let next = self.needs_layout.iter().copied().filter(|&id| tree.contains(id)).min_by_key(|&id| tree.depth(id));
        if let Some(id) = next {
            self.needs_layout.remove(&id);
        }
        next
    }

    /// Process the layout dirty set in depth-ascending order (shallowest
    /// first), always including `root_id` laid out with `root_constraints`
    /// (the root's constraints come from the terminal size, not from a
    /// parent, so they're supplied explicitly rather than cached). Laying
    /// out a node recursively lays out its descendants, so any dirty
    /// descendant absorbed into that cascade is dropped from the set
    /// without being processed again.
    pub fn flush_layout(&mut self, tree: &mut ElementTree, root_id: ElementId, root_constraints: Constraints) {
        self.needs_layout.insert(root_id);
        while let Some(id) = self.pop_shallowest(tree) {
            let constraints = if id == root_id { root_constraints } else { tree.last_constraints(id).unwrap_or(root_constraints) };
            tree.layout_render_object(id, constraints);
            self.needs_layout.retain(|&other| !tree.is_descendant(other, id));
        }
    }

    /// Paint `root_id` (and, recursively, its whole subtree) at the origin
    /// into `canvas`. Every frame repaints the full tree into a fresh
    /// buffer; incremental redraw happens at the ANSI diff stage, not here.
    pub fn flush_paint(&mut self, tree: &ElementTree, canvas: &mut TerminalCanvas, root_id: ElementId) {
        tree.paint_render_object(root_id, canvas, Position::default());
        self.needs_paint.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::component::{Component, RenderObjectWidget};
    use crate::geometry::{Rect, Size};
    use crate::render_object::{LayoutContext, PaintContext, RenderObject};
    use crate::style::Style;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Leaf {
        label: &'static str,
        size: Size,
    }

    impl RenderObject for Leaf {
        fn layout(&mut self, constraints: Constraints, _children: &[ElementId], _ctx: &mut dyn LayoutContext) -> Size {
            constraints.constrain(self.size)
        }
        fn size(&self) -> Size {
            self.size
        }
        fn paint(&self, canvas: &mut TerminalCanvas, offset: Position, _children: &[ElementId], _ctx: &dyn PaintContext) {
            canvas.draw_text(offset, self.label, Style::default());
        }
        fn uses_child_size(&self) -> bool {
            false
        }
    }

    struct LeafWidget {
        label: &'static str,
        size: Size,
    }

    impl RenderObjectWidget for LeafWidget {
        fn create_render_object(&self) -> Box<dyn RenderObject> {
            Box::new(Leaf { label: self.label, size: self.size })
        }
        fn update_render_object(&self, _render_object: &mut dyn RenderObject) {}
    }

    struct Pair;

    impl RenderObject for Pair {
        fn layout(&mut self, constraints: Constraints, children: &[ElementId], ctx: &mut dyn LayoutContext) -> Size {
            let mut x = 0u16;
            for &child in children {
                let size = ctx.layout_child(child, Constraints::loose(Size::new(constraints.max_width, constraints.max_height)));
                ctx.set_child_offset(child, Position::new(x, 0));
                x = x.saturating_add(size.width);
            }
            constraints.constrain(Size::new(x, 1))
        }
        fn size(&self) -> Size {
            Size::ZERO
        }
        fn paint(&self, canvas: &mut TerminalCanvas, offset: Position, children: &[ElementId], ctx: &dyn PaintContext) {
            for &child in children {
                let child_off = ctx.child_offset(child);
                ctx.paint_child(child, canvas, offset.translate(child_off.x, child_off.y));
            }
        }
    }

    struct PairWidget {
        children: Vec<(&'static str, Size)>,
    }

    impl RenderObjectWidget for PairWidget {
        fn create_render_object(&self) -> Box<dyn RenderObject> {
            Box::new(Pair)
        }
        fn update_render_object(&self, _render_object: &mut dyn RenderObject) {}
        fn children(&self) -> Vec<Component> {
            self.children
                .iter()
                .map(|&(label, size)| Component::RenderObject(Box::new(LeafWidget { label, size })))
                .collect()
        }
    }

    #[test]
    fn flush_layout_absorbs_descendant_dirty_entries() {
        let mut tree = ElementTree::new();
        let root = tree.set_root(Component::RenderObject(Box::new(PairWidget {
            children: vec![("a", Size::new(1, 1)), ("b", Size::new(1, 1))],
        })));

        let mut owner = PipelineOwner::new();
        owner.request_layout(root);
        owner.flush_layout(&mut tree, root, Constraints::loose(Size::new(10, 1)));

        assert!(!owner.has_pending_work());
    }

    #[test]
    fn notify_callback_fires_on_request() {
        let fired = Rc::new(RefCell::new(false));
        let fired_clone = fired.clone();
        let mut owner = PipelineOwner::new();
        owner.set_on_needs_visual_update(move || {
            *fired_clone.borrow_mut() = true;
        });
        owner.request_layout(ElementId(0));
        assert!(*fired.borrow());
    }

    #[test]
    fn flush_paint_renders_children_at_computed_offsets() {
        let mut tree = ElementTree::new();
        let root = tree.set_root(Component::RenderObject(Box::new(PairWidget {
            children: vec![("a", Size::new(1, 1)), ("b", Size::new(1, 1))],
        })));
        tree.layout_render_object(root, Constraints::loose(Size::new(10, 1)));

        let mut owner = PipelineOwner::new();
        let mut buf = Buffer::new(Size::new(10, 1));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 10, 1));
            owner.flush_paint(&tree, &mut canvas, root);
        }
        assert_eq!(buf.get(0, 0).expect("in bounds").grapheme, "a");
        assert_eq!(buf.get(1, 0).expect("in bounds").grapheme, "b");
    }
}
