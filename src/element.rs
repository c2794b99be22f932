//! The mutable element tree: an arena that reconciles against new component
//! descriptions and drives layout/paint recursion over render objects.

use std::any::Any;
use std::collections::HashMap;

use crate::canvas::TerminalCanvas;
use crate::component::{Component, Key, WidgetState};
use crate::event::{KeyboardEvent, MouseEvent};
use crate::geometry::{Constraints, Position, Rect, Size};
use crate::render_object::{LayoutContext, PaintContext, ParentData, RenderObject};
use crate::tree_id::ElementId;

/// A `RenderObject::layout` call returned a size its constraints don't
/// satisfy. The node's stored size is clamped into the constraints and the
/// frame continues; this value is for reporting the violation to an error sink.
#[derive(Clone, Copy, Debug)]
pub struct LayoutViolation {
    /// The element whose render object misbehaved.
    pub element: ElementId,
    /// The constraints it was laid out with.
    pub constraints: Constraints,
    /// The size it returned (outside `constraints`).
    pub returned: Size,
    /// The size actually stored, after clamping `returned` into `constraints`.
    pub clamped: Size,
}

enum Payload {
    Stateless {
        child: Option<ElementId>,
    },
    Stateful {
        state: Box<dyn WidgetState>,
        child: Option<ElementId>,
    },
    RenderObject {
        render_object: Option<Box<dyn RenderObject>>,
        children: Vec<ElementId>,
        parent_data: ParentData,
        last_constraints: Option<Constraints>,
        last_size: Size,
    },
}

struct Node {
    component: Component,
    parent: Option<ElementId>,
    depth: u32,
    dirty: bool,
    payload: Payload,
}

/// The retained element tree.
///
/// An arena keyed by [`ElementId`]; parent links are back-references used
/// only for traversal, never for ownership (ownership flows from the arena
/// map itself, matching the "never a cycle of shared ownership" guidance).
#[derive(Default)]
pub struct ElementTree {
    nodes: HashMap<ElementId, Node>,
    next_id: u64,
    root: Option<ElementId>,
    focused: Option<ElementId>,
    violations: Vec<LayoutViolation>,
}

impl ElementTree {
    /// An empty tree with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root element, if one has been mounted.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Whether `id` currently names a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// `id`'s parent, if any.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// `id`'s depth from the root (root is depth 0).
    pub fn depth(&self, id: ElementId) -> u32 {
        self.nodes.get(&id).map(|n| n.depth).unwrap_or(0)
    }

    /// Whether `id` is marked as needing a rebuild.
    pub fn is_dirty(&self, id: ElementId) -> bool {
        self.nodes.get(&id).map(|n| n.dirty).unwrap_or(false)
    }

    /// Mark `id` as needing a rebuild on the next [`ElementTree::build_dirty`] pass.
    pub fn mark_dirty(&mut self, id: ElementId) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.dirty = true;
        }
    }

    fn alloc_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Mount `component` as the tree's root, replacing any existing root.
    pub fn set_root(&mut self, component: Component) -> ElementId {
        if let Some(old_root) = self.root.take() {
            self.unmount(old_root);
        }
        let id = self.inflate(component, None, 0);
        self.root = Some(id);
        id
    }

    /// Inflate `component` into a brand-new element subtree (rule 1 of reconciliation).
    fn inflate(&mut self, component: Component, parent: Option<ElementId>, depth: u32) -> ElementId {
        let id = self.alloc_id();
        let payload = match &component {
            Component::Stateless(w) => {
                let built = w.build();
                let child = self.inflate(built, Some(id), depth + 1);
                Payload::Stateless { child: Some(child) }
            }
            Component::Stateful(w) => {
                let mut state = w.create_state();
                let built = state.build();
                let child = self.inflate(built, Some(id), depth + 1);
                Payload::Stateful { state, child: Some(child) }
            }
            Component::RenderObject(w) => {
                let render_object = w.create_render_object();
                let child_components = w.children();
                let children = child_components.into_iter().map(|c| self.inflate(c, Some(id), depth + 1)).collect();
                Payload::RenderObject {
                    render_object: Some(render_object),
                    children,
                    parent_data: ParentData::default(),
                    last_constraints: None,
                    last_size: Size::ZERO,
                }
            }
        };
        self.nodes.insert(id, Node { component, parent, depth, dirty: true, payload });
        id
    }

    /// Reconcile `id`'s element in place against `new_component` of the same
    /// runtime kind (rule 2: update).
    fn update(&mut self, id: ElementId, new_component: Component) {
        let child_depth = self.depth(id) + 1;

        let Some(old_component) = self.nodes.get_mut(&id).map(|node| {
            let old = std::mem::replace(&mut node.component, new_component);
            node.dirty = true;
            old
        }) else {
            return;
        };

        enum Existing {
            Stateless(Option<ElementId>),
            Stateful(Option<ElementId>),
            RenderObject(Vec<ElementId>),
        }
        let existing = match &self.nodes[&id].payload {
            Payload::Stateless { child } => Existing::Stateless(*child),
            Payload::Stateful { child, .. } => Existing::Stateful(*child),
            Payload::RenderObject { children, .. } => Existing::RenderObject(children.clone()),
        };

        match existing {
            Existing::Stateless(child) => {
                let built = match &self.nodes[&id].component {
                    Component::Stateless(w) => w.build(),
                    _ => return,
                };
                let new_child = self.update_child(id, child_depth, child, Some(built));
                if let Some(Payload::Stateless { child: c }) = self.nodes.get_mut(&id).map(|n| &mut n.payload) {
                    *c = new_child;
                }
            }
            Existing::Stateful(child) => {
                if let Some(node) = self.nodes.get_mut(&id) {
                    if let Payload::Stateful { state, .. } = &mut node.payload {
                        state.did_update_component(component_as_any(&old_component));
                    }
                }
                let built = match self.nodes.get_mut(&id).map(|n| &mut n.payload) {
                    Some(Payload::Stateful { state, .. }) => state.build(),
                    _ => return,
                };
                let new_child = self.update_child(id, child_depth, child, Some(built));
                if let Some(Payload::Stateful { child: c, .. }) = self.nodes.get_mut(&id).map(|n| &mut n.payload) {
                    *c = new_child;
                }
            }
            Existing::RenderObject(children) => {
                if let Some(node) = self.nodes.get_mut(&id) {
                    if let (Component::RenderObject(w), Payload::RenderObject { render_object: Some(ro), .. }) =
                        (&node.component, &mut node.payload)
                    {
                        w.update_render_object(ro.as_mut());
                    }
                }
                let new_child_components = match &self.nodes[&id].component {
                    Component::RenderObject(w) => w.children(),
                    _ => return,
                };
                let new_children = self.update_children(id, child_depth, &children, new_child_components);
                if let Some(Payload::RenderObject { children: c, .. }) = self.nodes.get_mut(&id).map(|n| &mut n.payload) {
                    *c = new_children;
                }
            }
        }
    }

    /// Reconcile a single optional child slot (inflate / update / unmount).
    fn update_child(
        &mut self,
        parent: ElementId,
        child_depth: u32,
        existing: Option<ElementId>,
        new_component: Option<Component>,
    ) -> Option<ElementId> {
        match (existing, new_component) {
            (None, None) => None,
            (Some(e), None) => {
                self.unmount(e);
                None
            }
            (None, Some(c)) => Some(self.inflate(c, Some(parent), child_depth)),
            (Some(e), Some(c)) => {
                let can_update = self.nodes.get(&e).map(|n| n.component.can_update(&c)).unwrap_or(false);
                if can_update {
                    self.update(e, c);
                    Some(e)
                } else {
                    self.unmount(e);
                    Some(self.inflate(c, Some(parent), child_depth))
                }
            }
        }
    }

    /// Reconcile an ordered list of children: key-aware matching against the
    /// previous list, falling back to same-kind matching in order, else inflate.
    fn update_children(
        &mut self,
        parent: ElementId,
        child_depth: u32,
        old_children: &[ElementId],
        new_components: Vec<Component>,
    ) -> Vec<ElementId> {
        let old_info: Vec<(ElementId, Option<Key>, std::any::TypeId)> = old_children
            .iter()
            .map(|&id| {
                let n = &self.nodes[&id];
                (id, n.component.key().cloned(), n.component.runtime_kind())
            })
            .collect();

        let mut used = vec![false; old_info.len()];
        let mut result = Vec::with_capacity(new_components.len());

        for new_c in new_components {
            let new_key = new_c.key().cloned();
            let new_kind = new_c.runtime_kind();

            let found = old_info
                .iter()
                .enumerate()
                .find(|(i, (_, key, kind))| {
                    !used[*i] && *kind == new_kind && ((new_key.is_some() && *key == new_key) || (new_key.is_none() && key.is_none()))
                })
                .map(|(i, (id, _, _))| (i, *id));

            match found {
                Some((i, old_id)) => {
                    used[i] = true;
                    self.update(old_id, new_c);
                    result.push(old_id);
                }
                None => {
                    result.push(self.inflate(new_c, Some(parent), child_depth));
                }
            }
        }

        for (i, (old_id, _, _)) in old_info.into_iter().enumerate() {
            if !used[i] {
                self.unmount(old_id);
            }
        }

        result
    }

    /// Unmount `id` and its whole subtree (rule 3): dispose stateful state,
    /// recursively unmount children, remove the node.
    fn unmount(&mut self, id: ElementId) {
        let Some(node) = self.nodes.remove(&id) else { return };
        match node.payload {
            Payload::Stateless { child } => {
                if let Some(c) = child {
                    self.unmount(c);
                }
            }
            Payload::Stateful { mut state, child } => {
                state.dispose();
                if let Some(c) = child {
                    self.unmount(c);
                }
            }
            Payload::RenderObject { children, .. } => {
                for c in children {
                    self.unmount(c);
                }
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
    }

    /// Rebuild `id` if marked dirty, by re-running its build (Stateless) or
    /// `state.build()` (Stateful) against the *same* stored component, and
    /// reconciling the resulting single child. No-op for render object
    /// elements and elements that aren't dirty.
    fn rebuild_if_dirty(&mut self, id: ElementId) {
        if !self.is_dirty(id) {
            return;
        }
        let child_depth = self.depth(id) + 1;
        let existing = match self.nodes.get(&id).map(|n| &n.payload) {
            Some(Payload::Stateless { child }) => Some((false, *child)),
            Some(Payload::Stateful { child, .. }) => Some((true, *child)),
            _ => None,
        };
        let Some((is_stateful, child)) = existing else {
            if let Some(n) = self.nodes.get_mut(&id) {
                n.dirty = false;
            }
            return;
        };

        let built = if is_stateful {
            match self.nodes.get_mut(&id).map(|n| &mut n.payload) {
                Some(Payload::Stateful { state, .. }) => state.build(),
                _ => return,
            }
        } else {
            match &self.nodes[&id].component {
                Component::Stateless(w) => w.build(),
                _ => return,
            }
        };

        let new_child = self.update_child(id, child_depth, child, Some(built));
        if let Some(node) = self.nodes.get_mut(&id) {
            match &mut node.payload {
                Payload::Stateless { child: c } => *c = new_child,
                Payload::Stateful { child: c, .. } => *c = new_child,
                _ => {}
            }
            node.dirty = false;
        }
    }

    /// Rebuild every dirty element reachable from the root, depth-first. A
    /// parent rebuild reconciles (and so may replace) its children before
    /// they are visited, naturally subsuming any child rebuild that would
    /// otherwise happen.
    pub fn build_dirty(&mut self) {
        if let Some(root) = self.root {
            self.build_dirty_subtree(root);
        }
    }

    fn build_dirty_subtree(&mut self, id: ElementId) {
        self.rebuild_if_dirty(id);
        let children: Vec<ElementId> = match self.nodes.get(&id).map(|n| &n.payload) {
            Some(Payload::Stateless { child }) => child.iter().copied().collect(),
            Some(Payload::Stateful { child, .. }) => child.iter().copied().collect(),
            Some(Payload::RenderObject { children, .. }) => children.clone(),
            None => return,
        };
        for c in children {
            self.build_dirty_subtree(c);
        }
    }

    /// Resolve `id` down through any Stateless/Stateful wrapper chain to the
    /// nearest render-object-owning element.
    fn resolve_render_object(&self, mut id: ElementId) -> Option<ElementId> {
        loop {
            match &self.nodes.get(&id)?.payload {
                Payload::RenderObject { .. } => return Some(id),
                Payload::Stateless { child } => id = (*child)?,
                Payload::Stateful { child, .. } => id = (*child)?,
            }
        }
    }

    /// Lay out the render object reachable from `id` (resolving through any
    /// wrapper elements) with `constraints`, recursively laying out its
    /// children, and return its size.
    pub fn layout_render_object(&mut self, id: ElementId, constraints: Constraints) -> Size {
        let Some(ro_id) = self.resolve_render_object(id) else { return Size::ZERO };
        let taken = match self.nodes.get_mut(&ro_id) {
            Some(node) => match &mut node.payload {
                Payload::RenderObject { render_object, children, .. } => Some((render_object.take(), children.clone())),
                _ => None,
            },
            None => None,
        };
        let Some((Some(mut ro), children)) = taken else { return Size::ZERO };

        let returned = ro.layout(constraints, &children, self);
        let size = if constraints.is_satisfied_by(returned) {
            returned
        } else {
            let clamped = constraints.constrain(returned);
            self.violations.push(LayoutViolation { element: ro_id, constraints, returned, clamped });
            clamped
        };

        if let Some(node) = self.nodes.get_mut(&ro_id) {
            if let Payload::RenderObject { render_object, last_constraints, last_size, .. } = &mut node.payload {
                *render_object = Some(ro);
                *last_constraints = Some(constraints);
                *last_size = size;
            }
            node.dirty = false;
        }
        size
    }

    /// Drain the `LayoutViolation`s recorded since the last call. The
    /// binding reports each through the app's error sink after a layout flush.
    pub fn take_layout_violations(&mut self) -> Vec<LayoutViolation> {
        std::mem::take(&mut self.violations)
    }

    /// The constraints `id`'s render object was last laid out with, if any.
    pub fn last_constraints(&self, id: ElementId) -> Option<Constraints> {
        let ro_id = self.resolve_render_object(id)?;
        match &self.nodes.get(&ro_id)?.payload {
            Payload::RenderObject { last_constraints, .. } => *last_constraints,
            _ => None,
        }
    }

    /// Whether `descendant` is strictly below `ancestor` in the tree.
    pub fn is_descendant(&self, descendant: ElementId, ancestor: ElementId) -> bool {
        let mut cur = self.parent(descendant);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Whether `id`'s render object, at its last recorded constraints, is a relayout boundary.
    pub fn is_relayout_boundary(&self, id: ElementId) -> bool {
        let Some(ro_id) = self.resolve_render_object(id) else { return true };
        match &self.nodes.get(&ro_id).map(|n| &n.payload) {
            Some(Payload::RenderObject { render_object: Some(ro), last_constraints: Some(c), .. }) => ro.is_relayout_boundary(*c),
            _ => true,
        }
    }

    /// Paint the render object reachable from `id` at `offset` into `canvas`.
    pub fn paint_render_object(&self, id: ElementId, canvas: &mut TerminalCanvas, offset: Position) {
        let Some(ro_id) = self.resolve_render_object(id) else { return };
        let Some(node) = self.nodes.get(&ro_id) else { return };
        if let Payload::RenderObject { render_object: Some(ro), children, .. } = &node.payload {
            ro.paint(canvas, offset, children, self);
        }
    }

    /// The render object's on-screen rectangle: its last recorded size at
    /// its position accumulated from the root down through every ancestor's
    /// `ParentData::offset`.
    pub fn world_rect(&self, id: ElementId) -> Rect {
        let Some(ro_id) = self.resolve_render_object(id) else { return Rect::default() };
        Rect {
            position: self.absolute_position(ro_id),
            size: self.render_object_size(ro_id),
        }
    }

    fn absolute_position(&self, ro_id: ElementId) -> Position {
        let mut chain = vec![ro_id];
        let mut cur = self.parent(ro_id);
        while let Some(p) = cur {
            chain.push(p);
            cur = self.parent(p);
        }
        let mut pos = Position::default();
        for &node_id in chain.iter().rev() {
            if let Some(Payload::RenderObject { parent_data, .. }) = self.nodes.get(&node_id).map(|n| &n.payload) {
                pos = pos.translate(parent_data.offset.x, parent_data.offset.y);
            }
        }
        pos
    }

    fn render_object_size(&self, ro_id: ElementId) -> Size {
        match self.nodes.get(&ro_id).map(|n| &n.payload) {
            Some(Payload::RenderObject { last_size, .. }) => *last_size,
            _ => Size::ZERO,
        }
    }

    /// The render-object ids whose world rect contains `point`, innermost
    /// first, for outward (bubbling) event propagation.
    pub fn hit_test(&self, point: Position) -> Vec<ElementId> {
        let mut path = Vec::new();
        if let Some(root) = self.root {
            self.hit_test_rec(root, point, &mut path);
        }
        path
    }

    fn hit_test_rec(&self, id: ElementId, point: Position, path: &mut Vec<ElementId>) -> bool {
        let Some(ro_id) = self.resolve_render_object(id) else { return false };
        if !self.world_rect(ro_id).contains(point) {
            return false;
        }
        let children = match self.nodes.get(&ro_id).map(|n| &n.payload) {
            Some(Payload::RenderObject { children, .. }) => children.clone(),
            _ => Vec::new(),
        };
        for &child in &children {
            if self.hit_test_rec(child, point, path) {
                path.push(ro_id);
                return true;
            }
        }
        path.push(ro_id);
        true
    }

    /// The currently focused element, if any.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Set (or clear) the focused element directly.
    pub fn set_focus(&mut self, id: Option<ElementId>) {
        self.focused = id;
    }

    /// Depth-first search from the root for the first focusable render object.
    pub fn find_first_focusable(&self) -> Option<ElementId> {
        let root = self.root?;
        self.find_first_focusable_rec(root)
    }

    fn find_first_focusable_rec(&self, id: ElementId) -> Option<ElementId> {
        match self.nodes.get(&id).map(|n| &n.payload) {
            Some(Payload::RenderObject { render_object: Some(ro), children, .. }) => {
                if ro.is_focusable() {
                    return Some(id);
                }
                children.iter().find_map(|&child| self.find_first_focusable_rec(child))
            }
            Some(Payload::Stateless { child }) => child.and_then(|c| self.find_first_focusable_rec(c)),
            Some(Payload::Stateful { child, .. }) => child.and_then(|c| self.find_first_focusable_rec(c)),
            _ => None,
        }
    }

    fn nearest_render_object_ancestor(&self, id: ElementId) -> Option<ElementId> {
        let mut cur = self.parent(id)?;
        loop {
            if matches!(self.nodes.get(&cur).map(|n| &n.payload), Some(Payload::RenderObject { .. })) {
                return Some(cur);
            }
            cur = self.parent(cur)?;
        }
    }

    fn call_handle_key(&mut self, ro_id: ElementId, event: &KeyboardEvent) -> bool {
        let taken = match self.nodes.get_mut(&ro_id).map(|n| &mut n.payload) {
            Some(Payload::RenderObject { render_object, .. }) => render_object.take(),
            _ => None,
        };
        let Some(mut ro) = taken else { return false };
        let handled = ro.handle_key(event);
        if let Some(Payload::RenderObject { render_object, .. }) = self.nodes.get_mut(&ro_id).map(|n| &mut n.payload) {
            *render_object = Some(ro);
        }
        handled
    }

    fn call_handle_mouse(&mut self, ro_id: ElementId, event: &MouseEvent) -> bool {
        let taken = match self.nodes.get_mut(&ro_id).map(|n| &mut n.payload) {
            Some(Payload::RenderObject { render_object, .. }) => render_object.take(),
            _ => None,
        };
        let Some(mut ro) = taken else { return false };
        let handled = ro.handle_mouse(event);
        if let Some(Payload::RenderObject { render_object, .. }) = self.nodes.get_mut(&ro_id).map(|n| &mut n.payload) {
            *render_object = Some(ro);
        }
        handled
    }

    /// Route a keyboard event depth-first: to the focused element if one is
    /// set (falling back to the first focusable element found via a
    /// depth-first walk from the root, which becomes the new focus), then
    /// bubbling up through render-object ancestors until one consumes it.
    /// Returns whether any element consumed the event.
    pub fn dispatch_key(&mut self, event: &KeyboardEvent) -> bool {
        let start = self.focused.filter(|&id| self.contains(id)).or_else(|| self.find_first_focusable());
        self.focused = start;
        let Some(start) = start else { return false };
        let Some(mut cur) = self.resolve_render_object(start) else { return false };
        loop {
            if self.call_handle_key(cur, event) {
                return true;
            }
            match self.nearest_render_object_ancestor(cur) {
                Some(next) => cur = next,
                None => return false,
            }
        }
    }

    /// Route a mouse event by hit-testing `point` against world rects and
    /// propagating outward (innermost render object first) until one
    /// consumes it. Returns whether any element consumed the event.
    pub fn dispatch_mouse(&mut self, point: Position, event: &MouseEvent) -> bool {
        for id in self.hit_test(point) {
            if self.call_handle_mouse(id, event) {
                return true;
            }
        }
        false
    }
}

fn component_as_any(c: &Component) -> &dyn Any {
    match c {
        Component::Stateless(w) => &**w as &dyn Any,
        Component::Stateful(w) => &**w as &dyn Any,
        Component::RenderObject(w) => &**w as &dyn Any,
    }
}

impl LayoutContext for ElementTree {
    fn layout_child(&mut self, child: ElementId, constraints: Constraints) -> Size {
        self.layout_render_object(child, constraints)
    }

    fn set_child_offset(&mut self, child: ElementId, offset: Position) {
        if let Some(ro_id) = self.resolve_render_object(child) {
            if let Some(node) = self.nodes.get_mut(&ro_id) {
                if let Payload::RenderObject { parent_data, .. } = &mut node.payload {
                    parent_data.offset = offset;
                }
            }
        }
    }

    fn child_size(&self, child: ElementId) -> Option<Size> {
        let ro_id = self.resolve_render_object(child)?;
        match &self.nodes.get(&ro_id)?.payload {
            Payload::RenderObject { last_size, .. } => Some(*last_size),
            _ => None,
        }
    }
}

impl PaintContext for ElementTree {
    fn paint_child(&self, child: ElementId, canvas: &mut TerminalCanvas, offset: Position) {
        if let Some(ro_id) = self.resolve_render_object(child) {
            self.paint_render_object(ro_id, canvas, offset);
        }
    }

    fn child_offset(&self, child: ElementId) -> Position {
        let Some(ro_id) = self.resolve_render_object(child) else { return Position::default() };
        match self.nodes.get(&ro_id).map(|n| &n.payload) {
            Some(Payload::RenderObject { parent_data, .. }) => parent_data.offset,
            _ => Position::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::style::Style;

    struct LeafBox {
        size: Size,
        label: &'static str,
    }

    impl RenderObject for LeafBox {
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
        size: Size,
        label: &'static str,
    }

    impl crate::component::RenderObjectWidget for LeafWidget {
        fn create_render_object(&self) -> Box<dyn RenderObject> {
            Box::new(LeafBox { size: self.size, label: self.label })
        }
        fn update_render_object(&self, render_object: &mut dyn RenderObject) {
            let _ = render_object;
        }
    }

    #[test]
    fn inflate_creates_root() {
        let mut tree = ElementTree::new();
        let id = tree.set_root(Component::RenderObject(Box::new(LeafWidget { size: Size::new(3, 1), label: "hi" })));
        assert_eq!(tree.root(), Some(id));
        assert!(tree.contains(id));
    }

    #[test]
    fn layout_and_paint_leaf() {
        let mut tree = ElementTree::new();
        let id = tree.set_root(Component::RenderObject(Box::new(LeafWidget { size: Size::new(3, 1), label: "hi" })));
        let size = tree.layout_render_object(id, Constraints::tight(Size::new(3, 1)));
        assert_eq!(size, Size::new(3, 1));

        let mut buf = Buffer::new(Size::new(5, 1));
        {
            let mut canvas = TerminalCanvas::new(&mut buf, crate::geometry::Rect::new(0, 0, 5, 1));
            tree.paint_render_object(id, &mut canvas, Position::default());
        }
        assert_eq!(buf.get(0, 0).expect("in bounds").grapheme, "h");
    }

    #[test]
    fn update_same_kind_reuses_element() {
        let mut tree = ElementTree::new();
        let id = tree.set_root(Component::RenderObject(Box::new(LeafWidget { size: Size::new(3, 1), label: "a" })));
        tree.update(id, Component::RenderObject(Box::new(LeafWidget { size: Size::new(4, 1), label: "b" })));
        assert!(tree.contains(id));
        assert_eq!(tree.root(), Some(id));
    }

    struct Oversized;

    impl RenderObject for Oversized {
        fn layout(&mut self, _constraints: Constraints, _children: &[ElementId], _ctx: &mut dyn LayoutContext) -> Size {
            Size::new(999, 999)
        }
        fn size(&self) -> Size {
            Size::ZERO
        }
        fn paint(&self, _canvas: &mut TerminalCanvas, _offset: Position, _children: &[ElementId], _ctx: &dyn PaintContext) {}
        fn uses_child_size(&self) -> bool {
            false
        }
    }

    struct OversizedWidget;

    impl crate::component::RenderObjectWidget for OversizedWidget {
        fn create_render_object(&self) -> Box<dyn RenderObject> {
            Box::new(Oversized)
        }
        fn update_render_object(&self, _render_object: &mut dyn RenderObject) {}
    }

    #[test]
    fn layout_violation_clamps_size_and_is_recorded() {
        let mut tree = ElementTree::new();
        let id = tree.set_root(Component::RenderObject(Box::new(OversizedWidget)));
        let size = tree.layout_render_object(id, Constraints::tight(Size::new(10, 2)));
        assert_eq!(size, Size::new(10, 2));

        let violations = tree.take_layout_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element, id);
        assert_eq!(violations[0].returned, Size::new(999, 999));
        assert_eq!(violations[0].clamped, Size::new(10, 2));

        assert!(tree.take_layout_violations().is_empty());
    }

    use std::cell::RefCell;
    use std::rc::Rc;

    struct FocusableLeaf {
        size: Size,
        presses: Rc<RefCell<u32>>,
        scrolls: Rc<RefCell<u32>>,
    }

    impl RenderObject for FocusableLeaf {
        fn layout(&mut self, constraints: Constraints, _children: &[ElementId], _ctx: &mut dyn LayoutContext) -> Size {
            constraints.constrain(self.size)
        }
        fn size(&self) -> Size {
            self.size
        }
        fn paint(&self, _canvas: &mut TerminalCanvas, _offset: Position, _children: &[ElementId], _ctx: &dyn PaintContext) {}
        fn uses_child_size(&self) -> bool {
            false
        }
        fn is_focusable(&self) -> bool {
            true
        }
        fn handle_key(&mut self, _event: &KeyboardEvent) -> bool {
            *self.presses.borrow_mut() += 1;
            true
        }
        fn is_scrollable(&self) -> bool {
            true
        }
        fn handle_mouse(&mut self, _event: &MouseEvent) -> bool {
            *self.scrolls.borrow_mut() += 1;
            true
        }
    }

    struct FocusableLeafWidget {
        size: Size,
        presses: Rc<RefCell<u32>>,
        scrolls: Rc<RefCell<u32>>,
    }

    impl crate::component::RenderObjectWidget for FocusableLeafWidget {
        fn create_render_object(&self) -> Box<dyn RenderObject> {
            Box::new(FocusableLeaf {
                size: self.size,
                presses: self.presses.clone(),
                scrolls: self.scrolls.clone(),
            })
        }
        fn update_render_object(&self, _render_object: &mut dyn RenderObject) {}
    }

    #[test]
    fn dispatch_key_falls_back_to_first_focusable_and_invokes_handler() {
        let presses = Rc::new(RefCell::new(0));
        let scrolls = Rc::new(RefCell::new(0));
        let mut tree = ElementTree::new();
        let id = tree.set_root(Component::RenderObject(Box::new(FocusableLeafWidget {
            size: Size::new(3, 1),
            presses: presses.clone(),
            scrolls,
        })));
        tree.layout_render_object(id, Constraints::tight(Size::new(3, 1)));

        assert_eq!(tree.focused(), None);
        let handled = tree.dispatch_key(&KeyboardEvent::new(crate::event::KeyCode::Enter));
        assert!(handled);
        assert_eq!(*presses.borrow(), 1);
        assert_eq!(tree.focused(), Some(id));

        // Second dispatch reuses the already-focused element.
        assert!(tree.dispatch_key(&KeyboardEvent::new(crate::event::KeyCode::Enter)));
        assert_eq!(*presses.borrow(), 2);
    }

    #[test]
    fn world_rect_and_hit_test_find_the_innermost_element() {
        let presses = Rc::new(RefCell::new(0));
        let scrolls = Rc::new(RefCell::new(0));
        let mut tree = ElementTree::new();
        let id = tree.set_root(Component::RenderObject(Box::new(FocusableLeafWidget {
            size: Size::new(3, 1),
            presses,
            scrolls,
        })));
        tree.layout_render_object(id, Constraints::tight(Size::new(3, 1)));

        assert_eq!(tree.world_rect(id), crate::geometry::Rect::new(0, 0, 3, 1));
        assert_eq!(tree.hit_test(Position::new(1, 0)), vec![id]);
        assert!(tree.hit_test(Position::new(5, 5)).is_empty());
    }

    #[test]
    fn dispatch_mouse_hit_tests_and_invokes_handler() {
        let presses = Rc::new(RefCell::new(0));
        let scrolls = Rc::new(RefCell::new(0));
        let mut tree = ElementTree::new();
        let id = tree.set_root(Component::RenderObject(Box::new(FocusableLeafWidget {
            size: Size::new(3, 1),
            presses,
            scrolls: scrolls.clone(),
        })));
        tree.layout_render_object(id, Constraints::tight(Size::new(3, 1)));

        let event = MouseEvent {
            button: crate::event::MouseButton::WheelUp,
            x: 1,
            y: 0,
            pressed: true,
            modifiers: crate::event::Modifiers::NONE,
        };
        assert!(tree.dispatch_mouse(Position::new(1, 0), &event));
        assert_eq!(*scrolls.borrow(), 1);
        assert!(!tree.dispatch_mouse(Position::new(9, 9), &event));
    }
}
