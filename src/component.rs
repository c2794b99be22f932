//! Immutable component descriptions, reconciled into the mutable element tree.

use std::any::{Any, TypeId};

use crate::render_object::RenderObject;

/// Identity key used to preserve element identity across rebuilds when
/// siblings would otherwise be ambiguous (e.g. in a reordered list).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(pub String);

impl Key {
    /// Create a key from anything stringly-identified.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// A component that builds into another component, with no render object
/// or persistent state of its own.
pub trait StatelessWidget: Any {
    /// Build the component this one describes.
    fn build(&self) -> Component;

    /// Identity key, if this component needs to be distinguished from
    /// siblings of the same runtime kind.
    fn key(&self) -> Option<&Key> {
        None
    }
}

/// A component backed by mutable state that survives rebuilds.
pub trait StatefulWidget: Any {
    /// Create this component's state, once, on first mount.
    fn create_state(&self) -> Box<dyn WidgetState>;

    /// Identity key.
    fn key(&self) -> Option<&Key> {
        None
    }
}

/// Per-element mutable state owned by a `StatefulWidget`'s element.
///
/// Survives update-in-place across rebuilds of the same element; disposed
/// when the element unmounts.
pub trait WidgetState: Any {
    /// Build the component this state's subtree currently describes.
    fn build(&mut self) -> Component;

    /// Called when the owning element is reconciled against a new component
    /// of the same kind (the state itself is preserved; only the
    /// description changed).
    fn did_update_component(&mut self, _old: &dyn Any) {}

    /// Called once, when the owning element unmounts.
    fn dispose(&mut self) {}
}

/// A component that directly owns a render object, with zero or more child components.
pub trait RenderObjectWidget: Any {
    /// Create the render object this component describes.
    fn create_render_object(&self) -> Box<dyn RenderObject>;

    /// Update an existing render object (created by a prior component of the
    /// same runtime kind) to match this component's configuration.
    fn update_render_object(&self, render_object: &mut dyn RenderObject);

    /// Child component descriptions, in order.
    fn children(&self) -> Vec<Component> {
        Vec::new()
    }

    /// Identity key.
    fn key(&self) -> Option<&Key> {
        None
    }
}

/// An immutable description of a piece of UI: one of the three widget kinds.
pub enum Component {
    /// Builds into another component.
    Stateless(Box<dyn StatelessWidget>),
    /// Owns mutable state across rebuilds.
    Stateful(Box<dyn StatefulWidget>),
    /// Owns a render object directly.
    RenderObject(Box<dyn RenderObjectWidget>),
}

impl Component {
    /// The concrete type identity used for reconciliation: two components
    /// reconcile (update in place) only if their `runtime_kind` matches.
    pub fn runtime_kind(&self) -> TypeId {
        match self {
            Component::Stateless(w) => w.as_ref().type_id(),
            Component::Stateful(w) => w.as_ref().type_id(),
            Component::RenderObject(w) => w.as_ref().type_id(),
        }
    }

    /// The component's identity key, if any.
    pub fn key(&self) -> Option<&Key> {
        match self {
            Component::Stateless(w) => w.key(),
            Component::Stateful(w) => w.key(),
            Component::RenderObject(w) => w.key(),
        }
    }

    /// Whether `self` and `other` reconcile to the same element: same
    /// runtime kind, and either both lack keys or their keys are equal.
    pub fn can_update(&self, other: &Component) -> bool {
        self.runtime_kind() == other.runtime_kind() && self.key() == other.key()
    }
}
